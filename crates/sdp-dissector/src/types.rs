//! Record model produced by the SDP dissector
//!
//! All records borrow from the input buffer; nothing is copied. Every record
//! carries a [`Span`] and, taken in order, the spans of one dissection cover
//! the input buffer exactly once.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::error::{Error, LineError, Result};

/// A contiguous byte range within the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Offset of the first byte
    pub offset: usize,
    /// Number of bytes covered
    pub len: usize,
}

impl Span {
    /// Create a span from a start offset and a length
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Create a span covering `[start, end)`
    pub const fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            len: end - start,
        }
    }

    /// One past the last byte covered
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Whether the span covers no bytes
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The span as a range of offsets
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// The bytes of `buf` covered by this span
    ///
    /// # Panics
    ///
    /// Panics if the span does not lie within `buf`.
    pub fn slice<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.range()]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.offset, self.end())
    }
}

/// Structural section the dissector currently occupies
///
/// Entered by `v=` (session) and `m=` (media); every other tag leaves it alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Section {
    /// No `v=` or `m=` line seen yet
    #[default]
    None,
    /// Most recent section-opening line was `v=`
    Session,
    /// Most recent section-opening line was `m=`
    Media,
}

/// The one-letter SDP field tag of RFC 2327
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldTag {
    /// `v=` protocol version
    Version,
    /// `o=` owner/creator and session identifier
    Origin,
    /// `s=` session name
    SessionName,
    /// `i=` session information or media title
    Information,
    /// `u=` URI of description
    Uri,
    /// `e=` email address
    Email,
    /// `p=` phone number
    Phone,
    /// `c=` connection information
    Connection,
    /// `b=` bandwidth information
    Bandwidth,
    /// `t=` time the session is active
    Time,
    /// `r=` repeat times
    Repeat,
    /// `m=` media name and transport address
    Media,
    /// `k=` encryption key
    Key,
    /// `a=` session or media attribute
    Attribute,
    /// `z=` time zone adjustments
    TimeZone,
    /// Any other byte in tag position
    Unrecognized(u8),
}

impl FieldTag {
    /// Map a tag byte onto the closed tag set
    pub const fn from_byte(b: u8) -> Self {
        match b {
            b'v' => Self::Version,
            b'o' => Self::Origin,
            b's' => Self::SessionName,
            b'i' => Self::Information,
            b'u' => Self::Uri,
            b'e' => Self::Email,
            b'p' => Self::Phone,
            b'c' => Self::Connection,
            b'b' => Self::Bandwidth,
            b't' => Self::Time,
            b'r' => Self::Repeat,
            b'm' => Self::Media,
            b'k' => Self::Key,
            b'a' => Self::Attribute,
            b'z' => Self::TimeZone,
            other => Self::Unrecognized(other),
        }
    }

    /// The byte this tag was read from
    pub const fn as_byte(&self) -> u8 {
        match self {
            Self::Version => b'v',
            Self::Origin => b'o',
            Self::SessionName => b's',
            Self::Information => b'i',
            Self::Uri => b'u',
            Self::Email => b'e',
            Self::Phone => b'p',
            Self::Connection => b'c',
            Self::Bandwidth => b'b',
            Self::Time => b't',
            Self::Repeat => b'r',
            Self::Media => b'm',
            Self::Key => b'k',
            Self::Attribute => b'a',
            Self::TimeZone => b'z',
            Self::Unrecognized(b) => *b,
        }
    }

    /// Whether the tag is one of the RFC 2327 tags
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<u8> for FieldTag {
    fn from(b: u8) -> Self {
        Self::from_byte(b)
    }
}

/// A syntactically valid `<tag>=<value>` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedField<'a> {
    /// Line span, terminator included
    pub span: Span,
    /// Field tag
    pub tag: FieldTag,
    /// Human-readable field name, resolved against the section
    pub name: &'static str,
    /// Raw value bytes: the line content after `<tag>=`, terminator excluded
    pub value: &'a [u8],
}

impl<'a> ClassifiedField<'a> {
    /// Offset of the first value byte within the input buffer
    pub const fn value_offset(&self) -> usize {
        self.span.offset + 2
    }

    /// The value as text
    pub fn value_str(&self) -> Result<&'a str> {
        std::str::from_utf8(self.value).map_err(|source| Error::InvalidUtf8 {
            offset: self.value_offset(),
            source,
        })
    }
}

/// A line that does not start with `<tag>=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedLine<'a> {
    /// Line span, terminator included
    pub span: Span,
    /// The raw bytes of the span
    pub raw: &'a [u8],
    /// Why the line was rejected
    pub reason: LineError,
}

/// Bytes left over once line-by-line dissection stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingData<'a> {
    /// Span of the leftover bytes, always running to the end of the buffer
    pub span: Span,
    /// The leftover bytes
    pub data: &'a [u8],
}

impl TrailingData<'_> {
    /// Number of leftover bytes
    pub const fn len(&self) -> usize {
        self.span.len
    }
}

/// One output record of a dissection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdpRecord<'a> {
    /// A classified `<tag>=<value>` line
    Field(ClassifiedField<'a>),
    /// A line with broken tag syntax
    Malformed(MalformedLine<'a>),
    /// Undissected remainder of the buffer
    Trailing(TrailingData<'a>),
}

impl<'a> SdpRecord<'a> {
    /// Span of the record within the input buffer
    pub const fn span(&self) -> Span {
        match self {
            Self::Field(f) => f.span,
            Self::Malformed(m) => m.span,
            Self::Trailing(t) => t.span,
        }
    }

    /// The classified field, if this record is one
    pub const fn as_field(&self) -> Option<&ClassifiedField<'a>> {
        match self {
            Self::Field(f) => Some(f),
            _ => None,
        }
    }

    /// The malformed line, if this record is one
    pub const fn as_malformed(&self) -> Option<&MalformedLine<'a>> {
        match self {
            Self::Malformed(m) => Some(m),
            _ => None,
        }
    }

    /// The trailing data, if this record is one
    pub const fn as_trailing(&self) -> Option<&TrailingData<'a>> {
        match self {
            Self::Trailing(t) => Some(t),
            _ => None,
        }
    }
}

impl<'a> From<ClassifiedField<'a>> for SdpRecord<'a> {
    fn from(f: ClassifiedField<'a>) -> Self {
        Self::Field(f)
    }
}

impl<'a> From<MalformedLine<'a>> for SdpRecord<'a> {
    fn from(m: MalformedLine<'a>) -> Self {
        Self::Malformed(m)
    }
}

impl<'a> From<TrailingData<'a>> for SdpRecord<'a> {
    fn from(t: TrailingData<'a>) -> Self {
        Self::Trailing(t)
    }
}
