//! # SDP Dissection Driver
//!
//! Drives the [line scanner](crate::scanner) and the
//! [field classifier](crate::classifier) over one SDP body, from offset 0
//! until the buffer is exhausted.
//!
//! ## Output
//!
//! Records come out in input order:
//!
//! 1. one [`SdpRecord::Field`] or [`SdpRecord::Malformed`] per line
//! 2. at most one final [`SdpRecord::Trailing`] holding whatever could not be
//!    split into lines
//!
//! The record spans cover the buffer exactly, without gaps or overlaps.
//!
//! ## Early exit on short lines
//!
//! A line whose content is shorter than two bytes (`x`, or an empty line)
//! stops line-by-line dissection. Everything from the start of that line to
//! the end of the buffer becomes a single trailing-data record, even if
//! well-formed lines follow. A body with a blank line in the middle is
//! therefore only classified up to the blank line.
//!
//! ## Example
//!
//! ```
//! use rvoip_sdp_dissector::dissect;
//!
//! let body = b"v=0\r\ns=Talk\r\nm=audio 49170 RTP/AVP 0\r\na=rtpmap:0 PCMU/8000\r\n";
//! let dissection = dissect(body);
//!
//! let names: Vec<&str> = dissection.fields().map(|f| f.name).collect();
//! assert_eq!(names, [
//!     "Session Description, version",
//!     "Session Name",
//!     "Media Description, name and address",
//!     "Media Attribute",
//! ]);
//! assert!(dissection.trailing().is_none());
//! assert_eq!(dissection.covered_len(), body.len());
//! ```

use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::classifier::classify_line;
use crate::scanner::LineScanner;
use crate::types::{ClassifiedField, MalformedLine, SdpRecord, Section, Span, TrailingData};

/// Shortest line content that can hold `<tag>=`
pub const MIN_LINE_LEN: usize = 2;

/// Lazy dissection of one SDP body
///
/// Created by [`SdpDissector::new`]; yields records in input order. The
/// section state lives in the iterator and is never shared.
#[derive(Debug, Clone)]
pub struct SdpDissector<'a> {
    lines: LineScanner<'a>,
    section: Section,
    finished: bool,
}

impl<'a> SdpDissector<'a> {
    /// Start dissecting `buf`
    pub fn new(buf: &'a [u8]) -> Self {
        trace!(len = buf.len(), "dissecting SDP body");
        Self {
            lines: LineScanner::new(buf),
            section: Section::None,
            finished: false,
        }
    }

    /// Section in effect for the next line
    pub fn section(&self) -> Section {
        self.section
    }

    fn trailing_from(&self, offset: usize) -> Option<SdpRecord<'a>> {
        let buf = self.lines.buffer();
        if offset >= buf.len() {
            return None;
        }
        let span = Span::from_bounds(offset, buf.len());
        debug!(offset, len = span.len, "trailing SDP data");
        Some(
            TrailingData {
                span,
                data: span.slice(buf),
            }
            .into(),
        )
    }
}

impl<'a> Iterator for SdpDissector<'a> {
    type Item = SdpRecord<'a>;

    fn next(&mut self) -> Option<SdpRecord<'a>> {
        if self.finished {
            return None;
        }

        let Some(line) = self.lines.next() else {
            self.finished = true;
            return self.trailing_from(self.lines.offset());
        };

        if line.len < MIN_LINE_LEN {
            debug!(
                offset = line.start,
                len = line.len,
                "short SDP line, stopping line dissection"
            );
            self.finished = true;
            return self.trailing_from(line.start);
        }

        let (record, section) = classify_line(self.lines.buffer(), &line, self.section);
        if let SdpRecord::Malformed(malformed) = &record {
            debug!(offset = malformed.span.offset, reason = %malformed.reason, "invalid SDP line");
        }
        self.section = section;
        Some(record)
    }
}

impl FusedIterator for SdpDissector<'_> {}

/// The complete result of dissecting one SDP body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dissection<'a> {
    records: Vec<SdpRecord<'a>>,
    section: Section,
}

impl<'a> Dissection<'a> {
    /// All records, in input order
    pub fn records(&self) -> &[SdpRecord<'a>] {
        &self.records
    }

    /// Iterate over all records
    pub fn iter(&self) -> std::slice::Iter<'_, SdpRecord<'a>> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dissection produced no records (empty input)
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Section in effect after the last classified line
    pub fn section(&self) -> Section {
        self.section
    }

    /// Classified fields only
    pub fn fields(&self) -> impl Iterator<Item = &ClassifiedField<'a>> + '_ {
        self.records.iter().filter_map(SdpRecord::as_field)
    }

    /// Malformed lines only
    pub fn malformed_lines(&self) -> impl Iterator<Item = &MalformedLine<'a>> + '_ {
        self.records.iter().filter_map(SdpRecord::as_malformed)
    }

    /// The trailing data record, if any
    pub fn trailing(&self) -> Option<&TrailingData<'a>> {
        self.records.last().and_then(SdpRecord::as_trailing)
    }

    /// Total number of bytes covered by the record spans
    pub fn covered_len(&self) -> usize {
        self.records.iter().map(|r| r.span().len).sum()
    }
}

impl<'a> IntoIterator for Dissection<'a> {
    type Item = SdpRecord<'a>;
    type IntoIter = std::vec::IntoIter<SdpRecord<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'d, 'a> IntoIterator for &'d Dissection<'a> {
    type Item = &'d SdpRecord<'a>;
    type IntoIter = std::slice::Iter<'d, SdpRecord<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Dissect a whole SDP body eagerly
pub fn dissect(buf: &[u8]) -> Dissection<'_> {
    let mut dissector = SdpDissector::new(buf);
    let records = dissector.by_ref().collect();
    Dissection {
        records,
        section: dissector.section(),
    }
}
