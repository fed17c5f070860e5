//! SDP field classification
//!
//! Each SDP line has the format `<type>=<value>` where type is a single
//! character. This module checks that syntax, resolves the tag to a display
//! name and tracks the section the line belongs to:
//!
//! - `v=` opens the session section
//! - `m=` opens a media section
//!
//! Only `i=` and `a=` depend on the section. Under `v=` they are session
//! information and session attributes, under `m=` media title and media
//! attributes. Seen before either, they are reported as misplaced.
//!
//! The section is threaded through by value: [`classify_line`] takes the
//! current [`Section`] and returns the next one, so independent dissections
//! never share state.

use nom::{bytes::complete::tag, combinator::rest, number::complete::u8 as any_byte, IResult};
use tracing::trace;

use crate::error::LineError;
use crate::scanner::Line;
use crate::types::{ClassifiedField, FieldTag, MalformedLine, SdpRecord, Section};

/// Display name for tags outside the RFC 2327 set
pub const UNKNOWN_NAME: &str = "Unknown";

/// Display name for `i=`/`a=` lines seen before any `v=` or `m=`
pub const MISPLACED_NAME: &str = "Misplaced";

/// Parse `<tag>=<value>`, the value being the rest of the input
fn tag_and_value(input: &[u8]) -> IResult<&[u8], (u8, &[u8])> {
    let (input, tag_byte) = any_byte(input)?;
    let (input, _) = tag(&b"="[..])(input)?;
    let (input, value) = rest(input)?;
    Ok((input, (tag_byte, value)))
}

/// Split line content into its tag byte and value
///
/// # Errors
///
/// - [`LineError::TooShort`] if the content is shorter than two bytes
/// - [`LineError::MissingSeparator`] if the second byte is not `=`
pub fn split_tag(content: &[u8]) -> Result<(u8, &[u8]), LineError> {
    if content.len() < 2 {
        return Err(LineError::TooShort { len: content.len() });
    }
    match tag_and_value(content) {
        Ok((_, parts)) => Ok(parts),
        Err(_) => Err(LineError::MissingSeparator { found: content[1] }),
    }
}

/// Resolve the display name of a tag within a section
pub fn field_name(tag: FieldTag, section: Section) -> &'static str {
    match tag {
        FieldTag::Version => "Session Description, version",
        FieldTag::Origin => "Owner/Creator, Session Id",
        FieldTag::SessionName => "Session Name",
        FieldTag::Information => match section {
            Section::Session => "Session Information",
            Section::Media => "Media Title",
            Section::None => MISPLACED_NAME,
        },
        FieldTag::Uri => "URI of Description",
        FieldTag::Email => "E-mail Address",
        FieldTag::Phone => "Phone Number",
        FieldTag::Connection => "Connection Information",
        FieldTag::Bandwidth => "Bandwidth Information",
        FieldTag::Time => "Time Description, active time",
        FieldTag::Repeat => "Repeat Time",
        FieldTag::Media => "Media Description, name and address",
        FieldTag::Key => "Encryption Key",
        FieldTag::Attribute => match section {
            Section::Session => "Session Attribute",
            Section::Media => "Media Attribute",
            Section::None => MISPLACED_NAME,
        },
        FieldTag::TimeZone => "Time Zone Adjustment",
        FieldTag::Unrecognized(_) => UNKNOWN_NAME,
    }
}

/// Section in effect after a syntactically valid line with `tag`
///
/// `v=` re-enters the session section wherever it appears.
pub fn next_section(tag: FieldTag, section: Section) -> Section {
    match tag {
        FieldTag::Version => Section::Session,
        FieldTag::Media => Section::Media,
        _ => section,
    }
}

/// Classify one line of `buf`
///
/// Returns either an [`SdpRecord::Field`] or an [`SdpRecord::Malformed`],
/// never trailing data, together with the section in effect for the next
/// line. Malformed lines leave the section unchanged.
pub fn classify_line<'a>(buf: &'a [u8], line: &Line, section: Section) -> (SdpRecord<'a>, Section) {
    let span = line.span();
    match split_tag(line.content(buf)) {
        Ok((tag_byte, value)) => {
            let tag = FieldTag::from_byte(tag_byte);
            let name = field_name(tag, section);
            trace!(offset = span.offset, tag = %char::from(tag_byte), display_name = name, "classified SDP line");
            let field = ClassifiedField {
                span,
                tag,
                name,
                value,
            };
            (field.into(), next_section(tag, section))
        }
        Err(reason) => {
            let malformed = MalformedLine {
                span,
                raw: span.slice(buf),
                reason,
            };
            (malformed.into(), section)
        }
    }
}
