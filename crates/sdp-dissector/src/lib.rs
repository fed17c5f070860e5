//! # rvoip-sdp-dissector
//!
//! A line-oriented dissector for Session Description Protocol bodies
//! ([RFC 2327](https://datatracker.ietf.org/doc/html/rfc2327)) as they appear
//! inside SIP, SAP, RTSP or HTTP payloads captured off the wire.
//!
//! Unlike a full SDP parser, the dissector does not build a session model or
//! validate field contents. It labels every line of an untrusted, possibly
//! truncated buffer with a human-readable field name, so that a
//! protocol-inspection host can display it:
//!
//! - [`scanner`] splits the buffer into lines (CRLF, CR or LF)
//! - [`classifier`] checks the `<tag>=` syntax and names the field, using the
//!   current session/media section for `i=` and `a=`
//! - [`parser`] drives both and emits the records in input order
//! - [`display`] turns records into labelled display items for the host
//!
//! Dissection never fails. Malformed lines and leftover bytes are reported as
//! ordinary [`SdpRecord`]s, and the record spans always cover the buffer
//! exactly.
//!
//! ## Usage
//!
//! ```
//! use rvoip_sdp_dissector::{dissect, LineError, SdpRecord};
//!
//! let body = b"v=0\r\ni=Weekly sync\r\nxx\r\nm=audio 49170 RTP/AVP 0\r\ni=Main mic\r\n";
//!
//! for record in &dissect(body) {
//!     match record {
//!         SdpRecord::Field(field) => println!("{}: {:?}", field.name, field.value),
//!         SdpRecord::Malformed(line) => println!("invalid line: {}", line.reason),
//!         SdpRecord::Trailing(data) => println!("{} trailing bytes", data.len()),
//!     }
//! }
//!
//! let dissection = dissect(body);
//! let names: Vec<&str> = dissection.fields().map(|f| f.name).collect();
//! assert_eq!(names[1], "Session Information");
//! assert_eq!(names[3], "Media Title");
//! assert_eq!(
//!     dissection.malformed_lines().next().unwrap().reason,
//!     LineError::MissingSeparator { found: b'x' }
//! );
//! ```

pub mod classifier;
pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod types;

pub use classifier::{classify_line, field_name, next_section};
pub use config::{DisplayConfig, ProtocolInfo};
pub use display::{format_text, render, ColumnInfo, DisplayItem, DisplayTree, ItemKind};
pub use error::{Error, LineError, Result};
pub use parser::{dissect, Dissection, SdpDissector};
pub use scanner::{find_line_end, Line, LineScanner};
pub use types::{ClassifiedField, FieldTag, MalformedLine, SdpRecord, Section, Span, TrailingData};

/// Version information for the dissector library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
