//! Rendering of dissected records for protocol-inspection hosts
//!
//! SDP always rides inside another protocol (SIP, SAP, RTSP, HTTP, MIME mail),
//! so the host has already filled in its protocol and info columns by the time
//! the body is dissected. [`ColumnInfo::annotate`] therefore appends to those
//! columns and never replaces them.
//!
//! [`DisplayTree`] mirrors the usual inspection tree: one root item for the
//! protocol spanning the whole body, with one child per record.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::config::{DisplayConfig, ProtocolInfo};
use crate::error::Result;
use crate::parser::{dissect, Dissection};
use crate::types::{SdpRecord, Span};

/// Format raw bytes as printable text
///
/// Printable ASCII passes through unchanged. Control characters with a C
/// escape are written as that escape (`\r`, `\n`, `\t`, ...); every other
/// byte becomes a three-digit octal escape.
pub fn format_text(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            0x20..=0x7e => out.push(char::from(b)),
            0x07 => out.push_str("\\a"),
            0x08 => out.push_str("\\b"),
            0x0c => out.push_str("\\f"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x0b => out.push_str("\\v"),
            other => {
                let _ = write!(out, "\\{other:03o}");
            }
        }
    }
    out
}

fn format_value(bytes: &[u8], config: &DisplayConfig) -> String {
    let (shown, truncated) = match config.max_value_len {
        Some(max) if bytes.len() > max => (&bytes[..max], true),
        _ => (bytes, false),
    };
    let mut text = if config.escape_non_printable {
        format_text(shown)
    } else {
        String::from_utf8_lossy(shown).into_owned()
    };
    if truncated {
        text.push_str("...");
    }
    text
}

/// Kind of a display item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Root item for the whole protocol body
    Protocol,
    /// A classified field line
    Field,
    /// A line with broken tag syntax
    InvalidLine,
    /// Undissected trailing bytes
    Data,
}

/// One labelled item of the display tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    /// Bytes of the body the item refers to
    pub span: Span,
    /// Item kind
    pub kind: ItemKind,
    /// Human-readable label
    pub label: String,
}

impl DisplayItem {
    /// Render one record
    pub fn from_record(record: &SdpRecord<'_>, config: &DisplayConfig) -> Self {
        match record {
            SdpRecord::Field(field) => DisplayItem {
                span: field.span,
                kind: ItemKind::Field,
                label: format!(
                    "{} ({}): {}",
                    field.name,
                    format_text(&[field.tag.as_byte()]),
                    format_value(field.value, config)
                ),
            },
            SdpRecord::Malformed(line) => DisplayItem {
                span: line.span,
                kind: ItemKind::InvalidLine,
                label: format!("Invalid line: {}", format_value(line.raw, config)),
            },
            SdpRecord::Trailing(data) => DisplayItem {
                span: data.span,
                kind: ItemKind::Data,
                label: format!("Data ({} bytes)", data.len()),
            },
        }
    }
}

/// Protocol item with one child per dissected record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTree {
    /// Root item spanning the whole body
    pub root: DisplayItem,
    /// Record items, in input order
    pub children: Vec<DisplayItem>,
}

impl DisplayTree {
    /// Build the tree for a finished dissection of a `body_len`-byte body
    pub fn from_dissection(dissection: &Dissection<'_>, body_len: usize, config: &DisplayConfig) -> Self {
        DisplayTree {
            root: DisplayItem {
                span: Span::new(0, body_len),
                kind: ItemKind::Protocol,
                label: ProtocolInfo::SDP.name.to_string(),
            },
            children: dissection
                .iter()
                .map(|record| DisplayItem::from_record(record, config))
                .collect(),
        }
    }

    /// Dissect `body` and build its tree
    pub fn build(body: &[u8], config: &DisplayConfig) -> Self {
        Self::from_dissection(&dissect(body), body.len(), config)
    }

    /// Serialize the tree to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for DisplayTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.root.label)?;
        for child in &self.children {
            writeln!(f, "    {}", child.label)?;
        }
        Ok(())
    }
}

/// Summary columns owned by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Protocol column, e.g. `SIP`
    pub protocol: String,
    /// Info column, e.g. `Request: INVITE sip:bob@example.com`
    pub info: String,
}

impl ColumnInfo {
    /// Create columns as filled in by the enclosing protocol
    pub fn new(protocol: impl Into<String>, info: impl Into<String>) -> Self {
        ColumnInfo {
            protocol: protocol.into(),
            info: info.into(),
        }
    }

    /// Mark the columns as carrying a session description
    pub fn annotate(&mut self, config: &DisplayConfig) {
        self.protocol.push_str(&config.protocol_suffix);
        self.info.push_str(&config.info_suffix);
    }
}

/// Annotate the host columns and render the display tree for `body`
///
/// Columns are always annotated. The tree is only built when the host asks
/// for one, as building it is the costly part.
pub fn render(
    body: &[u8],
    columns: &mut ColumnInfo,
    config: &DisplayConfig,
    want_tree: bool,
) -> Option<DisplayTree> {
    columns.annotate(config);
    want_tree.then(|| DisplayTree::build(body, config))
}
