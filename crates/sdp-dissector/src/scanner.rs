//! Line scanning over a raw SDP body
//!
//! SDP is text-line oriented, but bodies pulled off the wire do not agree on a
//! line ending. The scanner accepts CRLF, a bare CR and a bare LF alike, and
//! never copies: a [`Line`] is a set of offsets into the caller's buffer.
//!
//! Double-quoted runs are skipped while looking for the terminator, so a CR or
//! LF between quotes stays part of the line. An unclosed quote extends the line
//! to the end of the buffer.

use crate::types::Span;

/// One logical line within a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Offset of the first byte of the line
    pub start: usize,
    /// Length of the line content, terminator excluded
    pub len: usize,
    /// Offset where the next line starts, past any terminator
    pub next_offset: usize,
    /// Whether a terminator was found before the end of the buffer
    pub terminated: bool,
}

impl Line {
    fn unterminated(start: usize, end: usize) -> Self {
        Self {
            start,
            len: end - start,
            next_offset: end,
            terminated: false,
        }
    }

    /// Span of the line content, terminator excluded
    pub const fn content_span(&self) -> Span {
        Span::new(self.start, self.len)
    }

    /// Span from the line start up to the next line, terminator included
    pub const fn span(&self) -> Span {
        Span::from_bounds(self.start, self.next_offset)
    }

    /// Line content within `buf`
    pub fn content<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        self.content_span().slice(buf)
    }
}

fn is_line_end_or_quote(b: u8) -> bool {
    matches!(b, b'\r' | b'\n' | b'"')
}

/// Find the end of the line starting at `offset`
///
/// Returns the line content length and the offset where parsing resumes. If no
/// terminator is found the line runs to the end of `buf` and `next_offset`
/// equals `buf.len()`. An `offset` at or past the end yields an empty,
/// unterminated line.
pub fn find_line_end(buf: &[u8], offset: usize) -> Line {
    let end = buf.len();
    let start = offset.min(end);
    let mut cur = start;
    let mut quoted = false;

    while cur < end {
        let rest = &buf[cur..];
        let found = if quoted {
            rest.iter().position(|&b| b == b'"')
        } else {
            rest.iter().position(|&b| is_line_end_or_quote(b))
        };
        let Some(pos) = found else {
            break;
        };
        let at = cur + pos;

        if quoted {
            quoted = false;
        } else if buf[at] == b'"' {
            quoted = true;
        } else {
            let mut next_offset = at + 1;
            if buf[at] == b'\r' && buf.get(next_offset) == Some(&b'\n') {
                next_offset += 1;
            }
            return Line {
                start,
                len: at - start,
                next_offset,
                terminated: true,
            };
        }
        cur = at + 1;
    }

    Line::unterminated(start, end)
}

/// Iterator over the successive lines of a buffer
///
/// Every yielded line advances the offset by at least one byte, so iteration
/// always terminates.
#[derive(Debug, Clone)]
pub struct LineScanner<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> LineScanner<'a> {
    /// Scan `buf` from its first byte
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_offset(buf, 0)
    }

    /// Scan `buf` starting at `offset`
    pub fn with_offset(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, offset }
    }

    /// Offset of the next line to be yielded
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The buffer being scanned
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }
}

impl Iterator for LineScanner<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.offset >= self.buf.len() {
            return None;
        }
        let mut line = find_line_end(self.buf, self.offset);
        if line.next_offset <= self.offset {
            line = Line::unterminated(self.offset, self.buf.len());
        }
        self.offset = line.next_offset;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_terminator() {
        let line = find_line_end(b"v=0\r\ns=x\r\n", 0);
        assert_eq!(line.start, 0);
        assert_eq!(line.len, 3);
        assert_eq!(line.next_offset, 5);
        assert!(line.terminated);
        assert_eq!(line.span(), Span::new(0, 5));
        assert_eq!(line.content_span(), Span::new(0, 3));
    }

    #[test]
    fn test_bare_lf_and_cr_terminators() {
        let buf = b"v=0\ns=x\rt=0 0";
        let line = find_line_end(buf, 0);
        assert_eq!((line.len, line.next_offset), (3, 4));

        let line = find_line_end(buf, 4);
        assert_eq!((line.len, line.next_offset), (3, 8));

        let line = find_line_end(buf, 8);
        assert_eq!((line.len, line.next_offset), (5, buf.len()));
        assert!(!line.terminated);
    }

    #[test]
    fn test_lf_cr_is_two_lines() {
        // LF then CR: the CR starts a new, empty line
        let buf = b"a\n\rb";
        let line = find_line_end(buf, 0);
        assert_eq!((line.len, line.next_offset), (1, 2));
        let line = find_line_end(buf, 2);
        assert_eq!((line.len, line.next_offset), (0, 3));
    }

    #[test]
    fn test_quoted_terminator_is_skipped() {
        let buf = b"s=\"a\r\nb\"\r\nt=0 0\r\n";
        let line = find_line_end(buf, 0);
        assert_eq!(line.content(buf), b"s=\"a\r\nb\"");
        assert_eq!(line.next_offset, 10);
    }

    #[test]
    fn test_unclosed_quote_runs_to_end() {
        let buf = b"s=\"open\r\nt=0 0\r\n";
        let line = find_line_end(buf, 0);
        assert_eq!(line.len, buf.len());
        assert_eq!(line.next_offset, buf.len());
        assert!(!line.terminated);
    }

    #[test]
    fn test_quote_as_last_byte() {
        let buf = b"a=\"";
        let line = find_line_end(buf, 0);
        assert_eq!((line.len, line.next_offset), (3, 3));
    }

    #[test]
    fn test_offset_past_end() {
        let line = find_line_end(b"v=0", 7);
        assert_eq!(line.start, 3);
        assert_eq!(line.len, 0);
        assert_eq!(line.next_offset, 3);
        assert!(!line.terminated);

        assert_eq!(find_line_end(b"", 0).len, 0);
    }

    #[test]
    fn test_scanner_yields_all_lines() {
        let buf = b"v=0\r\n\r\ns=x";
        let lines: Vec<Line> = LineScanner::new(buf).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].content(buf), b"v=0");
        assert_eq!(lines[1].content(buf), b"");
        assert_eq!(lines[1].span(), Span::new(5, 2));
        assert_eq!(lines[2].content(buf), b"s=x");
        assert!(!lines[2].terminated);
    }

    #[test]
    fn test_scanner_empty_buffer() {
        let mut scanner = LineScanner::new(b"");
        assert!(scanner.next().is_none());
        assert_eq!(scanner.offset(), 0);
    }

    #[test]
    fn test_scanner_with_offset() {
        let buf = b"v=0\r\ns=x\r\n";
        let mut scanner = LineScanner::with_offset(buf, 5);
        let line = scanner.next().unwrap();
        assert_eq!(line.content(scanner.buffer()), b"s=x");
        assert_eq!(scanner.offset(), buf.len());
        assert!(scanner.next().is_none());
    }
}
