//! Property tests over arbitrary SDP-like buffers

use proptest::prelude::*;
use rvoip_sdp_dissector::{dissect, find_line_end, LineScanner, SdpDissector, SdpRecord};

/// Bytes weighted towards SDP syntax so that valid lines, quotes and every
/// line-ending flavour show up often.
fn sdp_like_bytes() -> impl Strategy<Value = Vec<u8>> {
    let byte = prop_oneof![
        4 => prop::sample::select(b"vosiuepcbtrmkazx".to_vec()),
        3 => Just(b'='),
        2 => Just(b'\r'),
        2 => Just(b'\n'),
        1 => Just(b'"'),
        4 => any::<u8>(),
    ];
    prop::collection::vec(byte, 0..256)
}

proptest! {
    /// Record spans are contiguous and cover the whole buffer.
    #[test]
    fn spans_cover_buffer(body in sdp_like_bytes()) {
        let dissection = dissect(&body);
        let mut offset = 0;
        for record in dissection.iter() {
            prop_assert_eq!(record.span().offset, offset);
            prop_assert!(!record.span().is_empty());
            offset = record.span().end();
        }
        prop_assert_eq!(offset, body.len());
    }

    /// Arbitrary bytes never panic and keep the same coverage.
    #[test]
    fn arbitrary_bytes_are_covered(body in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(dissect(&body).covered_len(), body.len());
    }

    /// Trailing data can only be the last record.
    #[test]
    fn trailing_data_is_last(body in sdp_like_bytes()) {
        let records: Vec<SdpRecord<'_>> = SdpDissector::new(&body).collect();
        if let Some(pos) = records.iter().position(|r| matches!(r, SdpRecord::Trailing(_))) {
            prop_assert_eq!(pos, records.len() - 1);
        }
    }

    /// Every line advances the scanner and ends at or before the buffer end.
    #[test]
    fn scanner_always_advances(body in sdp_like_bytes()) {
        let mut previous = 0;
        for line in LineScanner::new(&body) {
            prop_assert_eq!(line.start, previous);
            prop_assert!(line.next_offset > line.start);
            prop_assert!(line.start + line.len <= line.next_offset);
            prop_assert!(line.next_offset <= body.len());
            previous = line.next_offset;
        }
        prop_assert_eq!(previous, body.len());
    }

    /// A line found from any offset is consistent with the buffer.
    #[test]
    fn line_end_within_bounds(body in sdp_like_bytes(), offset in 0usize..300) {
        let line = find_line_end(&body, offset);
        prop_assert!(line.start <= body.len());
        prop_assert!(line.start + line.len <= body.len());
        prop_assert!(line.next_offset <= body.len());
        if line.terminated {
            let terminator = body[line.start + line.len];
            prop_assert!(terminator == b'\r' || terminator == b'\n');
        } else {
            prop_assert_eq!(line.next_offset, body.len());
        }
    }

    /// Dissecting the same buffer twice gives identical results.
    #[test]
    fn dissection_is_deterministic(body in sdp_like_bytes()) {
        prop_assert_eq!(dissect(&body), dissect(&body));
    }
}
