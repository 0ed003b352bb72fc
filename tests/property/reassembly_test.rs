// tests/property/reassembly_test.rs

//! Property-based tests for frame reassembly: the frame sequence produced
//! must be independent of the chunk boundaries the bytes arrived on.

use proptest::prelude::*;
use relayline::core::protocol::LineReassembler;

/// Splits `stream` at the positions described by `cuts` (resolved against the
/// stream length, sorted, deduplicated) and returns the resulting chunks.
fn chunked(stream: &[u8], cuts: &[prop::sample::Index]) -> Vec<Vec<u8>> {
    let mut positions: Vec<usize> = cuts.iter().map(|i| i.index(stream.len() + 1)).collect();
    positions.sort_unstable();
    positions.dedup();

    let mut chunks = Vec::new();
    let mut start = 0;
    for pos in positions {
        chunks.push(stream[start..pos].to_vec());
        start = pos;
    }
    chunks.push(stream[start..].to_vec());
    chunks
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_reassembly_is_chunk_boundary_independent(
        lines in prop::collection::vec("[^\n]{0,40}", 0..12),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut stream = Vec::new();
        for line in &lines {
            stream.extend_from_slice(line.as_bytes());
            stream.push(b'\n');
        }
        let expected: Vec<String> = lines.iter().filter(|l| !l.is_empty()).cloned().collect();

        // Feed the whole stream at once.
        let mut whole = LineReassembler::new();
        prop_assert_eq!(whole.feed(&stream), expected.clone());

        // Feed the same stream split at arbitrary points.
        let mut split = LineReassembler::new();
        let mut frames = Vec::new();
        for chunk in chunked(&stream, &cuts) {
            frames.extend(split.feed(&chunk));
        }
        prop_assert_eq!(frames, expected);
        prop_assert!(split.pending().is_empty());
    }

    #[test]
    fn test_pending_fragment_never_contains_delimiter(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..8),
    ) {
        let mut reassembler = LineReassembler::new();
        for chunk in &chunks {
            reassembler.feed(chunk);
            prop_assert!(!reassembler.pending().contains(&b'\n'));
        }
    }

    #[test]
    fn test_unterminated_tail_is_retained_not_yielded(
        head in "[^\n]{0,40}",
        tail in "[^\n]{1,40}",
    ) {
        let mut stream = head.as_bytes().to_vec();
        stream.push(b'\n');
        stream.extend_from_slice(tail.as_bytes());

        let mut reassembler = LineReassembler::new();
        let frames = reassembler.feed(&stream);
        let expected: Vec<String> =
            if head.is_empty() { vec![] } else { vec![head.clone()] };
        prop_assert_eq!(frames, expected);
        prop_assert_eq!(reassembler.pending(), tail.as_bytes());
    }
}
