//! Property tests for the text buffer's append path.

use proptest::prelude::*;
use quire_text::TextBuffer;

proptest! {
    #[test]
    fn set_text_round_trips(s in "(\\PC|\n){0,200}") {
        let mut buffer = TextBuffer::new();
        buffer.set_text(&s);
        prop_assert_eq!(buffer.text(), s);
    }

    #[test]
    fn chunked_writes_match_single_write(
        s in "(\\PC|\n){0,120}",
        cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let bytes = s.as_bytes();
        let mut points: Vec<usize> = cuts.iter().map(|c| c.index(bytes.len() + 1)).collect();
        points.sort_unstable();

        let mut chunked = TextBuffer::new();
        let mut last = 0;
        for point in points {
            chunked.write(&bytes[last..point]);
            // Fold between writes so split sequences sit in the queue.
            chunked.process_incoming();
            last = point;
        }
        chunked.write(&bytes[last..]);

        prop_assert_eq!(chunked.text(), s);
    }

    #[test]
    fn line_count_matches_newlines(s in "[a-z\n]{1,100}") {
        let mut buffer = TextBuffer::new();
        buffer.write(s.as_bytes());
        prop_assert_eq!(buffer.line_count(), s.matches('\n').count() + 1);
    }
}
