#[cfg(test)]
mod tests {
    use leakosint_bot::text_processing::{
        chunk_text, escape_html, DEFAULT_CHUNK_LIMIT, MAX_CHUNKS, TRUNCATION_MARKER,
    };

    fn marker_len() -> usize {
        TRUNCATION_MARKER.chars().count()
    }

    fn strip_marker(chunk: &str) -> &str {
        chunk.strip_suffix(TRUNCATION_MARKER).unwrap_or(chunk)
    }

    /// Lines of 99 characters followed by a line break, 100 chars per line
    fn lined_text(total_chars: usize) -> String {
        let line = format!("{}\n", "x".repeat(99));
        line.repeat(total_chars / 100)
    }

    #[test]
    fn test_escape_is_not_idempotent_on_ampersand() {
        let once = escape_html("Tom & Jerry");
        assert_eq!(once, "Tom &amp; Jerry");
        assert_ne!(escape_html(&once), once);
    }

    #[test]
    fn test_escape_all_markup_characters() {
        assert_eq!(
            escape_html("<script>alert('x') && 1 > 0</script>"),
            "&lt;script&gt;alert('x') &amp;&amp; 1 &gt; 0&lt;/script&gt;"
        );
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        for text in ["", "hello", "line one\nline two"] {
            assert_eq!(chunk_text(text, DEFAULT_CHUNK_LIMIT), vec![text.to_string()]);
        }

        let exact = "a".repeat(DEFAULT_CHUNK_LIMIT);
        assert_eq!(chunk_text(&exact, DEFAULT_CHUNK_LIMIT), vec![exact.clone()]);
    }

    #[test]
    fn test_chunks_respect_limit_and_count() {
        let inputs = [
            "a".repeat(50_000),
            lined_text(60_000),
            format!("{}\n{}", "b".repeat(5000), "c".repeat(5000)),
            "é&<>".repeat(4000),
        ];

        for input in &inputs {
            let chunks = chunk_text(input, DEFAULT_CHUNK_LIMIT);
            assert!(chunks.len() <= MAX_CHUNKS);
            for chunk in &chunks {
                assert!(chunk.chars().count() <= DEFAULT_CHUNK_LIMIT + marker_len());
            }
        }
    }

    #[test]
    fn test_overflow_beyond_max_chunks_is_dropped() {
        let text = "a".repeat(DEFAULT_CHUNK_LIMIT * 12);
        let chunks = chunk_text(&text, DEFAULT_CHUNK_LIMIT);

        assert_eq!(chunks.len(), MAX_CHUNKS);
        assert!(chunks.iter().all(|chunk| chunk.ends_with(TRUNCATION_MARKER)));
    }

    #[test]
    fn test_cut_at_line_break_inside_window() {
        // Break 100 chars before the limit: inside the 500-char window
        let text = format!("{}\n{}", "a".repeat(3400), "b".repeat(1000));
        let chunks = chunk_text(&text, DEFAULT_CHUNK_LIMIT);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{}{}", "a".repeat(3400), TRUNCATION_MARKER));
        assert_eq!(chunks[1], format!("\n{}", "b".repeat(1000)));
    }

    #[test]
    fn test_hard_cut_when_line_break_outside_window() {
        // Break 600 chars before the limit: too early, so the cut is hard
        let text = format!("{}\n{}", "a".repeat(2900), "b".repeat(2000));
        let chunks = chunk_text(&text, DEFAULT_CHUNK_LIMIT);

        assert_eq!(chunks.len(), 2);
        assert_eq!(strip_marker(&chunks[0]).chars().count(), DEFAULT_CHUNK_LIMIT);
        assert!(chunks[0].ends_with(&format!("b{TRUNCATION_MARKER}")));
    }

    #[test]
    fn test_lined_text_splits_into_three_line_aligned_chunks() {
        let text = lined_text(10_000);
        assert_eq!(text.chars().count(), 10_000);

        let chunks = chunk_text(&text, DEFAULT_CHUNK_LIMIT);
        assert_eq!(chunks.len(), 3);

        let mut offset = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            let piece = strip_marker(chunk);
            assert!(piece.chars().count() <= DEFAULT_CHUNK_LIMIT);
            assert_eq!(&text[offset..offset + piece.len()], piece);
            offset += piece.len();

            if i + 1 < chunks.len() {
                assert!(chunk.ends_with(TRUNCATION_MARKER));
                // Each cut lands right before a line break
                assert_eq!(&text[offset..offset + 1], "\n");
            } else {
                assert!(!chunk.ends_with(TRUNCATION_MARKER));
            }
        }
        assert_eq!(offset, text.len());
    }

    #[test]
    fn test_small_limits_still_progress() {
        let chunks = chunk_text("\n\n\n\n\n\n", 2);
        assert!(!chunks.is_empty());
        assert!(chunks.len() <= MAX_CHUNKS);
        assert!(chunks.iter().all(|c| !strip_marker(c).is_empty()));
    }
}
