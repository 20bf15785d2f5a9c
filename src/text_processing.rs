//! # Text Processing Module
//!
//! This module provides the text utilities used to turn search results into
//! Telegram-safe messages.
//!
//! ## Features
//!
//! - HTML escaping of user- and API-supplied text for `parse_mode=HTML`
//! - Splitting of oversized blocks into bounded chunks, preferring line breaks
//! - Hard cuts that never split a UTF-8 character, HTML entity or tag
//! - Elements such as `<b>` kept balanced within every chunk

use tracing::{debug, trace};

/// Default maximum number of characters per delivered chunk
pub const DEFAULT_CHUNK_LIMIT: usize = 3500;

/// Maximum number of chunks produced from a single block
pub const MAX_CHUNKS: usize = 10;

/// Marker appended to every chunk that is followed by more text
pub const TRUNCATION_MARKER: &str = "\n\n…truncated…";

/// A line break is only used as a cut point when it falls within this many
/// characters of the end of the chunk window
pub const LINE_BREAK_WINDOW: usize = 500;

// Longest entity or tag a hard cut will step back over
const MARKUP_LOOKBACK: usize = 16;

/// Escape the characters that are significant in Telegram HTML
///
/// `&` is replaced first so that the entities introduced for `<` and `>`
/// are not escaped a second time.
///
/// # Examples
///
/// ```rust
/// use leakosint_bot::text_processing::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Split a block of text into chunks of at most `limit` characters
///
/// Text that already fits is returned unchanged as the only element.
/// Otherwise each chunk is cut at the last line break of its window when that
/// break lies within the final [`LINE_BREAK_WINDOW`] characters, and hard-cut at
/// `limit` when it does not. Every chunk except the last carries
/// [`TRUNCATION_MARKER`]. At most [`MAX_CHUNKS`] chunks are produced; any text
/// left after that is dropped. A chunk never ends inside an element: an
/// element cut in two is closed before the marker and reopened at the start
/// of the next chunk.
///
/// Lengths are counted in characters, not bytes.
///
/// # Arguments
///
/// * `text` - The rendered block to split
/// * `limit` - Maximum number of characters per chunk, excluding the marker
///
/// # Examples
///
/// ```rust
/// use leakosint_bot::text_processing::{chunk_text, TRUNCATION_MARKER};
///
/// let chunks = chunk_text("short", 3500);
/// assert_eq!(chunks, vec!["short".to_string()]);
///
/// let text = format!("{}\n{}", "a".repeat(8), "b".repeat(8));
/// let chunks = chunk_text(&text, 10);
/// assert_eq!(chunks[0], format!("{}{}", "a".repeat(8), TRUNCATION_MARKER));
/// ```
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut remaining = text.to_string();

    while !remaining.is_empty() && chunks.len() < MAX_CHUNKS {
        let head_end = byte_offset(&remaining, limit);
        if head_end == remaining.len() {
            chunks.push(std::mem::take(&mut remaining));
            break;
        }

        let cut = balanced_cut(&remaining[..head_end], limit);
        let (piece, rest) = remaining.split_at(cut.at);
        trace!(piece_bytes = piece.len(), "Emitting chunk");
        chunks.push(format!("{piece}{}{TRUNCATION_MARKER}", cut.closing));
        remaining = format!("{}{rest}", cut.reopen);
    }

    if !remaining.is_empty() {
        debug!(
            dropped_chars = remaining.chars().count(),
            "Chunk limit reached, dropping remaining text"
        );
    }

    chunks
}

/// Byte offset of the `n`-th character, or the string length if shorter
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

/// Where to cut a head, plus the markup needed to keep elements balanced
#[derive(Debug, PartialEq)]
struct Cut {
    at: usize,
    closing: String,
    reopen: String,
}

impl Cut {
    fn plain(at: usize) -> Self {
        Self {
            at,
            closing: String::new(),
            reopen: String::new(),
        }
    }
}

/// An element whose opening tag has no matching closing tag
struct OpenTag<'a> {
    start: usize,
    name: &'a str,
    markup: &'a str,
}

/// Cut `head` so that no chunk ends inside an element
///
/// An element opened after the start of the head is moved whole to the next
/// chunk. An element opened at the very start is longer than a chunk, so it is
/// closed at the cut and reopened at the start of the next chunk.
fn balanced_cut(head: &str, limit: usize) -> Cut {
    let at = find_cut(head, limit);
    let open = open_tags(&head[..at]);
    let Some(outer) = open.first() else {
        return Cut::plain(at);
    };
    if outer.start > 0 {
        return Cut::plain(outer.start);
    }

    // Leave room for the closing tags within the limit
    let reserve: usize = open.iter().map(|tag| tag.name.chars().count() + 3).sum();
    let budget = limit.saturating_sub(reserve);
    let shrunk = find_cut(&head[..byte_offset(head, budget)], budget);
    let open = open_tags(&head[..shrunk]);
    let reopen: String = open.iter().map(|tag| tag.markup).collect();
    if open.is_empty() || shrunk <= reopen.len() {
        // Too small to hold any content besides the tags
        return Cut::plain(at);
    }

    let closing = open
        .iter()
        .rev()
        .map(|tag| format!("</{}>", tag.name))
        .collect();
    Cut {
        at: shrunk,
        closing,
        reopen,
    }
}

/// Elements left open at the end of `text`, outermost first
fn open_tags(text: &str) -> Vec<OpenTag<'_>> {
    let mut stack: Vec<OpenTag<'_>> = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('<') {
        let start = pos + offset;
        let Some(len) = text[start..].find('>') else {
            break;
        };
        let end = start + len + 1;
        let body = &text[start + 1..end - 1];

        if let Some(name) = body.strip_prefix('/') {
            if stack.last().is_some_and(|tag| tag.name == name.trim()) {
                stack.pop();
            }
        } else {
            let name = body.split_whitespace().next().unwrap_or("");
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()) {
                stack.push(OpenTag {
                    start,
                    name,
                    markup: &text[start..end],
                });
            }
        }
        pos = end;
    }

    stack
}

/// Pick the byte position at which `head` should be cut
fn find_cut(head: &str, limit: usize) -> usize {
    let window_start = limit.saturating_sub(LINE_BREAK_WINDOW);

    if let Some(pos) = head.rfind('\n') {
        if pos > 0 && head[..pos].chars().count() >= window_start {
            return pos;
        }
    }

    hard_cut(head)
}

/// Cut at the end of `head`, stepping back before a trailing unterminated
/// entity or tag
fn hard_cut(head: &str) -> usize {
    let mut cut = head.len();

    for (open, close) in [('<', '>'), ('&', ';')] {
        if let Some(start) = head.rfind(open) {
            let unterminated = !head[start..].contains(close);
            if unterminated && start > 0 && head.len() - start <= MARKUP_LOOKBACK {
                cut = cut.min(start);
            }
        }
    }

    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_replaces_ampersand_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        assert_eq!(escape_html("a<b>c"), "a&lt;b&gt;c");
    }

    #[test]
    fn test_escape_leaves_plain_text() {
        assert_eq!(escape_html("john.doe@example.com"), "john.doe@example.com");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_byte_offset_counts_chars() {
        assert_eq!(byte_offset("ééé", 2), 4);
        assert_eq!(byte_offset("abc", 10), 3);
    }

    #[test]
    fn test_line_break_outside_window_is_ignored() {
        // Break at char 10 of a 1000-char window is too early to be used
        let head = format!("{}\n{}", "a".repeat(10), "b".repeat(989));
        assert_eq!(find_cut(&head, 1000), head.len());
    }

    #[test]
    fn test_line_break_at_window_start_is_used() {
        let head = format!("{}\n{}", "a".repeat(500), "b".repeat(499));
        assert_eq!(find_cut(&head, 1000), 500);
    }

    #[test]
    fn test_hard_cut_steps_back_over_entity() {
        let head = format!("{}&am", "a".repeat(20));
        assert_eq!(hard_cut(&head), 20);
    }

    #[test]
    fn test_hard_cut_steps_back_over_tag() {
        let head = format!("{}</", "a".repeat(20));
        assert_eq!(hard_cut(&head), 20);
    }

    #[test]
    fn test_hard_cut_keeps_terminated_markup() {
        let head = format!("{}&amp;", "a".repeat(20));
        assert_eq!(hard_cut(&head), head.len());
    }

    #[test]
    fn test_open_tags_tracks_unclosed_elements() {
        let open = open_tags("<b>db</b>\n<b>col");
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].start, 10);
        assert_eq!(open[0].markup, "<b>");
        assert!(open_tags("<b>a</b> & <> x").is_empty());
    }

    #[test]
    fn test_element_after_start_moves_to_next_chunk() {
        let head = format!("{}<b>name", "a".repeat(20));
        assert_eq!(balanced_cut(&head, 27), Cut::plain(20));
    }

    #[test]
    fn test_long_element_is_closed_and_reopened() {
        let block = format!("<b>{}</b>", "x".repeat(40));
        let chunks = chunk_text(&block, 20);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            let piece = chunk.strip_suffix(TRUNCATION_MARKER).unwrap_or(chunk);
            assert!(piece.chars().count() <= 20);
            assert!(piece.starts_with("<b>"));
            assert!(piece.ends_with("</b>"));
            assert!(open_tags(piece).is_empty());
        }
        let content: String = chunks
            .iter()
            .map(|chunk| chunk.strip_suffix(TRUNCATION_MARKER).unwrap_or(chunk))
            .map(|piece| piece.trim_start_matches("<b>").trim_end_matches("</b>"))
            .collect();
        assert_eq!(content, "x".repeat(40));
    }

    #[test]
    fn test_chunk_never_splits_multibyte_chars() {
        let text = "я".repeat(25);
        let chunks = chunk_text(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], format!("{}{}", "я".repeat(10), TRUNCATION_MARKER));
        assert_eq!(chunks[2], "я".repeat(5));
    }
}
