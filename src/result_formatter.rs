//! # Result Formatter Module
//!
//! Renders a [`SearchResult`] as Telegram HTML blocks. Each database becomes
//! one block which is chunked to the delivery limit; the combined output is
//! capped at [`MAX_RENDERED_BLOCKS`].

use tracing::{debug, info};

use crate::search_types::{DatabaseEntry, SearchResult};
use crate::text_processing::{chunk_text, escape_html};

/// Text sent when the search matched nothing
pub const NO_RESULTS_TEXT: &str = "No results found.";

/// Maximum number of blocks rendered for one search
pub const MAX_RENDERED_BLOCKS: usize = 10;

/// Render a search result into chunked message blocks
///
/// # Arguments
///
/// * `result` - A successful search result
/// * `chunk_limit` - Maximum characters per block, excluding the truncation marker
///
/// # Examples
///
/// ```rust
/// use leakosint_bot::result_formatter::{format_search_result, NO_RESULTS_TEXT};
/// use leakosint_bot::search_types::SearchResult;
///
/// let blocks = format_search_result(&SearchResult::default(), 3500);
/// assert_eq!(blocks, vec![NO_RESULTS_TEXT.to_string()]);
/// ```
pub fn format_search_result(result: &SearchResult, chunk_limit: usize) -> Vec<String> {
    if result.is_empty() {
        return vec![NO_RESULTS_TEXT.to_string()];
    }

    let mut blocks = Vec::new();
    for entry in &result.entries {
        let rendered = render_entry(entry);
        let chunks = chunk_text(&rendered, chunk_limit);
        debug!(
            database = %entry.name,
            records = entry.records.len(),
            chunks = chunks.len(),
            "Rendered database entry"
        );
        blocks.extend(chunks);
    }

    if blocks.len() > MAX_RENDERED_BLOCKS {
        info!(
            rendered = blocks.len(),
            kept = MAX_RENDERED_BLOCKS,
            "Dropping blocks beyond the per-search limit"
        );
        blocks.truncate(MAX_RENDERED_BLOCKS);
    }

    blocks
}

/// Render one database entry as a single, unchunked HTML block
pub fn render_entry(entry: &DatabaseEntry) -> String {
    let mut lines = vec![format!("<b>{}</b>", escape_html(&entry.name))];

    if let Some(summary) = &entry.summary {
        lines.push(escape_html(summary));
    }

    for record in &entry.records {
        for (column, value) in &record.columns {
            lines.push(format!(
                "<b>{}</b>: {}",
                escape_html(column),
                escape_html(&value.to_string())
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}
