//! Adaptive pacing delays
//!
//! The delay is a hint for the streaming consumer: how long to wait before
//! painting the next chunk so that pauses line up with reading pauses.

use crate::config::ResolvedOptions;
use crate::domain::chars::{char_len, ends_with_double_terminal, ends_with_ellipsis};
use crate::domain::classifier::{is_list_item, is_markdown_heading};
use crate::domain::splitter::split_spans;

/// Extra delay after a heading
const HEADING_EXTRA_MS: u64 = 10;

/// Extra delay after an emphatic or trailing-off sentence end
const STRONG_END_EXTRA_MS: u64 = 20;

/// Extra delay after a list item or a colon
const LIST_EXTRA_MS: u64 = 10;

/// Delay in milliseconds suggested for the end of `text`.
pub fn calculate_adaptive_delay(text: &str, opts: &ResolvedOptions) -> u64 {
    let last = split_spans(text)
        .last()
        .map(|span| span.as_str(text))
        .unwrap_or_default();

    let half_end = opts.sentence_end_delay_ms / 2;
    let delay = if is_markdown_heading(last) {
        opts.base_delay_ms.saturating_add(HEADING_EXTRA_MS)
    } else if ends_with_double_terminal(last) || ends_with_ellipsis(last) {
        half_end.saturating_add(STRONG_END_EXTRA_MS)
    } else if is_list_item(last) || last.ends_with([':', '：']) {
        half_end.saturating_add(LIST_EXTRA_MS)
    } else {
        (char_len(last) as u64).min(half_end)
    };

    delay.max(opts.base_delay_ms / 2)
}
