//! Obsidian comment removal.

use once_cell::sync::Lazy;
use regex::Regex;

// Whitespace before the opening marker goes with the comment.
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\s*%%.*?%%").unwrap());

/// Removes every `%% ... %%` span from `text`, including spans that cross
/// line boundaries.
///
/// Matching is non-greedy: each opening marker closes at the next `%%`.
/// A lone marker without a partner is left in place.
///
/// # Examples
///
/// ```
/// use obsidian_zola::strip_comments;
///
/// assert_eq!(strip_comments("keep %% drop %% this"), "keep this");
/// assert_eq!(strip_comments("100%% sure"), "100%% sure");
/// ```
#[must_use]
pub fn strip_comments(text: &str) -> String {
    COMMENT_RE.replace_all(text, "").into_owned()
}
