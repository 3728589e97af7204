//! KaTeX compatibility fixes for display math.

use once_cell::sync::Lazy;
use regex::Regex;

static DISPLAYLINES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(\s*\$\$)\s*\\displaylines\s*\{(.*?)\}(\s*\$\$)").unwrap()
});

// obsidian-export escapes the first backslash of a command at line start.
static ESCAPED_COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\\\\([A-Za-z])").unwrap());

/// Rewrites math so it renders after Zola's own unescaping pass.
///
/// 1. `$$\displaylines{X}$$` becomes `$$X$$`.
/// 2. A line starting with `\\` plus a letter loses one backslash (and its
///    indentation).
/// 3. Every remaining `\\` is doubled.
///
/// # Examples
///
/// ```
/// use obsidian_zola::fix_math;
///
/// assert_eq!(fix_math(r"$$\displaylines{a=b}$$"), "$$a=b$$");
/// assert_eq!(fix_math(r"$$a \\ b$$"), r"$$a \\\\ b$$");
/// ```
#[must_use]
pub fn fix_math(text: &str) -> String {
    let unwrapped = DISPLAYLINES_RE.replace_all(text, "${1}${2}${3}");

    unwrapped
        .split('\n')
        .map(|line| {
            let line = ESCAPED_COMMAND_RE.replace(line, r"\${1}");
            line.replace(r"\\", r"\\\\")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
