//! Frontmatter removal and synthesis.
//!
//! Notes arrive with whatever metadata Obsidian wrote and leave with a block
//! generated from scratch; fields are never merged.

use crate::env::SortBy;
use chrono::{DateTime, Local};

/// Line prefix that opens and closes a frontmatter block.
pub(crate) const MARKER: &str = "---";

/// Template assigned to regular pages.
pub(crate) const PAGE_TEMPLATE: &str = "page.html";

/// Template assigned to section indexes.
pub(crate) const SECTION_TEMPLATE: &str = "section.html";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns the lines following a leading frontmatter block.
///
/// The block opens on a first line starting with `---` and closes on the
/// next such line. Without a closing line the input is returned unchanged.
///
/// # Examples
///
/// ```
/// use obsidian_zola::remove_frontmatter;
///
/// let lines = ["---", "tags: [a]", "---", "Body"].map(String::from);
/// assert_eq!(remove_frontmatter(&lines), ["Body"]);
///
/// let open = ["---", "tags: [a]", "Body"].map(String::from);
/// assert_eq!(remove_frontmatter(&open), open);
/// ```
#[must_use]
pub fn remove_frontmatter(lines: &[String]) -> &[String] {
    let Some(first) = lines.first() else {
        return lines;
    };
    if !first.starts_with(MARKER) {
        return lines;
    }

    lines[1..]
        .iter()
        .position(|line| line.starts_with(MARKER))
        .map_or(lines, |end| &lines[end + 2..])
}

/// Derives a page title from a file stem.
///
/// Words are separated by single spaces. A word that already starts with an
/// uppercase letter is kept as written; any other word is title-cased.
///
/// # Examples
///
/// ```
/// use obsidian_zola::derive_title;
///
/// assert_eq!(derive_title("my notes"), "My Notes");
/// assert_eq!(derive_title("NASA report"), "NASA Report");
/// ```
#[must_use]
pub fn derive_title(stem: &str) -> String {
    stem.split(' ')
        .map(|word| {
            if word.chars().next().is_some_and(char::is_uppercase) {
                word.to_string()
            } else {
                title_case(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_run = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if in_run {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Frontmatter written at the top of every converted note.
#[derive(Debug, Clone)]
pub struct PageFrontmatter {
    /// Page title
    pub title: String,
    /// Used for both `date` and `updated`
    pub modified: DateTime<Local>,
    /// `None` for notes promoted to a section index
    pub template: Option<&'static str>,
}

impl PageFrontmatter {
    /// Frontmatter for a regular page.
    #[must_use]
    pub fn page(title: impl Into<String>, modified: DateTime<Local>) -> Self {
        Self {
            title: title.into(),
            modified,
            template: Some(PAGE_TEMPLATE),
        }
    }

    /// Frontmatter for a note that becomes its directory's `_index.md`.
    #[must_use]
    pub fn section_index(title: impl Into<String>, modified: DateTime<Local>) -> Self {
        Self {
            template: None,
            ..Self::page(title, modified)
        }
    }

    /// The block's lines, markers included.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let stamp = self.modified.format(DATE_FORMAT).to_string();
        let mut lines = vec![
            MARKER.to_string(),
            format!("title: {}", self.title),
            format!("date: {stamp}"),
            format!("updated: {stamp}"),
        ];
        if let Some(template) = self.template {
            lines.push(format!("template: {template}"));
        }
        lines.push(MARKER.to_string());
        lines
    }

    /// Prepends the block to `body`.
    #[must_use]
    pub fn render(&self, body: &str) -> String {
        let mut lines = self.lines();
        lines.push(body.to_string());
        lines.join("\n")
    }
}

/// Frontmatter of a generated section index.
#[derive(Debug, Clone)]
pub struct SectionFrontmatter {
    /// Section path relative to the content root
    pub title: String,
    /// Page ordering within the section
    pub sort_by: SortBy,
}

impl SectionFrontmatter {
    /// The block's lines, markers included.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            MARKER.to_string(),
            format!("title: {}", self.title),
            format!("template: {SECTION_TEMPLATE}"),
            format!("sort_by: {}", self.sort_by),
            MARKER.to_string(),
        ]
    }

    /// Prepends the block to `body`; an empty body adds no lines.
    #[must_use]
    pub fn render(&self, body: &str) -> String {
        let mut lines = self.lines();
        if !body.is_empty() {
            lines.push(body.to_string());
        }
        lines.join("\n")
    }
}
