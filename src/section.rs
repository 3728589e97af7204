//! Section index generation.
//!
//! Every directory of the content tree becomes a Zola section with an
//! `_index.md`. Hand-written content below an existing index's frontmatter
//! is carried over; the frontmatter itself is always regenerated.

use crate::{
    comments::strip_comments,
    env::SortBy,
    error::Result,
    frontmatter::{SectionFrontmatter, remove_frontmatter},
    note::read_lines,
    writer::Writer,
};
use std::path::{Component, Path};
use tracing::debug;

/// File name of a section index.
pub const INDEX_FILE: &str = "_index.md";

/// Writes `_index.md` files for the sections of one content tree.
pub(crate) struct SectionIndexer<'a> {
    root_dir: &'a Path,
    sort_by: SortBy,
    writer: &'a Writer,
}

impl<'a> SectionIndexer<'a> {
    pub(crate) const fn new(root_dir: &'a Path, sort_by: SortBy, writer: &'a Writer) -> Self {
        Self {
            root_dir,
            sort_by,
            writer,
        }
    }

    /// Regenerates the index of `section`. Returns `false` for the root,
    /// which is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing index cannot be read or the new one
    /// cannot be written.
    pub(crate) fn generate(&self, section: &Path) -> Result<bool> {
        let title = section_title(self.root_dir, section);
        if title.is_empty() {
            return Ok(false);
        }

        let index_path = section.join(INDEX_FILE);
        let body = if index_path.exists() {
            let lines = read_lines(&index_path)?;
            strip_comments(&remove_frontmatter(&lines).join("\n"))
        } else {
            String::new()
        };

        let content = self.render(title, &body);
        debug!("Generating section index {}", index_path.display());
        self.writer.write(&index_path, &content)?;
        Ok(true)
    }

    /// Index content for a section titled `title` with the preserved `body`.
    pub(crate) fn render(&self, title: String, body: &str) -> String {
        SectionFrontmatter {
            title,
            sort_by: self.sort_by,
        }
        .render(body)
    }
}

/// Section title: the path of `section` relative to `root`, `/`-separated.
/// Empty for the root itself.
#[must_use]
pub fn section_title(root: &Path, section: &Path) -> String {
    let relative = pathdiff::diff_paths(section, root).unwrap_or_else(|| section.to_path_buf());
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
