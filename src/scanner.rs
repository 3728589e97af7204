use crate::{
    config::Config,
    error::{Error, Result},
    section::INDEX_FILE,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Discovers sections and notes below the content root.
///
/// Traversal is sorted by file name so runs are reproducible. Entries whose
/// name starts with `.` (such as `.obsidian`) are skipped with their
/// subtrees.
pub(crate) struct Scanner {
    root_dir: PathBuf,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            root_dir: config.content_dir.clone(),
        }
    }

    /// Returns every directory below the root, excluding the root itself.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read.
    pub(crate) fn sections(&self) -> Result<Vec<PathBuf>> {
        let sections = self.walk(|entry| entry.file_type().is_dir() && entry.depth() > 0)?;
        debug!("Found {} sections under {}", sections.len(), self.root_dir.display());
        Ok(sections)
    }

    /// Returns every Markdown note, excluding `_index.md` files.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read.
    pub(crate) fn notes(&self) -> Result<Vec<PathBuf>> {
        let notes = self.walk(|entry| {
            entry.file_type().is_file() && is_markdown(entry.path()) && entry.file_name() != INDEX_FILE
        })?;
        debug!("Found {} notes under {}", notes.len(), self.root_dir.display());
        Ok(notes)
    }

    fn walk<F>(&self, mut keep: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&DirEntry) -> bool,
    {
        let mut paths = Vec::new();
        let walker = WalkDir::new(&self.root_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|e| Error::walk(&self.root_dir, &e))?;
            if keep(&entry) {
                trace!("Selected {}", entry.path().display());
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn scanner_for(root: &Path) -> Scanner {
        Scanner {
            root_dir: root.to_path_buf(),
        }
    }

    #[test]
    fn test_sections_exclude_root() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a/b/note.md").write_str("x").unwrap();
        temp.child("c").create_dir_all().unwrap();

        let sections = scanner_for(temp.path()).sections().unwrap();

        assert_eq!(
            sections,
            vec![temp.path().join("a"), temp.path().join("a/b"), temp.path().join("c")]
        );
    }

    #[test]
    fn test_notes_skip_index_and_other_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("top.md").write_str("x").unwrap();
        temp.child("dir/_index.md").write_str("x").unwrap();
        temp.child("dir/inner.md").write_str("x").unwrap();
        temp.child("dir/image.png").write_binary(&[1, 2, 3]).unwrap();

        let notes = scanner_for(temp.path()).notes().unwrap();

        assert_eq!(notes, vec![temp.path().join("dir/inner.md"), temp.path().join("top.md")]);
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".obsidian/workspace.md").write_str("x").unwrap();
        temp.child(".draft.md").write_str("x").unwrap();
        temp.child("visible.md").write_str("x").unwrap();

        let scanner = scanner_for(temp.path());

        assert!(scanner.sections().unwrap().is_empty());
        assert_eq!(scanner.notes().unwrap(), vec![temp.path().join("visible.md")]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let scanner = scanner_for(&temp.path().join("missing"));

        assert!(scanner.notes().is_err());
    }
}
