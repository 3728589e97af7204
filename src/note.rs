use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// A Markdown note loaded from the content tree.
#[derive(Debug, Clone)]
pub(crate) struct NoteFile {
    /// Path of the note on disk
    pub path: PathBuf,

    /// File stem, used for the title and same-page link detection
    pub stem: String,

    /// Last modification time in the local time zone
    pub modified: DateTime<Local>,

    /// Content lines with trailing whitespace removed
    pub lines: Vec<String>,
}

impl NoteFile {
    /// Reads the note at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its metadata cannot be read, or if the
    /// content is not valid UTF-8.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let modified = metadata.modified().map_err(|e| Error::io(path, e))?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            stem,
            modified: DateTime::<Local>::from(modified),
            lines: read_lines(path)?,
        })
    }

    /// Returns true if this note is named like the section-index marker.
    #[must_use]
    pub(crate) fn is_index_marker(&self, marker: &str) -> bool {
        self.path
            .file_name()
            .is_some_and(|name| name.to_string_lossy() == marker)
    }

    /// Path of the `_index.md` this note is promoted to.
    #[must_use]
    pub(crate) fn section_index_path(&self) -> PathBuf {
        self.path.with_file_name(crate::section::INDEX_FILE)
    }
}

/// Reads `path` as lines with trailing whitespace trimmed.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub(crate) fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(content
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect())
}
