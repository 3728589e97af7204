use crate::error::{Error, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

const HEADER_WIDTH: usize = 100;

/// Prints a progress header centered in a line of dashes.
pub(crate) fn print_step(message: &str) {
    println!("{}", step_header(message));
}

fn step_header(message: &str) -> String {
    format!("{message:-^width$}", width = HEADER_WIDTH)
}

/// Writes converted files in place, replacing each target atomically.
pub(crate) struct Writer {
    echo: bool,
}

impl Writer {
    /// Creates a writer; with `echo` set, every written file is printed to
    /// stdout under a header naming its path.
    pub(crate) const fn new(echo: bool) -> Self {
        Self { echo }
    }

    /// Replaces the content of `path` with `content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    pub(crate) fn write(&self, path: &Path, content: &str) -> Result<()> {
        write_file_atomic(path, content)?;
        debug!("Wrote {} ({} bytes)", path.display(), content.len());
        self.echo(path, content);
        Ok(())
    }

    /// Writes `content` to `to` and removes `from`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the removal fails.
    pub(crate) fn replace(&self, from: &Path, to: &Path, content: &str) -> Result<()> {
        self.write(to, content)?;
        fs::remove_file(from).map_err(|e| Error::io(from, e))?;
        debug!("Moved {} to {}", from.display(), to.display());
        Ok(())
    }

    fn echo(&self, path: &Path, content: &str) {
        if self.echo {
            print_step(&path.display().to_string());
            println!("{content}");
        }
    }
}

/// Writes a file atomically.
///
/// # Process
///
/// 1. Writes content to a sibling `<name>.tmp` file
/// 2. Syncs the temporary file to disk
/// 3. Renames the temporary file over the target path
fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path)?;
    let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    drop(temp_file);

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    Ok(())
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let filename = path
        .file_name()
        .ok_or_else(|| Error::config(format!("Invalid file path: {}", path.display())))?
        .to_string_lossy();

    Ok(path.with_file_name(format!("{filename}.tmp")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_write_replaces_content() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("note.md");
        file.write_str("old content").unwrap();

        Writer::new(false).write(file.path(), "new content").unwrap();

        assert_eq!(fs::read_to_string(file.path()).unwrap(), "new content");
        assert!(!temp.child("note.md.tmp").exists());
    }

    #[test]
    fn test_write_creates_missing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("section/_index.md");
        temp.child("section").create_dir_all().unwrap();

        Writer::new(false).write(file.path(), "---\n---").unwrap();

        assert_eq!(fs::read_to_string(file.path()).unwrap(), "---\n---");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp = assert_fs::TempDir::new().unwrap();
        let result = Writer::new(false).write(&temp.path().join("nope/file.md"), "x");

        assert!(result.unwrap_err().is_io());
    }

    #[test]
    fn test_replace_moves_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let from = temp.child("dir/📇 Index.md");
        let to = temp.child("dir/_index.md");
        from.write_str("source").unwrap();
        to.write_str("generated").unwrap();

        Writer::new(false)
            .replace(from.path(), to.path(), "converted")
            .unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(to.path()).unwrap(), "converted");
    }

    #[test]
    fn test_step_header_is_centered() {
        let header = step_header("STEP");
        assert_eq!(header.chars().count(), 100);
        assert_eq!(header, format!("{}STEP{}", "-".repeat(48), "-".repeat(48)));
    }

    #[test]
    fn test_temp_path_for_root_is_error() {
        assert!(temp_path_for(Path::new("/")).is_err());
    }
}
