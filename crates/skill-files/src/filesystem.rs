//! The filesystem capability used by scanners and deployers.

use crate::error::{FilesError, Result};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// One entry returned by [`FileSystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File or directory name (last path component)
    pub name: String,
    /// Full path of the entry
    pub path: PathBuf,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// File operations needed to scan and deploy skills.
///
/// [`DiskFs`](crate::DiskFs) talks to the real filesystem,
/// [`MemoryFs`](crate::MemoryFs) keeps everything in memory for tests.
pub trait FileSystem: Debug + Send + Sync {
    /// Reads a whole file.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::FileNotFound`] if the file is missing.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Writes a file, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or a parent cannot be created.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Returns `true` if a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Creates a directory and all missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if a component exists as a file or creation fails.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Removes a directory and everything below it.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is missing or not a directory.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Lists the immediate children of a directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is missing or not a directory.
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Lists every file below `root`, relative to it, sorted.
    ///
    /// Symbolic links count as the file or directory they point to.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing or not a directory.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Reads a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidUtf8`] if the bytes are not UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String> {
        String::from_utf8(self.read(path)?).map_err(|_| FilesError::InvalidUtf8 {
            path: path.display().to_string(),
        })
    }

    /// Copies one file, creating missing parent directories of `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` cannot be read or `to` cannot be written.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        let bytes = self.read(from)?;
        self.write(to, &bytes)
    }

    /// Copies every file below `from` into `to`, merging with existing
    /// content, and returns the number of files copied.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is not a directory or a copy fails.
    fn copy_tree(&self, from: &Path, to: &Path) -> Result<usize> {
        let files = self.walk_files(from)?;
        self.create_dir_all(to)?;
        for relative in &files {
            self.copy_file(&from.join(relative), &to.join(relative))?;
        }
        Ok(files.len())
    }
}
