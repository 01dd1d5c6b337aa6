//! In-memory filesystem backend.

use crate::error::{FilesError, Result};
use crate::filesystem::{DirEntry, FileSystem};
use crate::path::FilePath;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<FilePath, Vec<u8>>,
    dirs: BTreeSet<FilePath>,
}

impl Inner {
    fn is_dir(&self, path: &FilePath) -> bool {
        path.is_root() || self.dirs.contains(path)
    }

    fn add_dirs(&mut self, path: &FilePath) -> Result<()> {
        let mut chain = path.ancestors();
        if !path.is_root() {
            chain.insert(0, path.clone());
        }
        if let Some(file) = chain.iter().find(|dir| self.files.contains_key(*dir)) {
            return Err(FilesError::NotADirectory {
                path: file.to_string(),
            });
        }
        self.dirs.extend(chain);
        Ok(())
    }
}

/// [`FileSystem`] kept entirely in memory.
///
/// Clones share the same storage, so a test can hand one clone to a
/// component and inspect another afterwards.
///
/// # Examples
///
/// ```
/// use skill_deploy_files::{FileSystem, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.write(Path::new("skills/pdf/SKILL.md"), b"---").unwrap();
///
/// assert!(fs.is_dir(Path::new("skills/pdf")));
/// assert_eq!(fs.read_to_string(Path::new("skills/pdf/SKILL.md")).unwrap(), "---");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryFs {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or collides with a file.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<&Self> {
        self.write(path.as_ref(), contents.as_ref())?;
        Ok(self)
    }

    /// Number of files stored.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.lock().files.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let key = FilePath::new(path)?;
        let inner = self.lock();
        if let Some(bytes) = inner.files.get(&key) {
            return Ok(bytes.clone());
        }
        if inner.is_dir(&key) {
            return Err(FilesError::NotAFile {
                path: key.to_string(),
            });
        }
        Err(FilesError::FileNotFound {
            path: key.to_string(),
        })
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let key = FilePath::new(path)?;
        let mut inner = self.lock();
        if inner.is_dir(&key) {
            return Err(FilesError::NotAFile {
                path: key.to_string(),
            });
        }
        if let Some(parent) = key.parent() {
            inner.add_dirs(&parent)?;
        }
        inner.files.insert(key, contents.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        FilePath::new(path).is_ok_and(|key| {
            let inner = self.lock();
            inner.files.contains_key(&key) || inner.is_dir(&key)
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        FilePath::new(path).is_ok_and(|key| self.lock().is_dir(&key))
    }

    fn is_file(&self, path: &Path) -> bool {
        FilePath::new(path).is_ok_and(|key| self.lock().files.contains_key(&key))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let key = FilePath::new(path)?;
        self.lock().add_dirs(&key)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let key = FilePath::new(path)?;
        let mut inner = self.lock();
        if inner.files.contains_key(&key) {
            return Err(FilesError::NotADirectory {
                path: key.to_string(),
            });
        }
        if !inner.is_dir(&key) {
            return Err(FilesError::FileNotFound {
                path: key.to_string(),
            });
        }
        inner.files.retain(|file, _| !file.is_within(&key));
        inner.dirs.retain(|dir| dir != &key && !dir.is_within(&key));
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let key = FilePath::new(path)?;
        let inner = self.lock();
        ensure_dir(&inner, &key)?;

        let child = |candidate: &FilePath, is_dir: bool| {
            (candidate.parent().as_ref() == Some(&key)).then(|| DirEntry {
                name: candidate.file_name().to_string(),
                path: path.join(candidate.file_name()),
                is_dir,
            })
        };

        let mut entries: Vec<DirEntry> = inner
            .dirs
            .iter()
            .filter_map(|dir| child(dir, true))
            .chain(inner.files.keys().filter_map(|file| child(file, false)))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let key = FilePath::new(root)?;
        let inner = self.lock();
        ensure_dir(&inner, &key)?;

        Ok(inner
            .files
            .keys()
            .filter_map(|file| file.strip_dir(&key).map(PathBuf::from))
            .collect())
    }
}

fn ensure_dir(inner: &Inner, key: &FilePath) -> Result<()> {
    if inner.files.contains_key(key) {
        return Err(FilesError::NotADirectory {
            path: key.to_string(),
        });
    }
    if !inner.is_dir(key) {
        return Err(FilesError::FileNotFound {
            path: key.to_string(),
        });
    }
    Ok(())
}
