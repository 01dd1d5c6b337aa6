//! Real filesystem backend.

use crate::error::{FilesError, Result};
use crate::filesystem::{DirEntry, FileSystem};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// [`FileSystem`] backed by `std::fs`.
///
/// # Examples
///
/// ```
/// use skill_deploy_files::{DiskFs, FileSystem};
/// # use tempfile::TempDir;
///
/// # let temp = TempDir::new().unwrap();
/// let fs = DiskFs;
/// let file = temp.path().join("nested/SKILL.md");
/// fs.write(&file, b"---\n").unwrap();
/// assert!(fs.is_file(&file));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl FileSystem for DiskFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| FilesError::from_io(path, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FilesError::from_io(parent, e))?;
        }
        fs::write(path, contents).map_err(|e| FilesError::from_io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| FilesError::from_io(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(FilesError::NotADirectory {
                path: path.display().to_string(),
            });
        }
        fs::remove_dir_all(path).map_err(|e| FilesError::from_io(path, e))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        ensure_dir(path)?;

        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| FilesError::from_io(path, e))? {
            let entry = entry.map_err(|e| FilesError::from_io(path, e))?;
            let entry_path = entry.path();
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry_path.is_dir(),
                path: entry_path,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        ensure_dir(root)?;

        // Symlinks are followed so linked resources are copied by content.
        let mut files = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if is_unreachable_link(&e) => {
                    warn!(
                        "Skipping unreachable link {}: {}",
                        e.path().unwrap_or(root).display(),
                        e
                    );
                    continue;
                }
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    return Err(FilesError::from_io(&path, e.into()));
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                debug!("Skipping special file {}", entry.path().display());
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FilesError::from_io(parent, e))?;
        }
        fs::copy(from, to).map_err(|e| FilesError::from_io(from, e))?;
        Ok(())
    }
}

/// Dangling links and link cycles are skipped; other walk errors are fatal.
fn is_unreachable_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || err
            .io_error()
            .is_some_and(|source| source.kind() == io::ErrorKind::NotFound)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(FilesError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    if !path.is_dir() {
        return Err(FilesError::NotADirectory {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = DiskFs.read(&temp.path().join("absent")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_dir_sorted() {
        let temp = TempDir::new().unwrap();
        DiskFs.write(&temp.path().join("b.txt"), b"b").unwrap();
        DiskFs.create_dir_all(&temp.path().join("a")).unwrap();

        let entries = DiskFs.list_dir(temp.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b.txt"]);
        assert!(entries[0].is_dir);
        assert!(!entries[1].is_dir);
    }

    #[test]
    fn test_list_dir_on_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f");
        DiskFs.write(&file, b"").unwrap();
        assert!(DiskFs.list_dir(&file).unwrap_err().is_not_directory());
    }

    #[test]
    fn test_walk_files_relative_and_sorted() {
        let temp = TempDir::new().unwrap();
        DiskFs.write(&temp.path().join("z.txt"), b"").unwrap();
        DiskFs.write(&temp.path().join("d/inner/a.txt"), b"").unwrap();
        DiskFs.create_dir_all(&temp.path().join("empty")).unwrap();

        let files = DiskFs.walk_files(temp.path()).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("d/inner/a.txt"), PathBuf::from("z.txt")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_files_follows_links() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared.sh");
        DiskFs.write(&shared, b"echo shared").unwrap();
        DiskFs.write(&temp.path().join("lib/real.sh"), b"").unwrap();

        let root = temp.path().join("root");
        DiskFs.create_dir_all(&root).unwrap();
        symlink(&shared, root.join("linked.sh")).unwrap();
        symlink(temp.path().join("lib"), root.join("lib")).unwrap();
        symlink(temp.path().join("absent"), root.join("dangling.sh")).unwrap();

        let files = DiskFs.walk_files(&root).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("lib/real.sh"), PathBuf::from("linked.sh")]
        );
    }

    #[test]
    fn test_copy_tree_merges() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        DiskFs.write(&src.join("one.txt"), b"1").unwrap();
        DiskFs.write(&src.join("sub/two.txt"), b"2").unwrap();
        DiskFs.write(&dst.join("kept.txt"), b"k").unwrap();

        let copied = DiskFs.copy_tree(&src, &dst).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(DiskFs.read_to_string(&dst.join("sub/two.txt")).unwrap(), "2");
        assert!(DiskFs.is_file(&dst.join("kept.txt")));
    }

    #[test]
    fn test_remove_dir_all_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f");
        DiskFs.write(&file, b"").unwrap();
        assert!(DiskFs.remove_dir_all(&file).is_err());
        assert!(file.exists());
    }
}
