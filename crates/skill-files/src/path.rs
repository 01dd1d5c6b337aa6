//! Normalized path keys for the in-memory backend.

use crate::error::{FilesError, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A normalized, slash-separated path.
///
/// `.` components are dropped and `..` is rejected, so two spellings of the
/// same location compare equal. Relative paths stay relative; the empty
/// path stands for the current directory.
///
/// # Examples
///
/// ```
/// use skill_deploy_files::FilePath;
///
/// let path = FilePath::new("./skills//pdf/SKILL.md").unwrap();
/// assert_eq!(path.as_str(), "skills/pdf/SKILL.md");
///
/// assert!(FilePath::new("skills/../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilePath(String);

impl FilePath {
    /// Normalizes `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidPathComponent`] for `..` components and
    /// [`FilesError::InvalidPath`] for platform prefixes or non UTF-8 names.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut absolute = false;
        let mut parts: Vec<&str> = Vec::new();

        for component in path.components() {
            match component {
                Component::RootDir => absolute = true,
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(FilesError::InvalidPathComponent {
                        path: path.display().to_string(),
                    });
                }
                Component::Normal(name) => {
                    let name = name.to_str().ok_or_else(|| FilesError::InvalidPath {
                        path: path.display().to_string(),
                    })?;
                    parts.push(name);
                }
                Component::Prefix(_) => {
                    return Err(FilesError::InvalidPath {
                        path: path.display().to_string(),
                    });
                }
            }
        }

        let joined = parts.join("/");
        Ok(Self(if absolute {
            format!("/{joined}")
        } else {
            joined
        }))
    }

    /// Returns the normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the filesystem root or the current directory.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty() || self.0 == "/"
    }

    /// Parent directory, `None` for a root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rfind('/') {
            Some(0) => Self("/".to_string()),
            Some(idx) => Self(self.0[..idx].to_string()),
            None => Self(String::new()),
        })
    }

    /// Last component, empty for a root.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Strict ancestors from the nearest parent up to, excluding, the root.
    #[must_use]
    pub fn ancestors(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut current = self.parent();
        while let Some(dir) = current {
            if dir.is_root() {
                break;
            }
            current = dir.parent();
            out.push(dir);
        }
        out
    }

    /// Path of `self` relative to `dir`, if `self` lies strictly inside it.
    #[must_use]
    pub fn strip_dir(&self, dir: &Self) -> Option<&str> {
        if dir.0.is_empty() {
            return (!self.0.is_empty() && !self.0.starts_with('/')).then_some(self.0.as_str());
        }
        if dir.0 == "/" {
            return self.0.strip_prefix('/').filter(|rest| !rest.is_empty());
        }
        self.0
            .strip_prefix(dir.0.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
    }

    /// Returns `true` if `self` lies strictly inside `dir`.
    #[must_use]
    pub fn is_within(&self, dir: &Self) -> bool {
        self.strip_dir(dir).is_some()
    }

    /// Converts back to a native path.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders a relative path with `/` separators on every platform.
///
/// Used for resource lists that end up in JSON records.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
