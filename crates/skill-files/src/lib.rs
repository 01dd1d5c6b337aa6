//! Filesystem capability for skill deployment.
//!
//! Components that scan and copy skills take any [`FileSystem`]
//! implementation, so they run unchanged against the real disk
//! ([`DiskFs`]) or an in-memory tree ([`MemoryFs`]).
//!
//! # Examples
//!
//! ```
//! use skill_deploy_files::{FileSystem, MemoryFs};
//! use std::path::Path;
//!
//! let fs = MemoryFs::new();
//! fs.add_file("skills/pdf/SKILL.md", "---\nname: pdf\n---\n").unwrap();
//! fs.add_file("skills/pdf/scripts/merge.sh", "#!/bin/sh\n").unwrap();
//!
//! let copied = fs
//!     .copy_tree(Path::new("skills/pdf"), Path::new("deployed/pdf"))
//!     .unwrap();
//! assert_eq!(copied, 2);
//! assert!(fs.is_file(Path::new("deployed/pdf/scripts/merge.sh")));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod disk;
mod error;
mod filesystem;
mod memory;
mod path;

pub use disk::DiskFs;
pub use error::{FilesError, Result};
pub use filesystem::{DirEntry, FileSystem};
pub use memory::MemoryFs;
pub use path::{FilePath, to_slash};
