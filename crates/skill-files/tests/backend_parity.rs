//! Disk and memory backends must behave the same for the operations the
//! deployer relies on.

use skill_deploy_files::{DiskFs, FileSystem, MemoryFs};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn exercise(fs: &dyn FileSystem, base: &Path) {
    let skill = base.join("skills/pdf");
    fs.write(&skill.join("SKILL.md"), b"---\nname: pdf\n---\n")
        .unwrap();
    fs.write(&skill.join("scripts/merge.sh"), b"#!/bin/sh\n")
        .unwrap();
    fs.write(&skill.join("templates/a/b.md"), b"# B\n").unwrap();

    let names: Vec<String> = fs
        .list_dir(&skill)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["SKILL.md", "scripts", "templates"]);

    let deploy = base.join("deployed/pdf");
    fs.create_dir_all(&deploy).unwrap();
    fs.copy_file(&skill.join("SKILL.md"), &deploy.join("SKILL.md"))
        .unwrap();
    assert_eq!(
        fs.copy_tree(&skill.join("templates"), &deploy.join("templates"))
            .unwrap(),
        1
    );

    assert_eq!(
        fs.walk_files(&deploy).unwrap(),
        vec![PathBuf::from("SKILL.md"), PathBuf::from("templates/a/b.md")]
    );

    fs.remove_dir_all(&deploy).unwrap();
    assert!(!fs.exists(&deploy));
    assert!(fs.is_dir(&base.join("deployed")));
    assert!(fs.read(&deploy.join("SKILL.md")).unwrap_err().is_not_found());
}

#[test]
fn test_disk_backend() {
    let temp = TempDir::new().unwrap();
    exercise(&DiskFs, temp.path());
}

#[test]
fn test_memory_backend_relative() {
    exercise(&MemoryFs::new(), Path::new("work"));
}

#[test]
fn test_memory_backend_absolute() {
    exercise(&MemoryFs::new(), Path::new("/srv/work"));
}
