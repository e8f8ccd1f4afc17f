//! Removal of build and test artifacts

use anyhow::{Context, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Artifact directories removed from the workspace root
pub const ARTIFACT_DIRS: [&str; 3] = ["dist", "build", "test"];

/// Leftover packaging spec files in the workspace root
pub const SPEC_FILE_PATTERN: &str = "*.spec";

/// Forcibly remove every artifact under `root`, printing each removed path.
///
/// Nothing to remove is not an error.
pub fn clean(root: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for name in ARTIFACT_DIRS {
        let path = root.join(name);
        if fs::symlink_metadata(&path).is_ok() {
            remove_tree(&path, &mut removed)?;
        }
    }

    let pattern = Pattern::new(SPEC_FILE_PATTERN).context("Invalid spec file pattern")?;
    let mut spec_files = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("Failed to list {}", root.display()))? {
        let entry = entry.with_context(|| format!("Failed to list {}", root.display()))?;
        // Lossy conversion only touches invalid bytes, the suffix survives
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            spec_files.push(entry.path());
        }
    }
    spec_files.sort();

    for path in spec_files {
        if path.is_dir() {
            remove_tree(&path, &mut removed)?;
        } else {
            remove_file(&path, &mut removed)?;
        }
    }

    Ok(removed)
}

fn remove_tree(path: &Path, removed: &mut Vec<PathBuf>) -> Result<()> {
    for entry in WalkDir::new(path).follow_root_links(false).contents_first(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
                .with_context(|| format!("Failed to remove directory {}", entry.path().display()))?;
            println!("removed directory '{}'", entry.path().display());
            removed.push(entry.path().to_path_buf());
        } else {
            remove_file(entry.path(), removed)?;
        }
    }
    Ok(())
}

fn remove_file(path: &Path, removed: &mut Vec<PathBuf>) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    println!("removed '{}'", path.display());
    removed.push(path.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_removes_all_artifacts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("dist/dirforge"), b"bin").unwrap();
        fs::create_dir_all(root.join("build/deep/er")).unwrap();
        fs::create_dir_all(root.join("test/target")).unwrap();
        fs::write(root.join("main.spec"), "").unwrap();
        fs::write(root.join("other.spec"), "").unwrap();
        fs::write(root.join("keep.txt"), "").unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/nested.spec"), "").unwrap();

        let removed = clean(root).unwrap();

        for gone in ["dist", "build", "test", "main.spec", "other.spec"] {
            assert!(!root.join(gone).exists(), "{} should be removed", gone);
        }
        assert!(root.join("keep.txt").exists());
        // Only the workspace root is matched for spec files
        assert!(root.join("src/nested.spec").exists());
        assert!(removed.contains(&root.join("dist/dirforge")));
        assert!(removed.contains(&root.join("build/deep/er")));
    }

    #[cfg(unix)]
    #[test]
    fn test_spec_files_under_non_utf8_root() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(OsStr::from_bytes(b"ws\xfe"));
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("main.spec"), "").unwrap();
        let odd_name = root.join(OsStr::from_bytes(b"odd\xff.spec"));
        fs::write(&odd_name, "").unwrap();
        fs::write(root.join("Cargo.toml"), "").unwrap();

        let removed = clean(&root).unwrap();

        assert!(!root.join("main.spec").exists());
        assert!(!odd_name.exists());
        assert!(root.join("Cargo.toml").exists());
        assert_eq!(removed.len(), 2);
    }

    #[test]
    fn test_clean_is_a_no_op_when_nothing_exists() {
        let tmp = TempDir::new().unwrap();
        let removed = clean(tmp.path()).unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn test_clean_twice() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("dist")).unwrap();

        assert_eq!(clean(tmp.path()).unwrap().len(), 1);
        assert!(clean(tmp.path()).unwrap().is_empty());
    }
}
