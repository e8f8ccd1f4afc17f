//! One-file release build into `dist/`

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::workspace::{cargo_target_dir, dist_dir, executable_name, CLI_PACKAGE};

/// Build the release executable and stage it as the only file in `dist/`
pub async fn build(root: &Path) -> Result<PathBuf> {
    info!("Building {} in release mode...", CLI_PACKAGE);

    let cargo = std::env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo"));
    let mut cmd = Command::new(cargo);
    cmd.current_dir(root)
        .args(["build", "--release", "--package", CLI_PACKAGE, "--bin", "dirforge"]);

    debug!("Executing cargo command: {:?}", cmd);
    let status = cmd
        .status()
        .await
        .context("Failed to execute cargo")?;
    if !status.success() {
        bail!("cargo build failed ({})", status);
    }

    let built = cargo_target_dir(root).join("release").join(executable_name());
    stage_executable(&built, &dist_dir(root))
}

/// Copy a built executable into `dist`, creating the directory if needed
pub fn stage_executable(built: &Path, dist: &Path) -> Result<PathBuf> {
    if !built.is_file() {
        bail!("Expected build output at {} but nothing is there", built.display());
    }

    fs::create_dir_all(dist)
        .with_context(|| format!("Failed to create {}", dist.display()))?;

    let file_name = built
        .file_name()
        .with_context(|| format!("{} has no file name", built.display()))?;
    let staged = dist.join(file_name);
    fs::copy(built, &staged)
        .with_context(|| format!("Failed to copy {} to {}", built.display(), staged.display()))?;

    println!("'{}' -> '{}'", built.display(), staged.display());
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stage_creates_single_file_dist() {
        let tmp = TempDir::new().unwrap();
        let built = tmp.path().join("target/release").join(executable_name());
        fs::create_dir_all(built.parent().unwrap()).unwrap();
        fs::write(&built, b"binary").unwrap();

        let dist = tmp.path().join("dist");
        let staged = stage_executable(&built, &dist).unwrap();

        assert_eq!(staged, dist.join(executable_name()));
        assert_eq!(fs::read(&staged).unwrap(), b"binary");
        assert_eq!(fs::read_dir(&dist).unwrap().count(), 1);
    }

    #[test]
    fn test_stage_fails_without_build_output() {
        let tmp = TempDir::new().unwrap();
        let err = stage_executable(&tmp.path().join("missing"), &tmp.path().join("dist")).unwrap_err();

        assert!(err.to_string().contains("nothing is there"));
        assert!(!tmp.path().join("dist").exists());
    }
}
