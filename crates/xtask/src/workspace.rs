use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Package that produces the shipped executable
pub const CLI_PACKAGE: &str = "dirforge-cli";

/// File name of the shipped executable on this platform
pub fn executable_name() -> String {
    format!("dirforge{}", env::consts::EXE_SUFFIX)
}

/// Directory the one-file build lands in
pub fn dist_dir(root: &Path) -> PathBuf {
    root.join("dist")
}

/// Walk up from `start` to the first Cargo.toml declaring a `[workspace]`
pub fn find_workspace_root(start: &Path) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        let manifest_path = dir.join("Cargo.toml");
        if manifest_path.exists() && declares_workspace(&manifest_path)? {
            return Ok(dir.to_path_buf());
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    bail!(
        "Could not find a workspace Cargo.toml in {} or any parent directory",
        start.display()
    )
}

fn declares_workspace(manifest_path: &Path) -> Result<bool> {
    let content = std::fs::read_to_string(manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let manifest: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

    Ok(manifest.contains_key("workspace"))
}

/// `CARGO_TARGET_DIR` if set, otherwise `<root>/target`
pub fn cargo_target_dir(root: &Path) -> PathBuf {
    match env::var_os("CARGO_TARGET_DIR") {
        Some(dir) => {
            let dir = PathBuf::from(dir);
            if dir.is_absolute() {
                dir
            } else {
                root.join(dir)
            }
        }
        None => root.join("target"),
    }
}
