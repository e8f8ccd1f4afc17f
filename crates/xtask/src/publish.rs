//! Copying the built executable to its published location

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Mapped network drive the operators run the tool from
pub const DEFAULT_DESTINATION: &str = "Y:/main";

/// Replace `dest` with the executable staged in `dist`
pub fn publish(dist: &Path, executable: &str, dest: &Path) -> Result<PathBuf> {
    let source = dist.join(executable);
    if !source.is_file() {
        bail!(
            "No built executable at {}; run `cargo xtask build` first",
            source.display()
        );
    }

    if fs::symlink_metadata(dest).is_ok() {
        fs::remove_file(dest)
            .with_context(|| format!("Failed to remove previous {}", dest.display()))?;
        println!("removed '{}'", dest.display());
    }

    fs::copy(&source, dest)
        .with_context(|| format!("Failed to copy {} to {}", source.display(), dest.display()))?;
    println!("'{}' -> '{}'", source.display(), dest.display());

    Ok(source)
}
