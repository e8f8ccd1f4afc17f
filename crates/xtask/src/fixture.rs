//! Sample test directory for trying dirforge by hand
//!
//! The generated tree mixes rows that apply cleanly with rows that end up in
//! the error files: a repeated main name, a repeated nested name, a nested row
//! without a nested name, and directories whose subfolders do not exist yet.

use anyhow::{bail, Context, Result};
use dirforge_core::ConfigFile;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub root: PathBuf,
    pub config: PathBuf,
    pub main_rows: usize,
    pub nested_rows: usize,
}

fn project_name(index: usize) -> String {
    format!("project-{:03}", index)
}

pub fn generate(dir: &Path, count: usize) -> Result<Fixture> {
    if count == 0 {
        bail!("--count must be at least 1");
    }
    if fs::symlink_metadata(dir).is_ok() {
        bail!("{} already exists; run `cargo xtask clean` first", dir.display());
    }

    let template = ConfigFile::template();
    let folder1 = template.subdir.folder1.clone().unwrap_or_default();
    let folder2 = template.subdir.folder2.clone().unwrap_or_default();
    let target = dir.join(template.target.path.as_deref().unwrap_or("target"));
    fs::create_dir_all(&target).with_context(|| format!("Failed to create {}", target.display()))?;

    let mut main_lines: Vec<String> = (1..=count).map(project_name).collect();
    main_lines.push(project_name(1));

    let mut nested_lines: Vec<String> = (1..=count)
        .map(|i| format!("{},{}", project_name(i), 2024 + (i % 3)))
        .collect();
    nested_lines.push(format!("{},2099", project_name(1)));
    nested_lines.push("orphan".to_string());

    // Even projects already carry their subfolders, odd ones do not
    for i in (2..=count).step_by(2) {
        for folder in [&folder1, &folder2] {
            let path = target.join(project_name(i)).join(folder);
            fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        }
    }

    let inputs = [
        (&template.csv_pathsfiles.path_main, &main_lines),
        (&template.csv_pathsfiles.path_nested, &nested_lines),
    ];
    for (relative, lines) in inputs {
        let relative = relative.as_deref().context("template is missing an input path")?;
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let config = dir.join(dirforge_core::DEFAULT_CONFIG_FILE);
    fs::write(&config, template.to_toml_string()?)
        .with_context(|| format!("Failed to write {}", config.display()))?;

    Ok(Fixture {
        root: dir.to_path_buf(),
        config,
        main_rows: main_lines.len(),
        nested_rows: nested_lines.len(),
    })
}
