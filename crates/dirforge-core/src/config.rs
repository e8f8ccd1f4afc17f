//! Configuration for a dirforge run
//!
//! The configuration is a small TOML document. Every key is optional while
//! parsing so that a missing key can be reported by section and name, and
//! [`ConfigFile::resolve`] turns the raw document into validated [`Settings`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The config file {} is missing!", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Could not load {section}, value {key} from config file.")]
    MissingField {
        section: String,
        key: String,
    },

    #[error("File specified under key {section}, value {key} ({}) does not exist!", .path.display())]
    MissingPath {
        section: String,
        key: String,
        path: PathBuf,
    },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// A pair of main/nested file locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_nested: Option<String>,
}

/// The two folder names created under every nested directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubdirSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder2: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The configuration document as written on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Input CSVs listing the directories to create
    #[serde(default)]
    pub csv_pathsfiles: PathPair,

    /// Output CSVs collecting rows that could not be applied
    #[serde(default)]
    pub csv_errorfiles: PathPair,

    #[serde(default)]
    pub subdir: SubdirSection,

    /// Directory under which the tree is built
    #[serde(default)]
    pub target: TargetSection,
}

impl ConfigFile {
    /// Parse a configuration document from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse TOML: {}", e)))
    }

    /// Sample document with every key filled in, relative to the config file
    pub fn template() -> Self {
        Self {
            csv_pathsfiles: PathPair {
                path_main: Some("input/main.csv".to_string()),
                path_nested: Some("input/nested.csv".to_string()),
            },
            csv_errorfiles: PathPair {
                path_main: Some("errors/main_errors.csv".to_string()),
                path_nested: Some("errors/nested_errors.csv".to_string()),
            },
            subdir: SubdirSection {
                folder1: Some("Folder1".to_string()),
                folder2: Some("Folder2".to_string()),
            },
            target: TargetSection {
                path: Some("target".to_string()),
            },
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every key and resolve paths against `base_dir`
    pub fn resolve(&self, base_dir: &Path) -> Result<Settings, ConfigError> {
        let main_paths_csv = existing_path(
            base_dir,
            "csv_pathsfiles",
            "path_main",
            self.csv_pathsfiles.path_main.as_deref(),
        )?;
        let nested_paths_csv = existing_path(
            base_dir,
            "csv_pathsfiles",
            "path_nested",
            self.csv_pathsfiles.path_nested.as_deref(),
        )?;
        let main_error_csv = absolute(
            base_dir,
            require("csv_errorfiles", "path_main", self.csv_errorfiles.path_main.as_deref())?,
        );
        let nested_error_csv = absolute(
            base_dir,
            require("csv_errorfiles", "path_nested", self.csv_errorfiles.path_nested.as_deref())?,
        );
        let folder1 = PathBuf::from(require("subdir", "folder1", self.subdir.folder1.as_deref())?);
        let folder2 = PathBuf::from(require("subdir", "folder2", self.subdir.folder2.as_deref())?);
        let target = existing_path(base_dir, "target", "path", self.target.path.as_deref())?;

        Ok(Settings {
            main_paths_csv,
            nested_paths_csv,
            main_error_csv,
            nested_error_csv,
            folder1,
            folder2,
            target,
        })
    }
}

fn require<'a>(section: &str, key: &str, value: Option<&'a str>) -> Result<&'a str, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn absolute(base_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn existing_path(
    base_dir: &Path,
    section: &str,
    key: &str,
    value: Option<&str>,
) -> Result<PathBuf, ConfigError> {
    let path = absolute(base_dir, require(section, key, value)?);
    if path.exists() {
        Ok(path)
    } else {
        Err(ConfigError::MissingPath {
            section: section.to_string(),
            key: key.to_string(),
            path,
        })
    }
}

/// Validated configuration with absolute paths
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub main_paths_csv: PathBuf,
    pub nested_paths_csv: PathBuf,
    pub main_error_csv: PathBuf,
    pub nested_error_csv: PathBuf,
    /// Kept verbatim, joined under `<target>/<dir>`
    pub folder1: PathBuf,
    pub folder2: PathBuf,
    pub target: PathBuf,
}

impl Settings {
    /// Load and validate a config file.
    ///
    /// Relative paths inside the file are resolved against the directory the
    /// file lives in.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file {:?}: {}", path, e)))?;
        let file = ConfigFile::from_str(&content)?;

        let cwd = std::env::current_dir()
            .map_err(|e| ConfigError::IoError(format!("Failed to get current directory: {}", e)))?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
            _ => cwd,
        };

        file.resolve(&base_dir)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "main paths CSV:   {}", self.main_paths_csv.display())?;
        writeln!(f, "nested paths CSV: {}", self.nested_paths_csv.display())?;
        writeln!(f, "main error CSV:   {}", self.main_error_csv.display())?;
        writeln!(f, "nested error CSV: {}", self.nested_error_csv.display())?;
        writeln!(f, "folder1:          {}", self.folder1.display())?;
        writeln!(f, "folder2:          {}", self.folder2.display())?;
        write!(f, "target:           {}", self.target.display())
    }
}
