//! Log setup shared by the dirforge binaries
//!
//! Lines go both to a log file and to stderr, so an operator who never looks
//! at a terminal still has a record of the run.

use chrono::Local;
use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{DirforgeError, DirforgeResult};

/// Log file written in the working directory when none is given
pub const DEFAULT_LOG_FILE: &str = "debug.log";

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// `None` logs to stderr only
    pub log_file: Option<PathBuf>,
    pub level: LevelFilter,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            level: LevelFilter::Info,
        }
    }
}

/// Writes every buffer to both inner writers
pub struct Tee<A: Write, B: Write> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// `2024-05-01 09:30:00,123 [INFO] message`
pub fn format_line(timestamp: &str, level: Level, message: &dyn std::fmt::Display) -> String {
    format!("{} [{}] {}", timestamp, level_name(level), message)
}

fn open_log_file(path: &Path) -> DirforgeResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DirforgeError::filesystem(path, e))
}

/// Install the global logger. `RUST_LOG` is read first, then `level` applies.
pub fn init_logging(options: &LogOptions) -> DirforgeResult<()> {
    let target: Box<dyn Write + Send> = match &options.log_file {
        Some(path) => Box::new(Tee::new(open_log_file(path)?, io::stderr())),
        None => Box::new(io::stderr()),
    };

    Builder::from_default_env()
        .filter_level(options.level)
        .format(|buf, record| {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f").to_string();
            writeln!(buf, "{}", format_line(&timestamp, record.level(), record.args()))
        })
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(target))
        .try_init()
        .map_err(|e| DirforgeError::logging(e.to_string()))
}
