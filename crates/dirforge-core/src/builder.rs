//! Directory tree building from the main and nested path files
//!
//! The main file names top-level directories under the target. The nested
//! file pairs a directory name with a nested name, which is created under both
//! configured subfolders of that directory. Only the first row for a given
//! directory name is applied per file; repeats, short rows and failed
//! creations are written to that file's error CSV.

use csv::StringRecord;
use log::{info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::io::Write;
use std::path::{Component, Path};

use crate::config::Settings;
use crate::csv_io::{read_rows, ErrorSink};
use crate::error::{DirforgeError, DirforgeResult};
use crate::fsops::make_dir;

/// Counters collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub main_rows: usize,
    pub nested_rows: usize,
    pub directories_created: usize,
    pub main_errors: usize,
    pub nested_errors: usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Main rows:      {} ({} written to error file)", self.main_rows, self.main_errors)?;
        writeln!(f, "Nested rows:    {} ({} written to error file)", self.nested_rows, self.nested_errors)?;
        write!(f, "Created:        {} directories", self.directories_created)
    }
}

pub struct TreeBuilder<'a, W: Write> {
    settings: &'a Settings,
    main_seen: HashSet<String>,
    nested_seen: HashSet<String>,
    main_errors: ErrorSink<W>,
    nested_errors: ErrorSink<W>,
    report: RunReport,
}

impl<'a, W: Write> TreeBuilder<'a, W> {
    pub fn new(settings: &'a Settings, main_errors: ErrorSink<W>, nested_errors: ErrorSink<W>) -> Self {
        Self {
            settings,
            main_seen: HashSet::new(),
            nested_seen: HashSet::new(),
            main_errors,
            nested_errors,
            report: RunReport::default(),
        }
    }

    /// Apply one row of the main path file
    pub fn handle_main_row(&mut self, row: &StringRecord) -> DirforgeResult<()> {
        self.report.main_rows += 1;

        let Some(dir_name) = usable_name(row.get(0)) else {
            warn!("Main row {:?} has no usable directory name", row);
            return self.main_errors.record(row.get(0).unwrap_or_default());
        };

        if self.main_seen.insert(dir_name.to_string()) {
            let to_create = self.settings.target.join(dir_name);
            info!("Creating path: {}", to_create.display());
            self.create(&to_create, true)?;
            Ok(())
        } else {
            self.main_errors.record(dir_name)
        }
    }

    /// Apply one row of the nested path file
    pub fn handle_nested_row(&mut self, row: &StringRecord) -> DirforgeResult<()> {
        self.report.nested_rows += 1;

        let Some(dir_name) = usable_name(row.get(0)) else {
            warn!("Nested row {:?} has no usable directory name", row);
            return self.nested_errors.record(row.get(0).unwrap_or_default());
        };
        let Some(nested_name) = row.get(1) else {
            return self.nested_errors.record(dir_name);
        };
        if !nested_name.is_empty() && usable_name(Some(nested_name)).is_none() {
            warn!("Nested name {:?} for {} escapes its folder", nested_name, dir_name);
            return self.nested_errors.record(dir_name);
        }

        if !self.nested_seen.insert(dir_name.to_string()) {
            return self.nested_errors.record(dir_name);
        }

        let settings = self.settings;
        for folder in [&settings.folder1, &settings.folder2] {
            let to_create = settings.target.join(dir_name).join(folder).join(nested_name);
            info!("Creating path: {}", to_create.display());
            if !self.create(&to_create, false)? {
                self.nested_errors.record(dir_name)?;
            }
        }

        Ok(())
    }

    fn create(&mut self, path: &Path, parents: bool) -> DirforgeResult<bool> {
        let created = make_dir(path, parents).map_err(|e| DirforgeError::filesystem(path, e))?;
        if created {
            self.report.directories_created += 1;
        }
        Ok(created)
    }

    /// Flush both error files and hand back the sinks' writers with the report
    pub fn finish(self) -> DirforgeResult<(RunReport, W, W)> {
        let mut report = self.report;
        report.main_errors = self.main_errors.rows();
        report.nested_errors = self.nested_errors.rows();

        let main = self.main_errors.finish()?;
        let nested = self.nested_errors.finish()?;
        Ok((report, main, nested))
    }
}

/// A name that stays below the directory it is joined onto
fn usable_name(name: Option<&str>) -> Option<&str> {
    let name = name?;
    if name.is_empty() {
        return None;
    }
    Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
        .then_some(name)
}

/// Build the whole tree described by `settings`.
pub fn run(settings: &Settings) -> DirforgeResult<RunReport> {
    info!("Opening error CSVs...");
    let main_errors = ErrorSink::create(&settings.main_error_csv)?;
    let nested_errors = ErrorSink::create(&settings.nested_error_csv)?;

    let mut builder = TreeBuilder::new(settings, main_errors, nested_errors);

    info!("Reading main CSV...");
    read_rows(&settings.main_paths_csv, |row| builder.handle_main_row(row))?;

    info!("Reading nested CSV...");
    read_rows(&settings.nested_paths_csv, |row| builder.handle_nested_row(row))?;

    let (report, _, _) = builder.finish()?;
    info!(
        "Finished: {} directories created, {} main and {} nested error rows",
        report.directories_created, report.main_errors, report.nested_errors
    );

    Ok(report)
}
