//! Command-line interface for dirforge
//!
//! `dirforge` with no subcommand runs the whole build, which is what an
//! operator double-clicking the executable gets.

use clap::{Parser, Subcommand};
use dirforge_core::{
    init_logging, run, ConfigError, ConfigFile, DirforgeError, DirforgeResult, LogOptions,
    Settings, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILE,
};
use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dirforge")]
#[command(version)]
#[command(about = "Build directory trees from CSV path files")]
#[command(long_about = "Reads a main and a nested CSV path file and creates the listed directories under a target \
directory. Rows that cannot be applied are collected in error CSVs.")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (suppress non-error output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log file, appended to on every run
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log to stderr only
    #[arg(long, global = true)]
    no_log_file: bool,

    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the directory tree (default)
    Run,
    /// Validate the configuration without creating anything
    Check,
    /// Write a starter config file with empty path files and target
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&log_options(&cli)) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn log_options(cli: &Cli) -> LogOptions {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // check creates nothing, not even the log file
    let checking = matches!(cli.command, Some(Command::Check));

    LogOptions {
        log_file: (!cli.no_log_file && !checking).then(|| cli.log_file.clone()),
        level,
    }
}

fn execute(cli: &Cli) -> DirforgeResult<()> {
    match cli.command.as_ref().unwrap_or(&Command::Run) {
        Command::Run => handle_run(cli),
        Command::Check => handle_check(cli),
        Command::Init { force } => handle_init(&cli.config, *force),
    }
}

fn handle_run(cli: &Cli) -> DirforgeResult<()> {
    let cwd = std::env::current_dir()?;
    info!("Program started. Working directory: {}", cwd.display());

    info!("Loading config...");
    let settings = Settings::load(&cli.config)?;
    debug!("Resolved settings:\n{}", settings);

    let report = run(&settings)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        println!("{}", report);
    }

    Ok(())
}

fn handle_check(cli: &Cli) -> DirforgeResult<()> {
    info!("Checking config {}", cli.config.display());
    let settings = Settings::load(&cli.config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        println!("{}", settings);
        println!("Configuration OK");
    }

    Ok(())
}

fn handle_init(config_path: &Path, force: bool) -> DirforgeResult<()> {
    if config_path.exists() && !force {
        return Err(ConfigError::InvalidValue(format!(
            "{} already exists; pass --force to overwrite it",
            config_path.display()
        ))
        .into());
    }

    let template = ConfigFile::template();
    fs::write(config_path, template.to_toml_string()?)
        .map_err(|e| DirforgeError::filesystem(config_path, e))?;
    info!("Wrote {}", config_path.display());

    // Give the template's relative paths something to point at
    let base = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let inputs = [
        &template.csv_pathsfiles.path_main,
        &template.csv_pathsfiles.path_nested,
    ];
    for input in inputs.into_iter().flatten() {
        let path = base.join(input);
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DirforgeError::filesystem(parent, e))?;
        }
        fs::write(&path, "").map_err(|e| DirforgeError::filesystem(&path, e))?;
        info!("Created empty path file {}", path.display());
    }
    if let Some(target) = &template.target.path {
        let path = base.join(target);
        fs::create_dir_all(&path).map_err(|e| DirforgeError::filesystem(&path, e))?;
    }

    println!("Initialized {}", config_path.display());
    Ok(())
}
