//! Build tasks for the dirforge workspace
//!
//! Run as `cargo xtask <task>`. The task names mirror the Makefile targets.

use clap::{Parser, Subcommand};
use log::info;
use std::env;
use std::path::PathBuf;

mod clean;
mod fixture;
mod package;
mod publish;
mod workspace;

use publish::DEFAULT_DESTINATION;
use workspace::{dist_dir, executable_name, find_workspace_root};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build, package and publish dirforge")]
struct XtaskArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (suppress non-error output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Build the release executable as a single file in dist/
    Build,
    /// Generate a sample test directory with config, path files and target
    #[command(alias = "genTestDir")]
    GenTestDir {
        /// Directory to create, relative to the workspace root
        #[arg(long, default_value = "test")]
        dir: PathBuf,
        /// Number of sample projects
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Remove dist/, build/, test/ and *.spec files
    Clean,
    /// Replace the published executable with the one in dist/
    #[command(alias = "windowsPublish")]
    Publish {
        /// Destination file
        #[arg(long, default_value = DEFAULT_DESTINATION)]
        dest: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = XtaskArgs::parse();

    init_logging(&args);

    let root = find_workspace_root(&env::current_dir()?)?;
    info!("Workspace root: {}", root.display());

    match args.command {
        XtaskCommand::Build => {
            let staged = package::build(&root).await?;
            println!("✅ Built {}", staged.display());
        }
        XtaskCommand::GenTestDir { dir, count } => {
            let fixture = fixture::generate(&root.join(dir), count)?;
            println!("✅ Generated {}", fixture.root.display());
            println!("   {} main rows, {} nested rows", fixture.main_rows, fixture.nested_rows);
            println!("🚀 Try it with:");
            println!("   cargo run -p dirforge-cli -- --config {}", fixture.config.display());
        }
        XtaskCommand::Clean => {
            let removed = clean::clean(&root)?;
            if removed.is_empty() {
                info!("Nothing to clean");
            }
        }
        XtaskCommand::Publish { dest } => {
            publish::publish(&dist_dir(&root), &executable_name(), &dest)?;
        }
    }

    Ok(())
}

fn init_logging(args: &XtaskArgs) {
    let log_level = if args.quiet {
        log::LevelFilter::Error
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .init();
}
