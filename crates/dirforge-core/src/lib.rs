pub mod error;
pub mod config;
pub mod fsops;
pub mod csv_io;
pub mod builder;
pub mod logging;

pub use error::*;
pub use config::{ConfigError, ConfigFile, Settings, DEFAULT_CONFIG_FILE};
pub use builder::{run, RunReport, TreeBuilder};
pub use csv_io::{read_rows, ErrorSink};
pub use fsops::make_dir;
pub use logging::{init_logging, LogOptions, DEFAULT_LOG_FILE};
