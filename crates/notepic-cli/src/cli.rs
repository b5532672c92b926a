use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "notepic")]
#[command(about = "notepic - fill the pic frontmatter field of markdown notes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses RUST_LOG, then the config file, then 'warn'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/notepic/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process markdown files and update frontmatter with image links
    Process(ProcessArgs),

    /// Show the effective configuration as TOML
    Config,

    /// Print the version number of notepic
    Version,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ProcessArgs {
    /// Base directory to scan for markdown files
    #[arg(long)]
    pub basedir: Option<PathBuf>,

    /// File extensions to process (repeatable or comma separated)
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Directories to ignore, matched case-insensitively anywhere in the path
    #[arg(long = "ignore-path", value_delimiter = ',')]
    pub ignore_paths: Vec<String>,

    /// Filetype to process (specified in frontmatter)
    #[arg(long)]
    pub filetype: Option<String>,

    /// Show what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,
}
