use std::{error::Error, fmt, path::PathBuf};

use clap::{
    builder::NonEmptyStringValueParser, Args, CommandFactory, FromArgMatches, Parser,
    Subcommand,
};
use log::LevelFilter;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to remove old database file '{}': {source}", path.display())]
    RemoveDatabase {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{failed} of {total} kinds failed to import")]
    ImportFailed { failed: usize, total: usize },
}

/// Name and version of the binary, plus the commit and date of the build when
/// they were set at compile time.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub commit: Option<&'static str>,
    pub date: Option<&'static str>,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("GTFS_BUILD_COMMIT"),
            date: option_env!("GTFS_BUILD_DATE"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)?;
        if let Some(commit) = self.commit {
            write!(f, "\ncommit: {}", commit)?;
        }
        if let Some(date) = self.date {
            write!(f, "\nbuilt: {}", date)?;
        }
        Ok(())
    }
}

/// Command line tool to import GTFS feeds into SQLite and trim them.
#[derive(Parser, Debug)]
#[command(name = "gtfs")]
pub struct Cli {
    #[arg(
        short('l'),
        long("log-level"),
        env("GTFS_LOG_LEVEL"),
        default_value_t,
        value_enum,
        global = true
    )]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a GTFS directory into a new SQLite database.
    Import(ImportArgs),
    /// Reduce a database to the data of a single agency.
    Trim(TrimArgs),
    /// Print version and build information.
    Version,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Directory holding the GTFS text files.
    #[arg(env("GTFS_PATH"))]
    pub gtfs_base: PathBuf,
    /// Database file to create. An existing file is replaced.
    #[arg(env("GTFS_DATABASE"))]
    pub db_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Existing database file.
    pub db_path: PathBuf,
    /// Part of the name of the agency to keep.
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub agency: String,
}

#[derive(clap::ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

pub fn build_command(build_info: &BuildInfo) -> clap::Command {
    Cli::command().version(build_info.version)
}

pub fn parse(build_info: &BuildInfo) -> Cli {
    let matches = build_command(build_info).get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|why| why.exit())
}
