//! Command-line interface for langsniff
//!
//! Provides `detect` and `languages` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::domain::Profile;

mod detect;
mod languages;

/// Identify the programming language of source code
#[derive(Parser)]
#[command(name = "langsniff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the language of stdin, files, or directories
    Detect(detect::DetectArgs),

    /// List supported language identifiers
    Languages(languages::LanguagesArgs),
}

/// Output format shared by all subcommands
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Detection profile as accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ProfileArg {
    Standard,
    Compact,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Standard => Profile::Standard,
            ProfileArg::Compact => Profile::Compact,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Detect(args) => detect::run(args),
        Commands::Languages(args) => languages::run(args),
    }
}
