//! Languages command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::{OutputFormat, ProfileArg};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::registry::SignatureRegistry;

#[derive(Args)]
pub struct LanguagesArgs {
    /// Output format: text (one per line) or json (array of strings)
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Signature table to list
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Path to config file (langsniff.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: LanguagesArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides { profile: args.profile.map(Into::into), ..CliOverrides::default() },
    );

    let registry =
        SignatureRegistry::from_config(&config).context("Invalid signature configuration")?;
    let languages = registry.list_supported_languages();

    match args.format {
        OutputFormat::Text => {
            for language in languages {
                println!("{language}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&languages)?),
    }

    Ok(())
}
