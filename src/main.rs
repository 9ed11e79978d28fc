//! langsniff: identify the programming language of source code
//!
//! Detects the language of stdin, files, or whole directories and lists the
//! supported language identifiers.

use anyhow::Result;

mod cli;
mod config;
mod detect;
mod domain;
mod registry;
mod utils;

fn main() -> Result<()> {
    cli::run()
}
