//! CLI definitions for the `converter` and `codereview` binaries.

pub mod convert;
pub mod review;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Error;

/// Convert Obsidian notes to Hugo
#[derive(Parser)]
#[command(name = "converter")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert Obsidian notes to Hugo
    Convert {
        /// Absolute path to the obsidian vault
        #[arg(long)]
        obsidian_path: Option<String>,

        /// Absolute path to the hugo site directory
        #[arg(long)]
        hugo_path: Option<String>,
    },
}

impl Cli {
    /// Print help for a subcommand, or the top-level help.
    pub fn print_help_for(subcommand: Option<&str>) -> Result<(), Error> {
        let mut command = Cli::command();
        match subcommand.and_then(|name| command.find_subcommand_mut(name)) {
            Some(sub) => sub.print_help()?,
            None => command.print_help()?,
        }
        println!();
        Ok(())
    }
}

/// Review code using AI
#[derive(Parser)]
#[command(name = "codereview")]
#[command(version, long_about = None)]
pub struct ReviewCli {
    /// Gemini model to use
    #[arg(long)]
    pub model: Option<String>,

    /// Run `git add .` before reading the staged diff
    #[arg(long)]
    pub stage: bool,
}

/// Non-empty path argument, if any.
pub fn non_empty(path: Option<String>) -> Option<PathBuf> {
    path.filter(|p| !p.trim().is_empty()).map(PathBuf::from)
}

/// Install the stderr tracing subscriber. `RUST_LOG` adds to `directive`.
pub fn init_tracing(directive: &str) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive.parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
