//! `converter` - mirror an Obsidian vault into a Hugo site.

use clap::Parser;

use vault_tools::cli::{self, Cli, Commands};
use vault_tools::Error;

fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        None => Cli::print_help_for(None),
        Some(Commands::Convert {
            obsidian_path,
            hugo_path,
        }) => {
            let (Some(obsidian_path), Some(hugo_path)) =
                (cli::non_empty(obsidian_path), cli::non_empty(hugo_path))
            else {
                return Cli::print_help_for(Some("convert"));
            };
            cli::convert::run(&obsidian_path, &hugo_path)?;
            Ok(())
        }
    }
}

fn main() {
    cli::init_tracing("vault_tools=info");

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
