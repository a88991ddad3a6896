//! `codereview` - ask Gemini to review the staged git diff.

use clap::Parser;

use vault_tools::cli::{self, review, ReviewCli};

#[tokio::main]
async fn main() {
    cli::init_tracing("vault_tools=warn");

    let args = ReviewCli::parse();
    let result = match std::env::current_dir() {
        Ok(dir) => review::run(&dir, args.model, args.stage).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
