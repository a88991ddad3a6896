//! Review staged changes with Gemini.

use std::path::Path;

use tracing::info;

use crate::error::Error;
use crate::gemini::{GeminiClient, GeminiConfig};
use crate::git;

/// Printed when there is nothing staged.
pub const NOTHING_STAGED: &str =
    "No changes to review, start by staging some changes with `git add`.";

/// Wrap a diff in the review prompt.
pub fn build_prompt(diff: &str) -> String {
    format!(
        "You are a good code reviewer. Answer should be short, concise, straight forward. \
         Do a code review for the following git diff, and provide feedback. \
         ONLY response what need to be improve.\n```\n{}\n```\nFeedback:\n",
        diff
    )
}

/// Run the review command in `repo_dir`.
pub async fn run(repo_dir: &Path, model: Option<String>, stage: bool) -> Result<(), Error> {
    let config = GeminiConfig::from_env(model)?;

    if stage {
        git::add_all(repo_dir)?;
        info!("Staged working tree");
    }

    let diff = git::staged_diff(repo_dir)?;
    if diff.is_empty() {
        println!("{}", NOTHING_STAGED);
        return Ok(());
    }

    let client = GeminiClient::new(config)?;
    info!(model = client.model(), diff_len = diff.len(), "Requesting review");
    let feedback = client.generate(&build_prompt(&diff)).await?;
    println!("{}", feedback);

    Ok(())
}
