//! Git shell-outs used by the review command.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::Error;

/// Run a git command in `dir` and return its trimmed stdout.
fn git_command(dir: &Path, args: &[&str]) -> Result<String, Error> {
    debug!(?args, dir = %dir.display(), "Running git");
    let output = Command::new("git").args(args).current_dir(dir).output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(Error::Git(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        )))
    }
}

/// Staged changes with zero context lines. Empty when nothing is staged.
pub fn staged_diff(dir: &Path) -> Result<String, Error> {
    git_command(dir, &["diff", "--cached", "--unified=0"])
}

/// Stage every change in the working tree.
pub fn add_all(dir: &Path) -> Result<(), Error> {
    git_command(dir, &["add", "."])?;
    Ok(())
}
