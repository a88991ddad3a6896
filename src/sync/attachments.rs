//! Attachment mirroring into the site's `static/` folder.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::copy::{copy_file, create_dir_all};
use super::index::is_markdown;
use crate::error::Error;

/// Vault settings directory, never published.
const OBSIDIAN_DIR: &str = ".obsidian";

fn is_settings_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == OBSIDIAN_DIR
}

/// Copy every non-markdown file under `attachment_dir` into `static_dir`,
/// keeping the layout relative to `attachment_dir`.
///
/// A missing attachment folder is not an error: nothing is copied and
/// `static_dir` is not created. Existing files are overwritten.
/// Returns the number of files copied.
pub fn mirror_attachments(attachment_dir: &Path, static_dir: &Path) -> Result<usize, Error> {
    match fs::metadata(attachment_dir) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %attachment_dir.display(), "No attachment folder, skipping");
            return Ok(0);
        }
        Err(e) => return Err(e.into()),
    }

    create_dir_all(static_dir)?;

    let mut copied = 0;
    let walker = WalkDir::new(attachment_dir)
        .into_iter()
        .filter_entry(|entry| !is_settings_dir(entry));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || is_markdown(entry.path()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(attachment_dir)
            .map_err(|e| Error::other(format!("{}: {}", entry.path().display(), e)))?;
        let destination = static_dir.join(relative);

        copy_file(entry.path(), &destination)?;
        debug!(from = %entry.path().display(), to = %destination.display(), "Copied attachment");
        copied += 1;
    }

    Ok(copied)
}
