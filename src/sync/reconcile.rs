//! Removal of destination notes that no longer exist in the vault.

use std::fs;

use tracing::debug;

use super::index::FileIndex;
use crate::error::Error;

/// Delete every destination file whose key is missing from the source.
///
/// Returns the removed keys. Stops at the first failed deletion.
pub fn remove_orphans(source: &FileIndex, destination: &FileIndex) -> Result<Vec<String>, Error> {
    let mut removed = Vec::new();

    for (key, path) in destination.iter() {
        if source.contains(key) {
            continue;
        }

        fs::remove_file(path).map_err(|source| Error::Remove {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Removed orphaned note");
        removed.push(key.to_string());
    }

    Ok(removed)
}
