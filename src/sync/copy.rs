//! Byte copies into the site tree.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;

use super::index::FileIndex;
use crate::error::Error;

/// Copy source notes that have no destination counterpart.
///
/// Existing destination files are left alone regardless of content.
/// Returns the copied keys.
pub fn copy_missing(
    source: &FileIndex,
    destination: &FileIndex,
    content_root: &Path,
) -> Result<Vec<String>, Error> {
    let mut copied = Vec::new();

    for (key, from) in source.iter() {
        if destination.contains(key) {
            continue;
        }

        let to = key
            .split('/')
            .fold(content_root.to_path_buf(), |acc, part| acc.join(part));
        copy_file(from, &to)?;
        debug!(from = %from.display(), to = %to.display(), "Copied note");
        copied.push(key.to_string());
    }

    Ok(copied)
}

/// Stream-copy `from` to `to`, creating parent directories and syncing the
/// written file before returning. Overwrites `to` if it exists.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), Error> {
    let wrap = |source: io::Error| Error::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    if let Some(parent) = to.parent() {
        create_dir_all(parent).map_err(wrap)?;
    }

    let mut reader = File::open(from).map_err(wrap)?;
    let mut writer = File::create(to).map_err(wrap)?;
    io::copy(&mut reader, &mut writer).map_err(wrap)?;
    writer.sync_all().map_err(wrap)?;

    Ok(())
}

/// Create a directory tree, world-writable before umask on unix.
pub fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }

    builder.create(path)
}
