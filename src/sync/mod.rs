//! One-way vault to Hugo site synchronization.
//!
//! Stages run in order and the first failure aborts the run. Nothing is
//! rolled back, so a failed run can leave the site partially updated.
//!
//! 1. index the vault's notes and the site's `content/` notes
//! 2. delete site notes that left the vault
//! 3. copy vault notes the site doesn't have yet
//! 4. add front matter and rewrite attachment links in `content/`
//! 5. read `.obsidian/app.json`
//! 6. mirror the attachment folder into `static/`

pub mod attachments;
pub mod copy;
pub mod frontmatter;
pub mod index;
pub mod reconcile;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::VaultConfig;
use crate::error::Error;

pub use index::FileIndex;

/// Site subdirectory holding the markdown mirror.
pub const CONTENT_DIR: &str = "content";

/// Site subdirectory holding mirrored attachments.
pub const STATIC_DIR: &str = "static";

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Relative paths deleted from `content/`.
    pub removed: Vec<String>,
    /// Relative paths copied into `content/`.
    pub copied: Vec<String>,
    /// Notes rewritten by the normalizer.
    pub normalized: usize,
    /// Attachment folder as configured in the vault.
    pub attachment_folder: String,
    /// Attachments copied into `static/`.
    pub attachments: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} removed, {} copied, {} normalized, {} attachment(s)",
            self.removed.len(),
            self.copied.len(),
            self.normalized,
            self.attachments
        )
    }
}

/// Vault and site roots for one run.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    vault_root: PathBuf,
    site_root: PathBuf,
}

impl Synchronizer {
    pub fn new(vault_root: impl Into<PathBuf>, site_root: impl Into<PathBuf>) -> Self {
        Self {
            vault_root: vault_root.into(),
            site_root: site_root.into(),
        }
    }

    pub fn content_root(&self) -> PathBuf {
        self.site_root.join(CONTENT_DIR)
    }

    pub fn static_root(&self) -> PathBuf {
        self.site_root.join(STATIC_DIR)
    }

    pub fn vault_root(&self) -> &Path {
        &self.vault_root
    }

    /// Run every stage once.
    pub fn run(&self) -> Result<SyncReport, Error> {
        let content_root = self.content_root();

        let source = FileIndex::scan(&self.vault_root)?;
        info!(root = %self.vault_root.display(), notes = source.len(), "Indexed vault");

        if !content_root.exists() {
            copy::create_dir_all(&content_root)?;
            info!(path = %content_root.display(), "Created content directory");
        }
        let destination = FileIndex::scan(&content_root)?;
        info!(root = %content_root.display(), notes = destination.len(), "Indexed site content");

        let removed = reconcile::remove_orphans(&source, &destination)?;
        info!(count = removed.len(), "Removed orphaned notes");

        let copied = copy::copy_missing(&source, &destination, &content_root)?;
        info!(count = copied.len(), "Copied new notes");

        let normalized = frontmatter::normalize_tree(&content_root)?;
        info!(count = normalized, "Normalized notes");

        let config = VaultConfig::load(&self.vault_root)?;
        let attachment_dir = config.attachment_dir(&self.vault_root);
        let attachments = attachments::mirror_attachments(&attachment_dir, &self.static_root())?;
        info!(
            folder = %attachment_dir.display(),
            count = attachments,
            "Mirrored attachments"
        );

        Ok(SyncReport {
            removed,
            copied,
            normalized,
            attachment_folder: config.attachment_folder_path,
            attachments,
        })
    }
}
