//! Vault configuration.
//!
//! Reads the subset of Obsidian's `.obsidian/app.json` the converter cares
//! about. Unknown keys are ignored and missing keys fall back to their zero
//! values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Error;

/// Settings read from `<vault>/.obsidian/app.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VaultConfig {
    /// Rewrite links automatically when a note is renamed.
    pub always_update_links: bool,

    /// Link style for new links (`shortest`, `relative`, `absolute`).
    pub new_link_format: String,

    /// Emit `[text](path)` links instead of `[[wikilinks]]`.
    pub use_markdown_links: bool,

    /// Attachment folder, relative to the vault root.
    pub attachment_folder_path: String,
}

impl VaultConfig {
    /// Get the config file path for a vault.
    pub fn path(vault_root: &Path) -> PathBuf {
        vault_root.join(".obsidian").join("app.json")
    }

    /// Load config from a vault directory.
    pub fn load(vault_root: &Path) -> Result<Self, Error> {
        let config_path = Self::path(vault_root);
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound(config_path));
            }
            Err(e) => return Err(e.into()),
        };
        let config: VaultConfig =
            serde_json::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))?;

        info!(
            path = %config_path.display(),
            attachment_folder = %config.attachment_folder_path,
            "Loaded vault config"
        );
        debug!(?config, "Vault config (full)");
        Ok(config)
    }

    /// Absolute attachment folder for a vault.
    ///
    /// Obsidian stores `/` for the vault root and `./` for "same folder as
    /// the note"; both resolve to the vault root here, as does an empty value.
    pub fn attachment_dir(&self, vault_root: &Path) -> PathBuf {
        let relative = self
            .attachment_folder_path
            .trim_start_matches("./")
            .trim_start_matches('/');
        if relative.is_empty() {
            vault_root.to_path_buf()
        } else {
            vault_root.join(relative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, json: &str) {
        let dir = root.join(".obsidian");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("app.json"), json).unwrap();
    }

    #[test]
    fn test_load_all_fields() {
        let dir = TempDir::new().unwrap();
        write_config(
            dir.path(),
            r#"{
                "alwaysUpdateLinks": true,
                "newLinkFormat": "relative",
                "useMarkdownLinks": true,
                "attachmentFolderPath": "attachments"
            }"#,
        );

        let config = VaultConfig::load(dir.path()).unwrap();
        assert!(config.always_update_links);
        assert_eq!(config.new_link_format, "relative");
        assert!(config.use_markdown_links);
        assert_eq!(config.attachment_folder_path, "attachments");
    }

    #[test]
    fn test_missing_fields_default() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), r#"{"theme": "obsidian", "vimMode": true}"#);

        let config = VaultConfig::load(dir.path()).unwrap();
        assert_eq!(config, VaultConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = VaultConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(p) if p.ends_with("app.json")));
    }

    #[test]
    fn test_unreadable_config_is_not_reported_missing() {
        let dir = TempDir::new().unwrap();
        // `.obsidian` as a plain file makes `app.json` unreachable.
        fs::write(dir.path().join(".obsidian"), "").unwrap();

        let err = VaultConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "unexpected error: {err}");
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "{ not json");

        let err = VaultConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_attachment_dir_variants() {
        let root = Path::new("/vault");
        let mut config = VaultConfig::default();
        assert_eq!(config.attachment_dir(root), PathBuf::from("/vault"));

        config.attachment_folder_path = "/".to_string();
        assert_eq!(config.attachment_dir(root), PathBuf::from("/vault"));

        config.attachment_folder_path = "./".to_string();
        assert_eq!(config.attachment_dir(root), PathBuf::from("/vault"));

        config.attachment_folder_path = "assets/img".to_string();
        assert_eq!(config.attachment_dir(root), PathBuf::from("/vault/assets/img"));
    }
}
