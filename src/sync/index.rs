//! Markdown file enumeration.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Error;

/// Markdown file extension, without the dot.
pub const MARKDOWN_EXT: &str = "md";

/// Check whether a path names a markdown file.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == MARKDOWN_EXT)
}

/// Markdown files under a root, keyed by `/`-separated relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIndex {
    root: PathBuf,
    files: BTreeMap<String, PathBuf>,
}

impl FileIndex {
    /// Recursively list every `.md` regular file under `root`.
    pub fn scan(root: &Path) -> Result<Self, Error> {
        let mut files = BTreeMap::new();

        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|source| Error::Enumerate {
                path: root.to_path_buf(),
                source,
            })?;

            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }

            if let Some(key) = relative_key(root, entry.path()) {
                files.insert(key, entry.into_path());
            }
        }

        debug!(root = %root.display(), count = files.len(), "Indexed markdown files");
        Ok(Self {
            root: root.to_path_buf(),
            files,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.files.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Path> {
        self.files.get(key).map(PathBuf::as_path)
    }

    /// Iterate `(relative key, absolute path)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Relative path of `path` under `root`, joined with `/`.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_nested_markdown() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::write(root.join("a.md"), "a").unwrap();
        fs::write(root.join("sub/b.md"), "b").unwrap();
        fs::write(root.join("sub/deeper/c.md"), "c").unwrap();
        fs::write(root.join("sub/image.png"), [0u8, 1, 2]).unwrap();
        fs::write(root.join("notes.markdown"), "not indexed").unwrap();

        let index = FileIndex::scan(root).unwrap();

        let keys: Vec<_> = index.keys().collect();
        assert_eq!(keys, vec!["a.md", "sub/b.md", "sub/deeper/c.md"]);
        assert_eq!(index.get("sub/b.md"), Some(root.join("sub/b.md").as_path()));
    }

    #[test]
    fn test_directory_named_md_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("folder.md")).unwrap();
        fs::write(temp.path().join("folder.md/inner.md"), "x").unwrap();

        let index = FileIndex::scan(temp.path()).unwrap();
        let keys: Vec<_> = index.keys().collect();
        assert_eq!(keys, vec!["folder.md/inner.md"]);
    }

    #[test]
    fn test_empty_root() {
        let temp = TempDir::new().unwrap();
        let index = FileIndex::scan(temp.path()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.root(), temp.path());
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = FileIndex::scan(&missing).unwrap_err();
        assert!(matches!(err, Error::Enumerate { ref path, .. } if path == &missing));
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("a/b.md")));
        assert!(!is_markdown(Path::new("a/b.png")));
        assert!(!is_markdown(Path::new("md")));
    }
}
