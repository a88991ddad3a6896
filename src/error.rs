//! Error types for vault-tools.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide error type.
///
/// Every variant is fatal: the pipeline stops at the first one and the
/// binaries print it verbatim.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to list markdown files under {}: {source}", .path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to normalize {}: {source}", .path.display())]
    Normalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Front matter error: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("Vault config not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Vault config parse error: {0}")]
    ConfigParse(String),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Git error: {0}")]
    Git(String),

    #[error("missing {0}")]
    MissingApiKey(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
