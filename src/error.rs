//! Error types for testmeta.

use std::path::PathBuf;

/// Errors raised by the extraction engine and its storage layer.
///
/// Most of these are recoverable at the driver level: a file that fails to
/// parse is logged and skipped rather than aborting a run.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(PathBuf),

    #[error("Failed to initialise parser for {0}: {1}")]
    ParserInitError(PathBuf, String),

    #[error("Failed to parse {0}")]
    TreeSitterParseFailed(PathBuf),

    #[error("Directory not found: {0}")]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
