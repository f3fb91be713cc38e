//! Error types for loading defaults and configuration.
//!
//! The editing engine itself never fails; only the file-facing layers do.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a defaults document into a [`crate::Defaults`] map.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported defaults file: {path} (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("export '{export}' not found in {path}")]
    ExportNotFound { path: PathBuf, export: String },

    #[error("export '{export}' in {path} is not an object")]
    NotAnObject { path: PathBuf, export: String },
}

/// Failure to load or validate `jsdoc-defaults.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("no targets: pass --file, --interface and --defaults, or add [[target]] to a config file")]
    NoTargets,

    #[error("incomplete target: missing {0}")]
    IncompleteTarget(&'static str),
}
