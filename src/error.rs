//! Error types for pyimpls.
//!
//! This module defines [`ImplsError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! Every error is fatal to the report: there is no partial output recovery.
//! File-level context (which ebuild, which directory) is attached with
//! `anyhow::Context` and travels through [`ImplsError::Other`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pyimpls operations.
#[derive(Debug, Error)]
pub enum ImplsError {
    /// Repository location does not look like an ebuild repository.
    #[error("Repository not found: {path}")]
    RepositoryNotFound { path: PathBuf },

    /// Repository at the location has a different name than requested.
    #[error("Repository name mismatch: expected '{expected}', found '{found}'")]
    RepositoryNameMismatch { expected: String, found: String },

    /// Metadata cache entry could not be interpreted.
    #[error("Invalid cache entry {path}: {message}")]
    InvalidCacheEntry { path: PathBuf, message: String },

    /// Version string does not follow the package manager specification.
    #[error("Invalid version: {version}")]
    InvalidVersion { version: String },

    /// Implementation name is not known to the registry.
    #[error("Unknown implementation: {name}")]
    UnknownImplementation { name: String },

    /// A line of the pkgcheck output could not be parsed.
    #[error("Failed to parse {path} line {line}: {source}")]
    CompatLogParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pyimpls operations.
pub type Result<T> = std::result::Result<T, ImplsError>;
