//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add store-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("malformed bookmarks file {path}: {message}")]
    Format { path: PathBuf, message: String },

    #[error("unsupported bookmarks file version {version} in {path}")]
    UnsupportedVersion { path: PathBuf, version: u32 },

    #[error("bookmarks file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("standard folder cannot be removed or moved: {0}")]
    StandardFolder(String),

    #[error("not a folder: {0}")]
    NotAFolder(String),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
