//! Error conversion helpers for file and JSON operations
//!
//! Extension traits that attach the bookmarks file path to lower-level errors.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read bookmarks", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Extension trait turning `serde_json` failures into `ApplicationError::Format`.
pub trait JsonResultExt<T> {
    fn with_format_context(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> JsonResultExt<T> for serde_json::Result<T> {
    fn with_format_context(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Format {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
