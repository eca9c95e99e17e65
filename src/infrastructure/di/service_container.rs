//! Service container for dependency injection
//!
//! Wires the bookmark store up with settings and the filesystem.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::services::BookmarksService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings and I/O dependencies shared by all commands.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
        }
    }

    /// Bookmarks file to use: `override_path` if given, else the configured one.
    pub fn bookmarks_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.settings.bookmarks_file.clone())
    }

    /// Load the bookmark store (empty if the file does not exist yet).
    pub fn bookmarks(&self, override_path: Option<&Path>) -> ApplicationResult<BookmarksService> {
        BookmarksService::load(
            self.fs.clone(),
            &self.bookmarks_path(override_path),
            self.settings.backup,
        )
    }

    /// A fresh, unsaved store bound to the bookmarks file.
    pub fn empty_bookmarks(
        &self,
        override_path: Option<&Path>,
    ) -> ApplicationResult<BookmarksService> {
        BookmarksService::new(
            self.fs.clone(),
            self.bookmarks_path(override_path),
            self.settings.backup,
        )
    }
}
