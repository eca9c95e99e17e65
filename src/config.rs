//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bmtree/bmtree.toml`
//! 3. Environment variables: `BMTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub bookmarks_file: Option<PathBuf>,
    pub show_urls: Option<bool>,
    pub backup: Option<bool>,
}

/// Unified configuration for bmtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Bookmarks JSON file (default: <data dir>/bmtree/bookmarks.json)
    pub bookmarks_file: PathBuf,
    /// Show URLs next to titles when rendering trees
    pub show_urls: bool,
    /// Keep the previous file as `<file>.bak` on save
    pub backup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bookmarks_file: default_bookmarks_file(),
            show_urls: true,
            backup: true,
        }
    }
}

/// Default bookmarks file inside the platform data directory.
fn default_bookmarks_file() -> PathBuf {
    ProjectDirs::from("", "", "bmtree")
        .map(|dirs| dirs.data_dir().join("bookmarks.json"))
        .unwrap_or_else(|| PathBuf::from("~/.local/share/bmtree/bookmarks.json"))
}

/// Get the XDG config directory for bmtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bmtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bmtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.bookmarks_file.to_string_lossy().as_ref());
        self.bookmarks_file = PathBuf::from(expanded);
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            bookmarks_file: overlay
                .bookmarks_file
                .clone()
                .unwrap_or_else(|| self.bookmarks_file.clone()),
            show_urls: overlay.show_urls.unwrap_or(self.show_urls),
            backup: overlay.backup.unwrap_or(self.backup),
        }
    }

    /// Load settings with layered precedence from the standard locations.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `global_path` as the global config file.
    ///
    /// A missing file is skipped; a file that does not parse is an error.
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global_path {
            if path.exists() {
                debug!("loading global config: {}", path.display());
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply BMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BMTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("bookmarks_file") {
            settings.bookmarks_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("show_urls") {
            settings.show_urls = val;
        }
        if let Ok(val) = config.get_bool("backup") {
            settings.backup = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bmtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bmtree/bmtree.toml
#   Env:    BMTREE_* environment variables (explicit overrides)

# Bookmarks file (~ and $VAR are expanded)
# bookmarks_file = "~/.local/share/bmtree/bookmarks.json"

# Show URLs next to titles in `bmtree tree`
# show_urls = true

# Keep the previous bookmarks file as <file>.bak when saving
# backup = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
