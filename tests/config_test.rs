//! Settings loading with layered precedence.
//!
//! These tests point `load_from` at temporary global config files so the
//! user's real configuration never leaks in.

use std::fs;

use bmtree::application::ApplicationError;
use bmtree::config::{RawSettings, Settings};
use tempfile::TempDir;

#[test]
fn given_no_global_config_when_load_then_defaults() {
    let temp = TempDir::new().unwrap();

    let settings = Settings::load_from(Some(&temp.path().join("missing.toml"))).unwrap();

    assert!(settings.show_urls);
    assert!(settings.backup);
    assert!(settings.bookmarks_file.ends_with("bookmarks.json"));
}

#[test]
fn given_global_config_when_load_then_overrides_only_given_fields() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("bmtree.toml");
    fs::write(
        &config_path,
        r#"
bookmarks_file = "/srv/bookmarks/main.json"
show_urls = false
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Some(&config_path)).unwrap();

    assert_eq!(
        settings.bookmarks_file.to_string_lossy(),
        "/srv/bookmarks/main.json"
    );
    assert!(!settings.show_urls);
    assert!(settings.backup, "unspecified fields keep their defaults");
}

#[test]
fn given_tilde_in_bookmarks_file_when_load_then_expanded() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("bmtree.toml");
    fs::write(&config_path, "bookmarks_file = \"~/bm.json\"\n").unwrap();

    let settings = Settings::load_from(Some(&config_path)).unwrap();

    assert!(!settings.bookmarks_file.to_string_lossy().starts_with('~'));
    assert!(settings.bookmarks_file.ends_with("bm.json"));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("bmtree.toml");
    fs::write(&config_path, "show_urls = \"sometimes\"\n").unwrap();

    let result = Settings::load_from(Some(&config_path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_template_then_it_parses_to_empty_overrides() {
    let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();

    assert!(raw.bookmarks_file.is_none());
    assert!(raw.show_urls.is_none());
    assert!(raw.backup.is_none());
}

#[test]
fn given_settings_then_to_toml_round_trips() {
    let settings = Settings::default();

    let text = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&text).unwrap();

    assert_eq!(parsed, settings);
}
