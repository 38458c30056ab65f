//! Integration tests for source/build root configuration

use multiproject::config::{BUILD_DIR_ENV, SOURCE_DIR_ENV};
use multiproject::{ConfigError, MultiProjectConfig, RealFileSystem};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use yare::parameterized;

/// Helper to temporarily set environment variables for testing
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn set(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn unset(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(v) => env::set_var(&self.key, v),
            None => env::remove_var(&self.key),
        }
    }
}

#[parameterized(
    plain = { "modules" },
    nested = { "code/modules" },
    not_yet_created = { "later" },
    dotted = { "./modules" },
)]
fn test_relative_source_directory_resolves_against_root(relative: &str) {
    let temp = TempDir::new().unwrap();
    let fs = RealFileSystem::new();
    let mut config = MultiProjectConfig::new(temp.path());

    config.set_source_directory(&fs, relative).unwrap();

    assert_eq!(config.source_directory(), temp.path().join(relative));
}

#[test]
fn test_absolute_source_directory_is_stored_verbatim() {
    let temp = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let fs = RealFileSystem::new();
    let mut config = MultiProjectConfig::new(temp.path());

    config.set_source_directory(&fs, other.path()).unwrap();

    assert_eq!(config.source_directory(), other.path());
}

#[test]
fn test_plain_file_is_rejected_and_previous_value_kept() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("settings.gradle"), "").unwrap();
    let fs = RealFileSystem::new();
    let mut config = MultiProjectConfig::new(temp.path());
    config.set_source_directory(&fs, "modules").unwrap();

    let err = config
        .set_source_directory(&fs, "settings.gradle")
        .unwrap_err();

    match err {
        ConfigError::NotADirectory(path) => {
            assert_eq!(path, temp.path().join("settings.gradle"));
        }
        other => panic!("Expected NotADirectory, got {:?}", other),
    }
    assert_eq!(config.source_directory(), temp.path().join("modules"));
}

#[test]
#[serial]
fn test_env_overrides() {
    let temp = TempDir::new().unwrap();
    let _guards = vec![
        EnvGuard::set(SOURCE_DIR_ENV, "modules"),
        EnvGuard::set(BUILD_DIR_ENV, "/tmp/multiproject-out"),
    ];

    let config = MultiProjectConfig::from_env(&RealFileSystem::new(), temp.path()).unwrap();

    assert_eq!(config.source_directory(), temp.path().join("modules"));
    assert_eq!(config.build_directory(), Some(Path::new("/tmp/multiproject-out")));
}

#[test]
#[serial]
fn test_env_defaults() {
    let temp = TempDir::new().unwrap();
    let _guards = vec![EnvGuard::unset(SOURCE_DIR_ENV), EnvGuard::unset(BUILD_DIR_ENV)];

    let config = MultiProjectConfig::from_env(&RealFileSystem::new(), temp.path()).unwrap();

    assert_eq!(config, MultiProjectConfig::new(temp.path()));
}

#[test]
#[serial]
fn test_env_override_pointing_at_file_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "").unwrap();
    let _guards = vec![
        EnvGuard::set(SOURCE_DIR_ENV, "README.md"),
        EnvGuard::unset(BUILD_DIR_ENV),
    ];

    let result = MultiProjectConfig::from_env(&RealFileSystem::new(), temp.path());

    assert!(matches!(result, Err(ConfigError::NotADirectory(_))));
}

#[test]
fn test_toml_settings() {
    let temp = TempDir::new().unwrap();
    let text = r#"
[multiproject]
source_directory = "modules"
build_directory = "out"

[other-tool]
enabled = true
"#;

    let config =
        MultiProjectConfig::from_toml_str(&RealFileSystem::new(), temp.path(), text).unwrap();

    assert_eq!(config.source_directory(), temp.path().join("modules"));
    assert_eq!(
        config.build_directory(),
        Some(temp.path().join("out").as_path())
    );
}

#[test]
fn test_toml_settings_malformed() {
    let temp = TempDir::new().unwrap();

    let result = MultiProjectConfig::from_toml_str(
        &RealFileSystem::new(),
        temp.path(),
        "[multiproject\nsource_directory = ",
    );

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}
