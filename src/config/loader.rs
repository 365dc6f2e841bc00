//! Discovery and loading of `beatloop.toml`, plus command-line overrides.

use super::schema::BeatloopConfig;
use crate::loops::SliceSize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "beatloop.toml";

/// Why a config file could not be used
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse beatloop.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Values given on the command line; `None` keeps the file's value
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the default slice size
    pub slice: Option<SliceSize>,
    /// Override quartered preference
    pub prefer_quartered: Option<bool>,
    /// Override flipped reporting
    pub report_flipped: Option<bool>,
    /// Override display label length
    pub max_label_len: Option<usize>,
}

/// Locate the configuration to use.
///
/// The nearest `beatloop.toml` in the working directory or one of its
/// ancestors wins; otherwise the per-user file in the XDG config home.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from).or_else(find_xdg_config)
}

/// Per-user config directory: `$XDG_CONFIG_HOME`, else `$HOME/.config`.
fn config_home() -> Option<PathBuf> {
    match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")),
    }
}

/// `beatloop/beatloop.toml` under the per-user config directory, if present.
pub fn find_xdg_config() -> Option<PathBuf> {
    let candidate = config_home()?.join("beatloop").join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Nearest `beatloop.toml` in `start` or any of its ancestors.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|path| path.is_file())
}

/// Load the effective configuration.
///
/// An explicit `path` must exist. Without one, discovery runs and a missing
/// file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<BeatloopConfig, ConfigError> {
    match path.map(Path::to_path_buf).or_else(find_config) {
        Some(file) => load_config_file(&file),
        None => {
            debug!("no beatloop.toml found, using defaults");
            Ok(default_config())
        }
    }
}

/// Parse and validate one config file.
fn load_config_file(path: &Path) -> Result<BeatloopConfig, ConfigError> {
    let config: BeatloopConfig = toml::from_str(&fs::read_to_string(path)?)?;

    let problems: Vec<String> = config.validate().iter().map(ToString::to_string).collect();
    if !problems.is_empty() {
        return Err(ConfigError::Validation(problems));
    }

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Configuration used when no beatloop.toml is found.
pub fn default_config() -> BeatloopConfig {
    BeatloopConfig::default()
}

/// Apply command-line values on top of the loaded file.
pub fn merge_cli_overrides(config: &mut BeatloopConfig, overrides: &CliOverrides) {
    if let Some(slice) = overrides.slice {
        config.extend.default_slice = slice;
    }

    if let Some(prefer_quartered) = overrides.prefer_quartered {
        config.extend.prefer_quartered = prefer_quartered;
    }

    if let Some(report_flipped) = overrides.report_flipped {
        config.detect.report_flipped = report_flipped;
    }

    if let Some(max_label_len) = overrides.max_label_len {
        config.display.max_label_len = max_label_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_find_config_in_start_dir() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "[display]\nmax_label_len = 12\n");
        assert_eq!(find_config_from(temp.path().to_path_buf()), Some(path));
    }

    #[test]
    fn test_find_config_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "");
        let drafts = temp.path().join("sequences").join("drafts");
        fs::create_dir_all(&drafts).unwrap();

        assert_eq!(find_config_from(drafts), Some(path));
    }

    #[test]
    fn test_find_config_ignores_directory_with_config_name() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("beatloop");
        fs::create_dir_all(&dir).unwrap();
        let path = write_config(&dir, "");

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(value) => env::set_var("XDG_CONFIG_HOME", value),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(path));
    }

    #[test]
    fn test_load_config_keeps_unset_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
[extend]
prefer_quartered = false

[display]
max_label_words = 4
"#,
        );

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.extend.prefer_quartered);
        assert_eq!(config.display.max_label_words, 4);
        assert_eq!(config.display.max_label_len, 20);
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "[display\nmax_label_len = ");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_values_are_listed() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "[display]\nmax_label_len = 0\n");

        match load_config(Some(&path)) {
            Err(ConfigError::Validation(problems)) => {
                assert_eq!(problems.len(), 1);
                assert!(problems[0].contains("display.max_label_len"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = default_config();
        let overrides = CliOverrides {
            slice: Some(SliceSize::Quartered),
            report_flipped: Some(false),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.extend.default_slice, SliceSize::Quartered);
        assert!(!config.detect.report_flipped);
        assert!(config.extend.prefer_quartered);
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = default_config();
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config, default_config());
    }
}
