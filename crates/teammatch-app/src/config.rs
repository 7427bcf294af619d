// Configuration loading and parsing (config/teammatch.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use teammatch_client::client::{DEFAULT_BALANCE_PATH, DEFAULT_TIMEOUT};
use teammatch_core::report::DEFAULT_PROFILE_URL_BASE;
use thiserror::Error;
use tracing::info;

/// Name of the single configuration file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "teammatch.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default = "default_balance_path")]
    pub balance_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: "http://127.0.0.1:8000".to_string(),
            balance_path: default_balance_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_profile_url_base")]
    pub profile_url_base: String,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl UiConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            profile_url_base: default_profile_url_base(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_balance_path() -> String {
    DEFAULT_BALANCE_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_profile_url_base() -> String {
    DEFAULT_PROFILE_URL_BASE.to_string()
}

fn default_tick_ms() -> u64 {
    33
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/teammatch.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/teammatch.toml` to `config/teammatch.toml` if no config
/// exists yet. Returns the path written, or `None` when a config was already
/// in place.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {CONFIG_FILE} in config/ or defaults/ under {}; run from the project root",
                base_dir.display()
            ),
        });
    }

    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;

    info!(path = %target.display(), "initialized config from defaults");
    Ok(Some(target))
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.service.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "service.base_url".into(),
            message: format!("must be an http(s) URL, got {base_url:?}"),
        });
    }

    if !config.service.balance_path.starts_with('/') {
        return Err(ConfigError::ValidationError {
            field: "service.balance_path".into(),
            message: "must start with '/'".into(),
        });
    }

    if config.service.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "service.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    if config.ui.tick_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "ui.tick_ms".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Workspace root holding `defaults/`, found by walking up from the CWD
    /// (`cargo test` runs from the crate directory).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        cwd.ancestors()
            .find(|dir| dir.join("defaults").join(CONFIG_FILE).exists())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| panic!("Cannot locate defaults/ directory from CWD {cwd:?}"))
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        tmp
    }

    fn write_config(dir: &Path, text: &str) {
        fs::write(dir.join("config").join(CONFIG_FILE), text).unwrap();
    }

    #[test]
    fn load_default_config_file() {
        let tmp = scratch_dir("teammatch_config_defaults");
        fs::copy(
            project_root().join("defaults").join(CONFIG_FILE),
            tmp.join("config").join(CONFIG_FILE),
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("defaults should load");
        assert_eq!(config.service.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.service.balance_path, "/balance");
        assert_eq!(config.service.timeout(), Duration::from_secs(120));
        assert_eq!(config.ui.profile_url_base, "https://steamcommunity.com/id/");
        assert_eq!(config.ui.tick(), Duration::from_millis(33));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let tmp = scratch_dir("teammatch_config_minimal");
        write_config(&tmp, "[service]\nbase_url = \"https://balancer.example\"\n");

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.service.base_url, "https://balancer.example");
        assert_eq!(config.service.balance_path, "/balance");
        assert_eq!(config.service.timeout_secs, 120);
        assert_eq!(config.ui.tick_ms, 33);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let tmp = scratch_dir("teammatch_config_bad_url");
        write_config(&tmp, "[service]\nbase_url = \"ftp://nope\"\n");

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "service.base_url"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_relative_balance_path() {
        let tmp = scratch_dir("teammatch_config_bad_path");
        write_config(
            &tmp,
            "[service]\nbase_url = \"http://x\"\nbalance_path = \"balance\"\n",
        );

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "service.balance_path")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout_and_tick() {
        let tmp = scratch_dir("teammatch_config_zeroes");
        write_config(&tmp, "[service]\nbase_url = \"http://x\"\ntimeout_secs = 0\n");
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "service.timeout_secs")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        write_config(&tmp, "[service]\nbase_url = \"http://x\"\n\n[ui]\ntick_ms = 0\n");
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "ui.tick_ms"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_is_reported() {
        let tmp = scratch_dir("teammatch_config_missing");
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch_dir("teammatch_config_invalid");
        write_config(&tmp, "this is not valid [[[ toml");
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_default_once() {
        let tmp = std::env::temp_dir().join("teammatch_config_ensure");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy(
            project_root().join("defaults").join(CONFIG_FILE),
            defaults_dir.join(CONFIG_FILE),
        )
        .unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied, Some(tmp.join("config").join(CONFIG_FILE)));
        assert!(load_config_from(&tmp).is_ok());

        // Second run leaves the existing copy alone.
        fs::write(tmp.join("config").join(CONFIG_FILE), "# custom\n").unwrap();
        assert_eq!(ensure_config_files(&tmp).unwrap(), None);
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_accepts_config_without_defaults() {
        let tmp = scratch_dir("teammatch_config_no_defaults");
        write_config(&tmp, "[service]\nbase_url = \"http://x\"\n");

        assert_eq!(ensure_config_files(&tmp).unwrap(), None);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_missing() {
        let tmp = std::env::temp_dir().join("teammatch_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("config/ or defaults/"))
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
