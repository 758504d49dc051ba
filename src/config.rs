//! Application configuration.
//!
//! Configuration is stored in `<config dir>/talentdir/config.yaml` and
//! includes:
//! - API base URL and request timeout
//! - Page sizes and the settle delay for listings
//! - Cohorts hidden from talent listings

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{PROJECT_PAGE_SIZE, TALENT_PAGE_SIZE};
use crate::error::{DirectoryError, Result};
use crate::fetch::DEFAULT_SETTLE_DELAY_MS;

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "TALENTDIR_API_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Directory API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds (default: 15)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Listing behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseConfig {
    #[serde(default = "default_talent_page_size")]
    pub talent_page_size: usize,

    #[serde(default = "default_project_page_size")]
    pub project_page_size: usize,

    /// Quiet period after the last criteria change before fetching
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Cohorts whose talents are never listed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_cohorts: Vec<String>,
}

fn default_talent_page_size() -> usize {
    TALENT_PAGE_SIZE
}

fn default_project_page_size() -> usize {
    PROJECT_PAGE_SIZE
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            talent_page_size: default_talent_page_size(),
            project_page_size: default_project_page_size(),
            settle_delay_ms: default_settle_delay_ms(),
            hidden_cohorts: Vec::new(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "talentdir", "talentdir").ok_or_else(
            || DirectoryError::Config("cannot determine the configuration directory".to_string()),
        )?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Resolve an explicit path or fall back to the default location
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or return defaults if it does not exist.
    /// The API URL environment override is applied and the result validated.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DirectoryError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DirectoryError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            DirectoryError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Replace the base URL (from a command-line flag), then re-validate
    pub fn override_base_url(&mut self, url: &str) -> Result<()> {
        self.api.base_url = url.trim().to_string();
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            DirectoryError::Config(format!("invalid api.base_url '{}': {e}", self.api.base_url))
        })?;
        if self.api.timeout_secs == 0 {
            return Err(DirectoryError::Config(
                "api.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.browse.talent_page_size == 0 || self.browse.project_page_size == 0 {
            return Err(DirectoryError::Config(
                "page sizes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.browse.settle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    struct EnvGuard(Option<String>);

    impl EnvGuard {
        fn unset() -> Self {
            let previous = env::var(API_URL_ENV).ok();
            // SAFETY: tests touching the environment are serialized
            unsafe { env::remove_var(API_URL_ENV) };
            Self(previous)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.0 {
                // SAFETY: tests touching the environment are serialized
                unsafe { env::set_var(API_URL_ENV, value) };
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.browse.talent_page_size, 20);
        assert_eq!(config.browse.project_page_size, 12);
        assert_eq!(config.settle_delay(), Duration::from_millis(500));
        assert!(config.browse.hidden_cohorts.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
browse:
  hidden_cohorts:
    - Cohort 6
"#;
        let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.browse.hidden_cohorts, vec!["Cohort 6".to_string()]);
        assert_eq!(config.browse.talent_page_size, 20);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_missing_file_gives_defaults() {
        let _env = EnvGuard::unset();
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_save_and_load() {
        let _env = EnvGuard::unset();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.api.base_url = "https://directory.example.com/api".to_string();
        config.browse.settle_delay_ms = 250;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let _env = EnvGuard::unset();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api:\n  base_url: https://file.example.com\n").unwrap();

        // SAFETY: serialized test; restored by the guard
        unsafe { env::set_var(API_URL_ENV, "https://env.example.com/api") };
        let config = Config::load(&path).unwrap();
        unsafe { env::remove_var(API_URL_ENV) };

        assert_eq!(config.api.base_url, "https://env.example.com/api");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.browse.project_page_size = 0;
        assert!(matches!(config.validate(), Err(DirectoryError::Config(_))));

        let mut config = Config::default();
        assert!(config.override_base_url("not a url").is_err());
    }
}
