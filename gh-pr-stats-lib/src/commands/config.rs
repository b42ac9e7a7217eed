use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "pr-stats.toml";

const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Number of items requested per page (1..=100)
    #[serde(default = "default_page_size")]
    pub page_size: u8,

    /// Maximum number of pages to fetch, 0 for no limit
    #[serde(default)]
    pub max_pages: u32,

    /// Number of retries after a network or server error
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Timeout for a single HTTP request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_page_size() -> u8 {
    100
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_request_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `pr-stats.toml` in `base_dir` is used when it exists.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!(target: "    config", "Loaded configuration from '{final_path}'");

        Ok(config)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether `api_url` still points at the public GitHub API.
    #[must_use]
    pub fn has_default_api_url(&self) -> bool {
        self.api_url.trim_end_matches('/') == DEFAULT_API_URL
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.page_size) {
            bail!("page_size must be between 1 and 100, got {}", self.page_size);
        }

        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }

        if self.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();

        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.max_pages, 0);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_has_default_api_url() {
        assert!(Config::default().has_default_api_url());

        let config = Config { api_url: "https://ghe.example.com/api/v3".to_string(), ..Config::default() };
        assert!(!config.has_default_api_url());
    }

    #[test]
    fn test_empty_file_uses_field_defaults() {
        let config: Config = toml::from_str("").unwrap();
        config.validate().unwrap();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_validate_page_size_zero() {
        let config = Config { page_size: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_page_size_too_large() {
        let config = Config { page_size: 101, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config { request_timeout_secs: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_api_url() {
        let config = Config { api_url: " ".to_string(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config.page_size, 100);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_from_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let _ = write_config(&tmp, "page_size = 50\nmax_pages = 3\n");

        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();

        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.api_url, "https://api.github.com");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_explicit_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "api_url = \"https://ghe.example.com/api/v3\"\n");

        let config = Config::load(Utf8Path::new("/nonexistent"), Some(&path)).unwrap();
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_explicit_missing_path_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("missing.toml")).unwrap();
        assert!(Config::load(Utf8Path::new("."), Some(&path)).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_unknown_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "page_sise = 10\n");
        assert!(Config::load(Utf8Path::new("."), Some(&path)).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_invalid_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "page_size = 0\n");
        assert!(Config::load(Utf8Path::new("."), Some(&path)).is_err());
    }
}
