use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::{error::WeatherError, query};

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Validated settings handed to the query builder and fetcher.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Config {
    /// Load config from the default location, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-gpt", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: &str) -> Result<()> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(anyhow!("API key must not be empty"));
        }
        self.api_key = Some(api_key.to_string());
        Ok(())
    }

    /// Resolve settings, letting `WEATHER_API_KEY` override the stored key.
    pub fn resolve(&self) -> Result<Settings, WeatherError> {
        self.resolve_with(std::env::var(API_KEY_ENV).ok())
    }

    /// Resolve settings with an explicit override key instead of the process environment.
    pub fn resolve_with(&self, env_api_key: Option<String>) -> Result<Settings, WeatherError> {
        let api_key = env_api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                WeatherError::configuration(format!(
                    "No API key configured.\n\
                     Hint: run `weather configure` or set {API_KEY_ENV}."
                ))
            })?;

        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim().to_string();
        query::endpoint(&base_url)?;

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(WeatherError::configuration("timeout_secs must be greater than zero"));
        }

        Ok(Settings {
            base_url,
            api_key: api_key.trim().to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolve_errors_when_no_key() {
        let cfg = Config::default();
        let err = cfg.resolve_with(None).unwrap_err();

        assert!(matches!(err, WeatherError::Configuration(_)));
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let cfg = Config { api_key: Some("   ".into()), ..Default::default() };
        assert!(cfg.resolve_with(Some(String::new())).is_err());
    }

    #[test]
    fn env_key_overrides_file_key() {
        let cfg = Config { api_key: Some("FILE_KEY".into()), ..Default::default() };

        let settings = cfg.resolve_with(Some("ENV_KEY".into())).unwrap();
        assert_eq!(settings.api_key, "ENV_KEY");

        let settings = cfg.resolve_with(None).unwrap();
        assert_eq!(settings.api_key, "FILE_KEY");
    }

    #[test]
    fn defaults_apply() {
        let settings = Config::default().resolve_with(Some("k".into())).unwrap();

        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn malformed_base_url_is_configuration_error() {
        let cfg = Config { base_url: Some("nope".into()), ..Default::default() };
        let err = cfg.resolve_with(Some("k".into())).unwrap_err();
        assert!(matches!(err, WeatherError::Configuration(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = Config { timeout_secs: Some(0), ..Default::default() };
        assert!(cfg.resolve_with(Some("k".into())).is_err());
    }

    #[test]
    fn set_api_key_rejects_blank() {
        let mut cfg = Config::default();
        assert!(cfg.set_api_key(" ").is_err());

        cfg.set_api_key(" KEY ").unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:8080".into()),
            timeout_secs: Some(3),
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
