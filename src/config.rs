use crate::{
    error::{Result, VidGenError},
    logger::LogLevel,
    models::ConnectionSettings,
};
use std::env;
use std::path::PathBuf;

const ENV_BASE_URL: &str = "RVIDGEN_BASE_URL";
const ENV_API_KEY: &str = "RVIDGEN_API_KEY";
const ENV_SETTINGS_PATH: &str = "RVIDGEN_SETTINGS_PATH";
const ENV_LOG_LEVEL: &str = "RVIDGEN_LOG_LEVEL";
const ENV_DOWNLOAD_DIR: &str = "RVIDGEN_DOWNLOAD_DIR";

/// Process-level configuration. The connection overrides apply to the
/// current run only and are never written back to the settings store.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub settings_path: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub download_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let log_level = match non_empty_env(ENV_LOG_LEVEL) {
            Some(value) => Some(value.parse::<LogLevel>().map_err(|e| {
                VidGenError::Config(format!("{} is invalid: {}", ENV_LOG_LEVEL, e))
            })?),
            None => None,
        };

        Ok(AppConfig {
            base_url: non_empty_env(ENV_BASE_URL),
            api_key: non_empty_env(ENV_API_KEY),
            settings_path: non_empty_env(ENV_SETTINGS_PATH).map(PathBuf::from),
            log_level,
            download_dir: non_empty_env(ENV_DOWNLOAD_DIR).map(PathBuf::from),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Layers the overrides on top of stored settings.
    pub fn apply_to(&self, mut settings: ConnectionSettings) -> ConnectionSettings {
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.trim().to_string();
        }
        if let Some(api_key) = &self.api_key {
            settings.api_key = api_key.trim().to_string();
        }
        settings
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_stored_values() {
        let stored = ConnectionSettings::new("https://stored/v1", "sk-stored").unwrap();
        let config = AppConfig::new().with_api_key(" sk-env ");

        let effective = config.apply_to(stored);
        assert_eq!(effective.base_url, "https://stored/v1");
        assert_eq!(effective.api_key, "sk-env");
    }

    #[test]
    fn empty_config_keeps_settings() {
        let stored = ConnectionSettings::default();
        assert_eq!(AppConfig::new().apply_to(stored.clone()), stored);
    }
}
