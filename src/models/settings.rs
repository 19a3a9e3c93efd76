use crate::error::{Result, VidGenError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Where to send requests and how to authenticate. Persisted as
/// `{ "baseUrl": ..., "apiKey": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionSettings {
    pub base_url: String,
    pub api_key: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl ConnectionSettings {
    /// Builds settings the way the save action does: both fields trimmed and
    /// required.
    pub fn new(base_url: impl AsRef<str>, api_key: impl AsRef<str>) -> Result<Self> {
        let base_url = base_url.as_ref().trim();
        let api_key = api_key.as_ref().trim();

        if base_url.is_empty() {
            return Err(VidGenError::Config("Base URL is required.".into()));
        }
        if api_key.is_empty() {
            return Err(VidGenError::Config("API Key is required.".into()));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Restores the default base URL when a stored record leaves it blank.
    pub fn with_fallback_base_url(mut self) -> Self {
        if self.base_url.trim().is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        }
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Base URL with exactly one trailing slash removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.strip_suffix('/').unwrap_or(&self.base_url)
    }

    /// Credential safe to print in logs.
    pub fn masked_api_key(&self) -> String {
        let key = self.api_key.trim();
        if key.is_empty() {
            return "<unset>".to_string();
        }
        let visible: String = key.chars().take(3).collect();
        format!("{}... ({} chars)", visible, key.chars().count())
    }
}
