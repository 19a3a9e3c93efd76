use crate::{
    error::{Result, VidGenError},
    models::ConnectionSettings,
    storage::{traits::SettingsStore, SETTINGS_KEY},
};
use std::fs;
use std::path::{Path, PathBuf};

/// Keeps the settings record in a single JSON file.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `sora_settings.json` inside the platform config directory.
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| VidGenError::Config("unable to determine config directory".into()))?;
        Ok(Self::new(
            dir.join("rvidgen").join(format!("{}.json", SETTINGS_KEY)),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<ConnectionSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let settings: ConnectionSettings = serde_json::from_str(&data)?;
        Ok(Some(settings.with_fallback_base_url()))
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> ConnectionSettings {
        match self.read() {
            Ok(Some(settings)) => {
                log::debug!("Loaded settings from {}", self.path.display());
                settings
            }
            Ok(None) => ConnectionSettings::default(),
            Err(e) => {
                log::warn!(
                    "Failed to parse settings at {}, using defaults: {}",
                    self.path.display(),
                    e
                );
                ConnectionSettings::default()
            }
        }
    }

    fn save(&self, settings: &ConnectionSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                VidGenError::Storage(format!(
                    "failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let data = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, data).map_err(|e| {
            VidGenError::Storage(format!(
                "failed to write settings to {}: {}",
                self.path.display(),
                e
            ))
        })?;
        log::info!("Settings saved to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
