pub mod file;
pub mod memory;
pub mod traits;

use crate::{config::AppConfig, error::Result, models::ConnectionSettings};
use std::sync::Arc;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;
pub use traits::SettingsStore;

/// The one well-known key the settings record lives under.
pub const SETTINGS_KEY: &str = "sora_settings";

/// Opens the store named by the config, or the platform default location.
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn SettingsStore>> {
    let store = match &config.settings_path {
        Some(path) => FileSettingsStore::new(path),
        None => FileSettingsStore::default_location()?,
    };
    Ok(Arc::new(store))
}

/// The explicit save action: trims and requires both fields, then persists
/// immediately.
pub fn save_settings(
    store: &dyn SettingsStore,
    base_url: &str,
    api_key: &str,
) -> Result<ConnectionSettings> {
    let settings = ConnectionSettings::new(base_url, api_key)?;
    store.save(&settings)?;
    Ok(settings)
}
