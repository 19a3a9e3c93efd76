use crate::{error::Result, models::ConnectionSettings};

/// Key-value persistence for connection settings: load on start, save on
/// change.
pub trait SettingsStore: Send + Sync {
    /// Never fails. A missing or unreadable record yields the defaults.
    fn load(&self) -> ConnectionSettings;

    fn save(&self, settings: &ConnectionSettings) -> Result<()>;

    /// Human-readable location, for status output.
    fn describe(&self) -> String;
}
