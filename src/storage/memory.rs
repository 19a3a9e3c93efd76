use crate::{
    error::{Result, VidGenError},
    models::ConnectionSettings,
    storage::traits::SettingsStore,
};
use std::sync::RwLock;

#[derive(Default)]
pub struct MemorySettingsStore {
    record: RwLock<Option<ConnectionSettings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ConnectionSettings) -> Self {
        Self {
            record: RwLock::new(Some(settings)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> ConnectionSettings {
        self.record
            .read()
            .ok()
            .and_then(|record| record.clone())
            .unwrap_or_default()
    }

    fn save(&self, settings: &ConnectionSettings) -> Result<()> {
        let mut record = self
            .record
            .write()
            .map_err(|e| VidGenError::Storage(format!("settings lock poisoned: {}", e)))?;
        *record = Some(settings.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn save_replaces_record() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.load(), ConnectionSettings::default());

        let settings = ConnectionSettings::new("https://x/v1", "sk").unwrap();
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn poisoned_lock_fails_save() {
        let store = Arc::new(MemorySettingsStore::new());
        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.record.write().unwrap();
            panic!("poison the settings lock");
        })
        .join();

        let settings = ConnectionSettings::new("https://x/v1", "sk").unwrap();
        let err = store.save(&settings).unwrap_err();
        assert!(matches!(err, VidGenError::Storage(_)));
    }
}
