use super::StorageBackend;
use crate::error::Result;
use crate::model::{Settings, SettingsPatch};
use tracing::{debug, warn};

/// Owner of the persisted [`Settings`] value.
pub struct SettingsStore<B: StorageBackend> {
    backend: B,
    key: String,
    settings: Settings,
}

impl<B: StorageBackend> SettingsStore<B> {
    /// Opens the store; a missing or unreadable value falls back to defaults.
    pub fn open(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let settings = match backend.read(&key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "stored settings are malformed, using defaults");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!(key = %key, error = %e, "could not read stored settings, using defaults");
                Settings::default()
            }
        };
        Self {
            backend,
            key,
            settings,
        }
    }

    pub fn close(self) -> B {
        self.backend
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Merges `patch` and persists the whole value.
    pub fn update(&mut self, patch: &SettingsPatch) -> Result<Settings> {
        let mut next = self.settings;
        next.apply(patch);

        let raw = serde_json::to_string(&next)?;
        self.backend.write(&self.key, &raw)?;
        self.settings = next;

        debug!(?next, "settings updated");
        Ok(next)
    }
}
