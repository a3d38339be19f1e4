use crate::error::{Result, RosterError};
use crate::store::{RECORDS_KEY, SETTINGS_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Storage key that would collide with the config file itself.
const RESERVED_KEY: &str = "config";

/// Keys accepted by [`RosterConfig::get`] and [`RosterConfig::set`].
pub const CONFIG_KEYS: [&str; 3] = ["records-key", "settings-key", "export-dir"];

/// Configuration for roster, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterConfig {
    /// Storage key holding the student list
    #[serde(default = "default_records_key")]
    pub records_key: String,

    /// Storage key holding the settings object
    #[serde(default = "default_settings_key")]
    pub settings_key: String,

    /// Directory where exports and reports are written (current directory if unset)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

fn default_records_key() -> String {
    RECORDS_KEY.to_string()
}

fn default_settings_key() -> String {
    SETTINGS_KEY.to_string()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            records_key: default_records_key(),
            settings_key: default_settings_key(),
            export_dir: None,
        }
    }
}

impl RosterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RosterError::Io)?;
        let config: RosterConfig =
            serde_json::from_str(&content).map_err(RosterError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RosterError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RosterError::Serialization)?;
        fs::write(config_path, content).map_err(RosterError::Io)?;
        Ok(())
    }

    /// Directory for exported files, falling back to `fallback`.
    pub fn export_dir_or(&self, fallback: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| fallback.to_path_buf())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "records-key" => Ok(self.records_key.clone()),
            "settings-key" => Ok(self.settings_key.clone()),
            "export-dir" => Ok(self
                .export_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            other => Err(unknown_key(other)),
        }
    }

    /// Checks that both storage keys are usable file stems and do not overlap.
    pub fn validate(&self) -> Result<()> {
        check_storage_key("records-key", &self.records_key)?;
        check_storage_key("settings-key", &self.settings_key)?;
        if self.records_key == self.settings_key {
            return Err(RosterError::Api(format!(
                "records-key and settings-key must differ (both are {})",
                self.records_key
            )));
        }
        Ok(())
    }

    /// Sets `key` to `value`. An empty `export-dir` value clears it.
    /// Storage keys are validated before anything changes.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "records-key" | "settings-key" => {
                let mut next = self.clone();
                if key == "records-key" {
                    next.records_key = value.to_string();
                } else {
                    next.settings_key = value.to_string();
                }
                next.validate()?;
                *self = next;
                Ok(())
            }
            "export-dir" => {
                self.export_dir = (!value.is_empty()).then(|| PathBuf::from(value));
                Ok(())
            }
            other => Err(unknown_key(other)),
        }
    }
}

/// Storage keys become `<data dir>/<key>.json`, so they must stay a plain file stem.
fn check_storage_key(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RosterError::Api(format!("{} cannot be empty", name)));
    }
    if value.contains('/') || value.contains('\\') || value.contains("..") {
        return Err(RosterError::Api(format!(
            "{} cannot contain path separators or '..': {}",
            name, value
        )));
    }
    if value == RESERVED_KEY {
        return Err(RosterError::Api(format!(
            "{} cannot be '{}', which is reserved for the config file",
            name, RESERVED_KEY
        )));
    }
    Ok(())
}

fn unknown_key(key: &str) -> RosterError {
    RosterError::Api(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RosterConfig::default();
        assert_eq!(config.records_key, "student-management-system-data");
        assert_eq!(config.settings_key, "app-settings");
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = RosterConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, RosterConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let mut config = RosterConfig::default();
        config.set("export-dir", "/tmp/exports").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = RosterConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.export_dir, Some(PathBuf::from("/tmp/exports")));
        assert_eq!(loaded.get("export-dir").unwrap(), "/tmp/exports");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"records_key": "other"}"#).unwrap();

        let loaded = RosterConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.records_key, "other");
        assert_eq!(loaded.settings_key, "app-settings");
    }

    #[test]
    fn test_set_rejects_unknown_and_empty() {
        let mut config = RosterConfig::default();
        assert!(config.set("colour", "blue").is_err());
        assert!(config.set("records-key", "  ").is_err());
        config.set("export-dir", "").unwrap();
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_set_rejects_shared_storage_key() {
        let mut config = RosterConfig::default();
        assert!(config.set("records-key", "app-settings").is_err());
        assert!(config
            .set("settings-key", "student-management-system-data")
            .is_err());
        assert_eq!(config, RosterConfig::default());
    }

    #[test]
    fn test_set_rejects_reserved_config_key() {
        let mut config = RosterConfig::default();
        assert!(config.set("records-key", "config").is_err());
        assert!(config.set("settings-key", "config").is_err());
        assert_eq!(config, RosterConfig::default());
    }

    #[test]
    fn test_set_rejects_path_like_keys() {
        let mut config = RosterConfig::default();
        for bad in ["../x", "a/b", "a\\b", "..", "up..dir"] {
            assert!(config.set("records-key", bad).is_err(), "accepted {}", bad);
            assert!(config.set("settings-key", bad).is_err(), "accepted {}", bad);
        }
        assert_eq!(config, RosterConfig::default());
    }

    #[test]
    fn test_set_accepts_distinct_plain_keys() {
        let mut config = RosterConfig::default();
        config.set("records-key", "class-of-2025").unwrap();
        config.set("settings-key", "class-of-2025-settings").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.get("records-key").unwrap(), "class-of-2025");
    }

    #[test]
    fn test_load_rejects_overlapping_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"records_key": "shared", "settings_key": "shared"}"#,
        )
        .unwrap();
        assert!(RosterConfig::load(dir.path()).is_err());
    }
}
