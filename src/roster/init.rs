use crate::api::{RosterApi, RosterPaths};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::store::fs::FsBackend;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "ROSTER_DATA_DIR";

pub struct RosterContext {
    pub api: RosterApi<FsBackend>,
    pub config: RosterConfig,
}

/// Resolves the data directory: explicit override, then `ROSTER_DATA_DIR`,
/// then the platform data directory.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_override {
        return Ok(dir);
    }

    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("com", "roster", "roster")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RosterError::Store("Could not determine data directory".into()))
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<RosterContext> {
    let data_dir = resolve_data_dir(data_override)?;
    debug!(data_dir = %data_dir.display(), "initializing roster");

    let config = RosterConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "config.json is unreadable, using defaults");
        RosterConfig::default()
    });

    let backend = FsBackend::new(data_dir.clone());
    let paths = RosterPaths { data_dir };
    let api = RosterApi::new(backend, config.clone(), paths);

    Ok(RosterContext { api, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_override_wins() {
        let temp = TempDir::new().unwrap();
        let dir = resolve_data_dir(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(dir, temp.path());
    }

    #[test]
    fn test_initialize_uses_config_keys() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.json"),
            r#"{"records_key": "term-2"}"#,
        )
        .unwrap();
        fs::write(
            temp.path().join("term-2.json"),
            r#"[{"id":"STU-1","name":"Ada","email":"ada@example.com","course":"Mathematics","status":"active","enrollmentDate":"2024-01-10"}]"#,
        )
        .unwrap();

        let ctx = initialize(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(ctx.config.records_key, "term-2");
        assert_eq!(ctx.api.students().len(), 1);
        assert_eq!(ctx.api.paths().data_dir, temp.path());
    }

    #[test]
    fn test_initialize_tolerates_broken_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), "{ nope").unwrap();

        let ctx = initialize(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(ctx.config, RosterConfig::default());
        assert!(ctx.api.students().is_empty());
    }
}
