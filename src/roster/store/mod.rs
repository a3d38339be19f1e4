//! # Storage Layer
//!
//! Persistence is a flat key-value facility: each key holds one JSON document.
//! The [`StorageBackend`] trait is the "how" (filesystem vs memory), while the
//! typed stores are the "what":
//!
//! - [`records::RecordStore`]: the authoritative student list, written as a full
//!   snapshot under a single key after every mutation
//! - [`settings::SettingsStore`]: the display preferences, under their own key
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: Production storage, one `<key>.json` file per key
//! - [`memory::MemBackend`]: In-memory storage for testing
//!
//! ## Storage Format
//!
//! For `FsBackend`:
//! ```text
//! <data dir>/
//! ├── student-management-system-data.json   # JSON array of students
//! ├── app-settings.json                     # JSON settings object
//! └── config.json                           # Roster configuration
//! ```
//!
//! There is no diff persistence and no transaction log. Every write replaces the
//! whole value.

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod records;
pub mod settings;

pub use records::{RecordStore, SubscriptionId};
pub use settings::SettingsStore;

/// Default key for the student list.
pub const RECORDS_KEY: &str = "student-management-system-data";

/// Default key for the settings object.
pub const SETTINGS_KEY: &str = "app-settings";

/// Abstract interface for raw key-value I/O.
///
/// All methods take `&self`; implementations needing mutation use interior
/// mutability (the application is single-threaded).
pub trait StorageBackend {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic: a reader sees either the old or the new value, never a mix.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}
