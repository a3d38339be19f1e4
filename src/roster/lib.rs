//! # Roster Architecture
//!
//! Roster is a **UI-agnostic student records library** with a command-line client on top.
//! The library keeps an ordered list of student records and a small settings object in a
//! key-value store, each value serialized as JSON.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, handles terminal I/O│
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the stores               │
//! │  - Supplies today's date and the export directory           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, user-facing messages                     │
//! │  - Returns `Result<CmdResult>`, never prints                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore and SettingsStore over a StorageBackend      │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence
//!
//! Every mutation of the record list replaces the whole persisted value under one key
//! (`student-management-system-data` by default). Settings live under `app-settings`.
//! Unreadable stored values are treated as absent: the store opens empty (or with default
//! settings) and logs a warning.
//!
//! ## Testing Strategy
//!
//! 1. **Store and commands**: unit tests against `MemBackend`, which can simulate write
//!    failures and counts writes.
//! 2. **API** (`api.rs`): dispatch tests.
//! 3. **CLI**: end-to-end tests in `tests/` using `assert_cmd` and a temporary data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Record and settings stores plus storage backends
//! - [`model`]: Core data types (`Student`, `Status`, `Settings`)
//! - [`sample`]: The built-in sample data set
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and API construction
//! - [`error`]: Error types
//! - `cli`: Argument parsing, logging setup and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod sample;
pub mod store;
