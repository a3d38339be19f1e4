//! # CLI Layer
//!
//! One possible UI client for roster; the library does not depend on it.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Uses `std::process::exit` (through `main.rs`)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` plus one `handle_*` per command
//! - `render`: layout math and template rendering
//! - `templates`: the minijinja templates
//! - `styles`: light and dark themes
//! - `logging`: tracing subscriber setup

pub mod commands;
pub mod logging;
pub mod render;
pub mod setup;
pub mod styles;
pub mod templates;

pub use commands::run;
