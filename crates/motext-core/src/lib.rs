//! # motext-core
//!
//! Error types, settings, and logging setup shared by the motext crates.
//! This crate has no dependency on the catalog or plural crates and provides
//! the foundation for both.
//!
//! ## Modules
//!
//! - [`error`] - Error type, error categories and result alias
//! - [`settings`] - Catalog loading and logging configuration
//! - [`settings_loader`] - Loading [`Settings`] from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{ErrorKind, MotextError, MotextResult};
pub use settings::Settings;
