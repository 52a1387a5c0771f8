//! # motext
//!
//! Reads compiled gettext message catalogs (`.mo` files) and selects plural
//! forms with each catalog's own `Plural-Forms` rule.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `motext` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! ## Quick Start
//!
//! ```no_run
//! use motext::{Catalog, Settings};
//!
//! let settings = Settings::default();
//! motext::core::logging::setup_logging(&settings);
//!
//! let bytes = std::fs::read("locale/pl/LC_MESSAGES/shop.mo").unwrap();
//! let catalog = Catalog::with_settings(bytes, &settings).unwrap();
//! println!("{}", catalog.ngettext("{} item", "{} items", 3));
//! ```

/// Error type, settings, settings loaders and logging setup.
pub use motext_core as core;

/// Plural-form expression lexer, parser and evaluator.
#[cfg(feature = "plural")]
pub use motext_plural as plural;

/// Catalog parsing and message lookup.
#[cfg(feature = "catalog")]
pub use motext_catalog as catalog;

pub use motext_core::{ErrorKind, MotextError, MotextResult, Settings};

#[cfg(feature = "plural")]
pub use motext_plural::Expression;

#[cfg(feature = "catalog")]
pub use motext_catalog::{ByteOrder, Catalog, Metadata};

pub use tracing;
pub use tracing_subscriber;
