//! Core error types for motext.
//!
//! A single enum, [`MotextError`], covers every failure the crates can report:
//! malformed catalogs, malformed or failing plural-form expressions, and
//! unreadable configuration. Each variant belongs to one [`ErrorKind`].

use thiserror::Error;

/// The broad category an error belongs to.
///
/// Callers that only care whether a catalog was rejected or a plural rule failed
/// can match on this instead of on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The binary catalog is malformed.
    CatalogFormat,
    /// A plural-form expression could not be compiled or evaluated.
    PluralForm,
    /// Settings could not be loaded.
    Configuration,
}

/// The primary error type for motext.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MotextError {
    // ── Catalog ──────────────────────────────────────────────────────

    /// The catalog header or message tables are invalid.
    #[error("Catalog format error: {0}")]
    CatalogFormatError(String),

    /// A read of `length` bytes at `offset` falls outside a buffer of `size` bytes.
    #[error("Catalog format error: range {offset}..{offset}+{length} exceeds buffer of {size} bytes")]
    OutOfBounds {
        /// Start of the requested range.
        offset: usize,
        /// Length of the requested range.
        length: usize,
        /// Size of the buffer.
        size: usize,
    },

    // ── Plural forms ─────────────────────────────────────────────────

    /// A plural-form expression is malformed, or its evaluation failed.
    #[error("Plural form error: {0}")]
    PluralFormError(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl MotextError {
    /// Returns the category of this error.
    ///
    /// - `CatalogFormatError`, `OutOfBounds` -> [`ErrorKind::CatalogFormat`]
    /// - `PluralFormError` -> [`ErrorKind::PluralForm`]
    /// - `ConfigurationError` -> [`ErrorKind::Configuration`]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CatalogFormatError(_) | Self::OutOfBounds { .. } => ErrorKind::CatalogFormat,
            Self::PluralFormError(_) => ErrorKind::PluralForm,
            Self::ConfigurationError(_) => ErrorKind::Configuration,
        }
    }

    /// Shorthand for building a [`MotextError::CatalogFormatError`].
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::CatalogFormatError(message.into())
    }

    /// Shorthand for building a [`MotextError::PluralFormError`].
    pub fn plural(message: impl Into<String>) -> Self {
        Self::PluralFormError(message.into())
    }
}

/// A convenience type alias for `Result<T, MotextError>`.
pub type MotextResult<T> = Result<T, MotextError>;
