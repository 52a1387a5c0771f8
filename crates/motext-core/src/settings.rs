//! Settings for catalog loading and logging.
//!
//! [`Settings`] collects the knobs that change how strictly a catalog is
//! validated and how the plural-form compiler bounds its input, together with
//! the logging configuration consumed by [`setup_logging`](crate::logging::setup_logging).

use serde::{Deserialize, Serialize};

/// Default nesting limit for plural-form expressions.
pub const DEFAULT_MAX_EXPRESSION_DEPTH: usize = 64;

/// The complete set of motext settings.
///
/// # Examples
///
/// ```
/// use motext_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.verify_sort_order);
/// assert_eq!(settings.max_expression_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Logging ──────────────────────────────────────────────────────

    /// The log filter directive (e.g. `"info"`, `"motext_catalog=debug"`).
    pub log_level: String,
    /// Pretty, human-readable log output when `true`; JSON otherwise.
    pub debug: bool,

    // ── Catalog loading ──────────────────────────────────────────────

    /// Reject catalogs whose original messages are empty or out of order.
    ///
    /// Lookups binary-search the original messages, so with this off an
    /// unsorted catalog loads but returns wrong or missing translations.
    /// Only for catalogs already known to be sorted.
    pub verify_sort_order: bool,
    /// Accept catalogs written on big-endian hosts (byte-swapped magic number).
    pub accept_big_endian: bool,

    // ── Plural forms ─────────────────────────────────────────────────

    /// Maximum nesting of unary, parenthesised and conditional sub-expressions.
    pub max_expression_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            debug: false,
            verify_sort_order: true,
            accept_big_endian: true,
            max_expression_depth: DEFAULT_MAX_EXPRESSION_DEPTH,
        }
    }
}
