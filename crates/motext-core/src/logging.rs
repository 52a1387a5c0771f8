//! Logging integration for motext.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-catalog spans.

use crate::settings::Settings;

/// Crate targets a bare level such as `"debug"` is applied to.
pub const MOTEXT_TARGETS: [&str; 4] = ["motext", "motext_core", "motext_plural", "motext_catalog"];

/// Installs a global tracing subscriber configured from `settings`.
///
/// A bare level in `settings.log_level` (e.g. `"debug"`) only enables the
/// motext crates, so a host application's own logging is left alone. Full
/// directives such as `"motext_catalog=trace,warn"` are used as given. An
/// unparsable filter falls back to `info` for the motext crates.
///
/// Debug mode logs in a pretty, human-readable format; otherwise JSON.
/// If a subscriber is already installed, the call does nothing.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter_directives(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives("info")));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .with_current_span(true)
            .try_init()
            .ok();
    }
}

/// Expands `log_level` into filter directives.
///
/// ```
/// use motext_core::logging::filter_directives;
///
/// assert_eq!(
///     filter_directives("debug"),
///     "motext=debug,motext_core=debug,motext_plural=debug,motext_catalog=debug"
/// );
/// assert_eq!(filter_directives("motext_catalog=trace"), "motext_catalog=trace");
/// ```
pub fn filter_directives(log_level: &str) -> String {
    let level = log_level.trim();
    if level.contains(['=', ',']) {
        return level.to_string();
    }
    let level = if level.is_empty() { "info" } else { level };
    MOTEXT_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Creates a tracing span for loading a catalog of `size` bytes.
///
/// # Examples
///
/// ```
/// use motext_core::logging::catalog_span;
///
/// let span = catalog_span(1024);
/// let _guard = span.enter();
/// tracing::debug!("parsing header");
/// ```
pub fn catalog_span(size: usize) -> tracing::Span {
    tracing::debug_span!("catalog", size)
}
