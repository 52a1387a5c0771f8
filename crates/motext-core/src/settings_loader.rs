//! Settings loading from configuration files.
//!
//! This module loads [`Settings`] from TOML files, JSON files, and applies
//! environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `MOTEXT_LOG_LEVEL` | `log_level` |
//! | `MOTEXT_DEBUG` | `debug` |
//! | `MOTEXT_ACCEPT_BIG_ENDIAN` | `accept_big_endian` |
//! | `MOTEXT_MAX_EXPRESSION_DEPTH` | `max_expression_depth` |
//!
//! `verify_sort_order` can only be turned off from a configuration file.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use motext_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/motext.toml").unwrap();
//! let settings = settings_loader::from_toml_file_with_env("config/motext.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::MotextError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns a `ConfigurationError` if the TOML is malformed or has fields of the
/// wrong type.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, MotextError> {
    toml::from_str(toml_str)
        .map_err(|e| MotextError::ConfigurationError(format!("Failed to parse TOML: {e}")))
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, MotextError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, MotextError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns a `ConfigurationError` if the JSON is malformed.
pub fn from_json_str(json_str: &str) -> Result<Settings, MotextError> {
    serde_json::from_str(json_str)
        .map_err(|e| MotextError::ConfigurationError(format!("Failed to parse JSON: {e}")))
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, MotextError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Boolean variables accept `"true"`, `"1"` and `"yes"` (case-insensitive) as
/// true and anything else as false. `MOTEXT_MAX_EXPRESSION_DEPTH` is ignored
/// unless it parses as an unsigned integer.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("MOTEXT_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("MOTEXT_DEBUG") {
        settings.debug = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("MOTEXT_ACCEPT_BIG_ENDIAN") {
        settings.accept_big_endian = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("MOTEXT_MAX_EXPRESSION_DEPTH") {
        if let Ok(depth) = val.trim().parse::<usize>() {
            settings.max_expression_depth = depth;
        }
    }
}

fn parse_flag(val: &str) -> bool {
    matches!(val.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> Result<String, MotextError> {
    std::fs::read_to_string(path).map_err(|e| {
        MotextError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            log_level = "motext_catalog=debug"
            verify_sort_order = false
            max_expression_depth = 16
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.log_level, "motext_catalog=debug");
        assert!(!settings.verify_sort_order);
        assert_eq!(settings.max_expression_depth, 16);
        // Defaults preserved
        assert!(settings.accept_big_endian);
        assert!(!settings.debug);
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let err = from_toml_str("verify_sort_order = \"maybe\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = true").unwrap();
        let settings = from_toml_file(file.path()).unwrap();
        assert!(settings.debug);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = from_toml_file("/nonexistent/motext.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read TOML file"));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let settings = from_json_str(r#"{"accept_big_endian": false}"#).unwrap();
        assert!(!settings.accept_big_endian);
        assert!(settings.verify_sort_order);
    }

    #[test]
    fn test_from_json_str_invalid() {
        let err = from_json_str("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_expression_depth": 8}}"#).unwrap();
        let settings = from_json_file(file.path()).unwrap();
        assert_eq!(settings.max_expression_depth, 8);
    }

    // ── Environment overrides ───────────────────────────────────────

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("YES"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }

    #[test]
    fn test_apply_env_overrides() {
        std::env::set_var("MOTEXT_ACCEPT_BIG_ENDIAN", "no");
        std::env::set_var("MOTEXT_MAX_EXPRESSION_DEPTH", "12");
        let settings = from_env();
        std::env::remove_var("MOTEXT_ACCEPT_BIG_ENDIAN");
        std::env::remove_var("MOTEXT_MAX_EXPRESSION_DEPTH");

        assert!(!settings.accept_big_endian);
        assert_eq!(settings.max_expression_depth, 12);
    }

    #[test]
    fn test_sort_check_is_not_an_env_override() {
        std::env::set_var("MOTEXT_VERIFY_SORT_ORDER", "false");
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings);
        std::env::remove_var("MOTEXT_VERIFY_SORT_ORDER");

        assert!(settings.verify_sort_order);
    }
}
