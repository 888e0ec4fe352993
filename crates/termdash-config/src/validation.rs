// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Plugin tables are not validated here; their `enabled` flags are checked
//! by the plugin manager, which records mismatches as diagnostics instead of
//! refusing to start.

use crate::diagnostic::{suggest_key, ConfigError};
use crate::model::TermdashConfig;

/// Levels accepted by `app.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a loaded configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &TermdashConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.app.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.name must not be empty".to_string(),
        });
    }

    let level = config.app.normalized_log_level();
    if !LOG_LEVELS.contains(&level.as_str()) {
        let hint = suggest_key(&level, LOG_LEVELS)
            .map(|s| format!(" (did you mean `{s}`?)"))
            .unwrap_or_default();
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of {}{hint}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
