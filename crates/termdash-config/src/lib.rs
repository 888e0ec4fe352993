// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for TermDash.
//!
//! Loads the layered TOML hierarchy plus `TERMDASH_*` environment overrides
//! with Figment, validates the typed `[app]` section, and exposes the whole
//! merged tree as a format-independent [`termdash_core::ConfigValue`] for the
//! plugin manager.
//!
//! # Usage
//!
//! ```no_run
//! use termdash_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("modules configured: {}", config.modules().is_some());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str, parse_tree};
pub use model::{AppConfig, TermdashConfig};

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<TermdashConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from an explicit file and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<TermdashConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path))
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<TermdashConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

#[allow(clippy::result_large_err)]
fn finish(loaded: Result<TermdashConfig, figment::Error>) -> Result<TermdashConfig, Vec<ConfigError>> {
    let config = loaded.map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    Ok(config)
}
