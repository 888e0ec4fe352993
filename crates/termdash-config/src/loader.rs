// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./termdash.toml` over
//! `~/.config/termdash/termdash.toml` over `/etc/termdash/termdash.toml`, with
//! environment variable overrides via the `TERMDASH_` prefix. Nested keys use a double underscore, so
//! `TERMDASH_MODULES__CORE__CLOCK__ENABLED=true` maps to
//! `modules.core.clock.enabled`.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use termdash_core::ConfigValue;
use tracing::debug;

use crate::model::{AppConfig, Defaults, TermdashConfig};

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/termdash/termdash.toml` (system-wide)
/// 3. `~/.config/termdash/termdash.toml` (user XDG config)
/// 4. `./termdash.toml` (local directory)
/// 5. `TERMDASH_*` environment variables
pub fn load_config() -> Result<TermdashConfig, figment::Error> {
    extract(build_figment())
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TermdashConfig, figment::Error> {
    extract(
        Figment::new()
            .merge(Serialized::defaults(Defaults::default()))
            .merge(Toml::string(toml_content)),
    )
}

/// Load configuration from a specific file path with env var overrides.
///
/// Unlike the standard hierarchy, the file must exist.
pub fn load_config_from_path(path: &Path) -> Result<TermdashConfig, figment::Error> {
    extract(
        Figment::new()
            .merge(Serialized::defaults(Defaults::default()))
            .merge(Toml::file_exact(path))
            .merge(env_provider()),
    )
}

/// Build the Figment used for the standard hierarchy.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Defaults::default()))
        .merge(Toml::file("/etc/termdash/termdash.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("termdash/termdash.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("termdash.toml"))
        .merge(env_provider())
}

/// Extract both the typed `[app]` section and the untyped tree.
pub fn extract(figment: Figment) -> Result<TermdashConfig, figment::Error> {
    let app: AppConfig = figment.extract_inner("app")?;
    let tree: ConfigValue = figment.extract()?;
    debug!(
        modules = tree.get("modules").map(ConfigValue::kind_name).unwrap_or("absent"),
        "configuration loaded"
    );
    Ok(TermdashConfig { app, tree })
}

/// Parse a standalone TOML document into a config tree, without defaults.
///
/// Handy for building `modules` trees to hand directly to the plugin manager.
pub fn parse_tree(toml_content: &str) -> Result<ConfigValue, toml::de::Error> {
    toml::from_str(toml_content)
}

fn env_provider() -> Env {
    Env::prefixed("TERMDASH_").split("__")
}
