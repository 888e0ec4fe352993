// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for TermDash.
//!
//! Only the `[app]` section is typed. Everything else, most importantly the
//! `[modules.*]` plugin tables, stays in the untyped [`ConfigValue`] tree
//! because plugin tables are open-ended and owned by the plugins.

use serde::{Deserialize, Serialize};
use termdash_core::ConfigValue;

/// Host application settings (`[app]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name shown in the dashboard title bar.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Default tracing level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    /// `log_level` as a tracing directive: trimmed and lowercased.
    pub fn normalized_log_level(&self) -> String {
        self.log_level.trim().to_lowercase()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "termdash".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Compiled defaults merged underneath every configuration file.
#[derive(Debug, Default, Serialize)]
pub(crate) struct Defaults {
    pub app: AppConfig,
}

/// Fully loaded configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermdashConfig {
    /// Typed `[app]` section.
    pub app: AppConfig,
    /// The whole merged tree, including `app` and `modules`.
    pub tree: ConfigValue,
}

impl TermdashConfig {
    /// The `modules` section, if present.
    pub fn modules(&self) -> Option<&ConfigValue> {
        self.tree.get("modules")
    }
}
