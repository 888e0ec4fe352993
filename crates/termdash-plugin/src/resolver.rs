// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flattening of the `[modules.*]` tree and enable resolution.
//!
//! A mapping node is a plugin table iff it has an `enabled` key; any other
//! mapping is a namespace whose children are flattened with a dotted prefix.
//! Only an exact boolean `true` enables a plugin.

use std::collections::BTreeMap;

use termdash_core::{ConfigKey, ConfigMap, ConfigValue, PluginConfig, PluginErrorKind, Stage};
use tracing::debug;

use crate::diagnostics::DiagnosticLog;
use crate::registry::PluginState;

/// Top-level section holding plugin tables.
pub const MODULES_KEY: &str = "modules";

/// Key marking a mapping node as a plugin table.
pub const ENABLED_KEY: &str = "enabled";

/// Per-plugin records keyed by dotted plugin id.
pub type ConfigTable = BTreeMap<String, PluginConfig>;

/// Interpretation of a record's `enabled` value.
#[derive(Debug, Clone, PartialEq)]
pub enum EnabledFlag {
    Enabled,
    /// Explicit `false`, or no `enabled` key at all.
    Disabled,
    /// Present but not a boolean.
    Invalid(ConfigValue),
}

/// Flattens the `modules` section into per-plugin records.
///
/// A missing or non-mapping `modules` section yields an empty table.
pub fn flatten(config: &ConfigValue) -> ConfigTable {
    let mut table = ConfigTable::new();
    if let Some(modules) = config.get(MODULES_KEY).and_then(ConfigValue::as_map) {
        walk("", modules, &mut table);
    }
    table
}

fn walk(prefix: &str, node: &ConfigMap, table: &mut ConfigTable) {
    let enabled_key = ConfigKey::String(ENABLED_KEY.to_string());

    for (key, value) in node {
        let (Some(key), Some(child)) = (key.as_str(), value.as_map()) else {
            continue;
        };

        let id = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };

        if child.contains_key(&enabled_key) {
            table.insert(id, PluginConfig::from_map(child));
        } else {
            walk(&id, child, table);
        }
    }
}

/// Reads `enabled` from a record, defaulting to disabled.
pub fn enabled_flag(record: &PluginConfig) -> EnabledFlag {
    match record.get(ENABLED_KEY) {
        None => EnabledFlag::Disabled,
        Some(ConfigValue::Bool(true)) => EnabledFlag::Enabled,
        Some(ConfigValue::Bool(false)) => EnabledFlag::Disabled,
        Some(other) => EnabledFlag::Invalid(other.clone()),
    }
}

/// Ids whose `enabled` is exactly `true`, sorted.
///
/// Every non-boolean `enabled` value is excluded and recorded.
pub fn enabled_ids(config: &ConfigValue, log: &mut DiagnosticLog) -> Vec<String> {
    let mut ids = Vec::new();
    for (id, record) in flatten(config) {
        match enabled_flag(&record) {
            EnabledFlag::Enabled => ids.push(id),
            EnabledFlag::Disabled => debug!(plugin = %id, "plugin disabled by configuration"),
            EnabledFlag::Invalid(value) => record_mismatch(log, &id, &value),
        }
    }
    ids
}

/// Whether one plugin is enabled.
///
/// An unconfigured id is simply `false`; a non-boolean value is `false` and
/// recorded.
pub fn is_enabled(id: &str, config: &ConfigValue, log: &mut DiagnosticLog) -> bool {
    let table = flatten(config);
    let Some(record) = table.get(id) else {
        return false;
    };

    match enabled_flag(record) {
        EnabledFlag::Enabled => true,
        EnabledFlag::Disabled => false,
        EnabledFlag::Invalid(value) => {
            record_mismatch(log, id, &value);
            false
        }
    }
}

/// Classifies one id without recording anything.
pub fn plugin_state(id: &str, table: &ConfigTable) -> PluginState {
    match table.get(id).map(enabled_flag) {
        None => PluginState::NotConfigured,
        Some(EnabledFlag::Enabled) => PluginState::Enabled,
        Some(EnabledFlag::Disabled) => PluginState::Disabled,
        Some(EnabledFlag::Invalid(_)) => PluginState::Misconfigured,
    }
}

fn record_mismatch(log: &mut DiagnosticLog, id: &str, value: &ConfigValue) {
    log.record(
        id,
        Stage::Load,
        PluginErrorKind::ConfigTypeMismatch {
            found: value.kind_name().to_string(),
        },
        format!("plugin `{id}` has non-boolean `enabled` value {value}; treating it as disabled"),
    );
}
