// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manager facade.
//!
//! Owns the extension source, the registry, and the diagnostic log. No
//! operation here returns an error or lets a plugin panic escape; every
//! failure becomes a [`PluginDiagnostic`].

use std::sync::Arc;

use termdash_core::{
    ConfigValue, ExtensionSource, HostContext, PluginDescriptor, PluginErrorKind, Stage,
    ENTRYPOINT_GROUP,
};
use tracing::info;

use crate::catalog::BuiltinSource;
use crate::diagnostics::{DiagnosticLog, PluginDiagnostic};
use crate::discovery;
use crate::loader::{self, PluginInstance};
use crate::registry::{PluginRegistry, PluginState};
use crate::resolver::{self, ConfigTable};

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Discovers, resolves, and instantiates plugins.
pub struct PluginManager {
    source: Box<dyn ExtensionSource>,
    group: String,
    registry: PluginRegistry,
    errors: DiagnosticLog,
}

impl PluginManager {
    /// Manager over the compiled-in catalog.
    pub fn new() -> Self {
        Self::with_source(BuiltinSource)
    }

    /// Manager over any extension source, reading the standard group.
    pub fn with_source(source: impl ExtensionSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            group: ENTRYPOINT_GROUP.to_string(),
            registry: PluginRegistry::new(),
            errors: DiagnosticLog::new(),
        }
    }

    /// Reads a different extension group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Rebuilds the registry from the extension source.
    pub fn discover(&mut self) -> &PluginRegistry {
        discovery::discover(
            self.source.as_ref(),
            &self.group,
            &mut self.registry,
            &mut self.errors,
        );
        &self.registry
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Discovered plugin ids, sorted.
    pub fn list_plugins(&self) -> Vec<String> {
        self.registry.ids().map(str::to_string).collect()
    }

    pub fn get_plugin(&self, id: &str) -> Option<&Arc<dyn PluginDescriptor>> {
        self.registry.get(id)
    }

    pub fn is_installed(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    /// Flattened per-plugin records from the `modules` section.
    pub fn get_configured_plugins(&self, config: &ConfigValue) -> ConfigTable {
        resolver::flatten(config)
    }

    /// Ids with `enabled = true`, sorted. Installation is not checked.
    pub fn get_enabled_plugin_ids(&mut self, config: &ConfigValue) -> Vec<String> {
        resolver::enabled_ids(config, &mut self.errors)
    }

    pub fn is_enabled(&mut self, id: &str, config: &ConfigValue) -> bool {
        resolver::is_enabled(id, config, &mut self.errors)
    }

    /// Loads one plugin regardless of its enabled state.
    pub fn load_plugin(
        &mut self,
        id: &str,
        host: &HostContext,
        config: &ConfigValue,
    ) -> Option<PluginInstance> {
        loader::load_one(&self.registry, id, host, config, &mut self.errors)
    }

    /// Loads every enabled plugin, in id order.
    ///
    /// Enabled ids missing from the registry are recorded as
    /// `EnabledButMissing` and skipped.
    pub fn load_enabled(&mut self, host: &HostContext, config: &ConfigValue) -> Vec<PluginInstance> {
        let ids = self.get_enabled_plugin_ids(config);
        let mut loaded = Vec::with_capacity(ids.len());

        for id in &ids {
            if !self.registry.contains(id) {
                let message = match self.suggest_installed(id) {
                    Some(similar) => format!(
                        "plugin `{id}` is enabled in config but not installed (did you mean `{similar}`?)"
                    ),
                    None => format!("plugin `{id}` is enabled in config but not installed"),
                };
                self.errors
                    .record(id.as_str(), Stage::Load, PluginErrorKind::EnabledButMissing, message);
                continue;
            }

            if let Some(instance) =
                loader::load_one(&self.registry, id, host, config, &mut self.errors)
            {
                loaded.push(instance);
            }
        }

        info!(
            enabled = ids.len(),
            loaded = loaded.len(),
            "enabled plugins loaded"
        );
        loaded
    }

    /// State of every discovered plugin under `config`, sorted by id.
    pub fn plugin_states(&self, config: &ConfigValue) -> Vec<(String, PluginState)> {
        let table = resolver::flatten(config);
        self.registry
            .ids()
            .map(|id| (id.to_string(), resolver::plugin_state(id, &table)))
            .collect()
    }

    /// Every diagnostic recorded since the last [`clear_errors`](Self::clear_errors).
    pub fn get_errors(&self) -> &[PluginDiagnostic] {
        self.errors.records()
    }

    pub fn errors(&self) -> &DiagnosticLog {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    fn suggest_installed(&self, id: &str) -> Option<&str> {
        self.registry
            .ids()
            .map(|candidate| (candidate, strsim::jaro_winkler(id, candidate)))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate)
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
