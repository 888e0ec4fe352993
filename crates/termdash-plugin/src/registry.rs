// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of discovered plugin descriptors.
//!
//! The `PluginRegistry` holds shared descriptor handles keyed by plugin id.
//! It is rebuilt from scratch by every discovery pass; registration never
//! overwrites an existing id.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use termdash_core::PluginDescriptor;

/// Lifecycle state of a discovered plugin with respect to a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    /// Configured with `enabled = true`.
    Enabled,
    /// Configured with `enabled = false` or without an `enabled` value.
    Disabled,
    /// Installed but absent from the `modules` tree.
    NotConfigured,
    /// Configured with a non-boolean `enabled` value.
    Misconfigured,
}

impl fmt::Display for PluginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginState::Enabled => write!(f, "enabled"),
            PluginState::Disabled => write!(f, "disabled"),
            PluginState::NotConfigured => write!(f, "not-configured"),
            PluginState::Misconfigured => write!(f, "misconfigured"),
        }
    }
}

/// Returned by [`PluginRegistry::register`] when the id is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlreadyRegistered(pub String);

/// Descriptors keyed by id, iterated in id order.
#[derive(Default, Clone)]
pub struct PluginRegistry {
    entries: BTreeMap<String, Arc<dyn PluginDescriptor>>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under its own id. The first registration wins.
    pub fn register(&mut self, descriptor: Arc<dyn PluginDescriptor>) -> Result<(), AlreadyRegistered> {
        let id = descriptor.id().to_string();
        if self.entries.contains_key(&id) {
            return Err(AlreadyRegistered(id));
        }
        self.entries.insert(id, descriptor);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn PluginDescriptor>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// All descriptors, sorted by id.
    pub fn list_all(&self) -> Vec<&Arc<dyn PluginDescriptor>> {
        self.entries.values().collect()
    }

    /// All ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("ids", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
