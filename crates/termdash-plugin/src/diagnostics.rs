// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only log of plugin discovery and load failures.

use std::fmt;

use termdash_core::{PluginErrorKind, Stage};
use tracing::warn;

/// Plugin id used for failures that concern the whole discovery pass.
pub const ANY_PLUGIN: &str = "*";

/// One recorded failure.
#[derive(Debug, Clone)]
pub struct PluginDiagnostic {
    /// Plugin id, entry name, or [`ANY_PLUGIN`].
    pub plugin_id: String,
    pub stage: Stage,
    /// Classified underlying cause.
    pub error: PluginErrorKind,
    /// Human-readable summary for the host to display.
    pub message: String,
}

impl fmt::Display for PluginDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {} ({})", self.stage, self.plugin_id, self.message, self.error)
    }
}

/// Ordered diagnostic records owned by a plugin manager.
///
/// Never cleared implicitly; callers decide when to [`clear`](Self::clear).
#[derive(Debug, Default, Clone)]
pub struct DiagnosticLog {
    records: Vec<PluginDiagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and emits it as a `warn` event.
    pub fn record(
        &mut self,
        plugin_id: impl Into<String>,
        stage: Stage,
        error: PluginErrorKind,
        message: impl Into<String>,
    ) {
        let diagnostic = PluginDiagnostic {
            plugin_id: plugin_id.into(),
            stage,
            error,
            message: message.into(),
        };
        warn!(
            plugin = %diagnostic.plugin_id,
            stage = %diagnostic.stage,
            kind = diagnostic.error.name(),
            error = %diagnostic.error,
            "{}",
            diagnostic.message
        );
        self.records.push(diagnostic);
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[PluginDiagnostic] {
        &self.records
    }

    /// Records concerning one plugin id.
    pub fn for_plugin<'a>(&'a self, plugin_id: &'a str) -> impl Iterator<Item = &'a PluginDiagnostic> {
        self.records.iter().filter(move |d| d.plugin_id == plugin_id)
    }

    /// Records from one stage.
    pub fn for_stage(&self, stage: Stage) -> impl Iterator<Item = &PluginDiagnostic> {
        self.records.iter().filter(move |d| d.stage == stage)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
