// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instance loader: runs one plugin's factory and checks what it returned.
//!
//! Every rejection path records exactly one diagnostic and yields `None`.
//! Factory errors and panics never reach the caller.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use termdash_core::{
    Component, ConfigValue, HostContext, Page, PluginConfig, PluginErrorKind, PluginType, Stage,
    Widget,
};
use tracing::info;

use crate::diagnostics::DiagnosticLog;
use crate::discovery::catch_panic;
use crate::registry::PluginRegistry;
use crate::resolver;

/// A validated plugin instance ready to be mounted by the host.
pub struct PluginInstance {
    id: String,
    plugin_type: PluginType,
    component: Box<dyn Component>,
}

impl PluginInstance {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn plugin_type(&self) -> PluginType {
        self.plugin_type
    }

    /// The widget capability; always `Some` for widget plugins.
    pub fn as_widget(&self) -> Option<&dyn Widget> {
        self.component.as_widget()
    }

    pub fn as_widget_mut(&mut self) -> Option<&mut dyn Widget> {
        self.component.as_widget_mut()
    }

    /// The page capability; always `Some` for page plugins.
    pub fn as_page(&self) -> Option<&dyn Page> {
        self.component.as_page()
    }

    pub fn as_page_mut(&mut self) -> Option<&mut dyn Page> {
        self.component.as_page_mut()
    }

    pub fn into_component(self) -> Box<dyn Component> {
        self.component
    }
}

impl fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginInstance")
            .field("id", &self.id)
            .field("plugin_type", &self.plugin_type)
            .field("component", &self.component.type_name())
            .finish()
    }
}

/// Loads one plugin by id regardless of its enabled state.
pub fn load_one(
    registry: &PluginRegistry,
    id: &str,
    host: &HostContext,
    config: &ConfigValue,
    log: &mut DiagnosticLog,
) -> Option<PluginInstance> {
    let Some(descriptor) = registry.get(id) else {
        log.record(
            id,
            Stage::Load,
            PluginErrorKind::NotInstalled,
            format!("plugin `{id}` is not installed or not discoverable"),
        );
        return None;
    };

    let plugin_config = plugin_config(id, config);

    let component = match catch_panic(|| descriptor.create(host, &plugin_config)) {
        Ok(component) => component,
        Err(e) => {
            log.record(
                id,
                Stage::Load,
                PluginErrorKind::FactoryFailure {
                    source: Arc::new(e),
                },
                format!("plugin `{id}` factory raised an error"),
            );
            return None;
        }
    };

    let declared = descriptor.plugin_type();
    let Ok(plugin_type) = PluginType::from_str(declared) else {
        log.record(
            id,
            Stage::Load,
            PluginErrorKind::UnknownPluginType(declared.to_string()),
            format!("plugin `{id}` has unknown plugin_type `{declared}`"),
        );
        return None;
    };

    if !satisfies(component.as_ref(), plugin_type) {
        let found = short_type_name(component.type_name()).to_string();
        log.record(
            id,
            Stage::Load,
            PluginErrorKind::WrongReturnType {
                expected: plugin_type,
                found: found.clone(),
            },
            format!("plugin `{id}` is type `{plugin_type}` but its factory returned {found}"),
        );
        return None;
    }

    info!(plugin = %id, plugin_type = %plugin_type, "plugin loaded");
    Some(PluginInstance {
        id: id.to_string(),
        plugin_type,
        component,
    })
}

fn satisfies(component: &dyn Component, plugin_type: PluginType) -> bool {
    match plugin_type {
        PluginType::Widget => component.as_widget().is_some(),
        PluginType::Page => component.as_page().is_some(),
    }
}

fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

/// Per-plugin record the loader hands to a factory.
pub fn plugin_config(id: &str, config: &ConfigValue) -> PluginConfig {
    resolver::flatten(config).remove(id).unwrap_or_default()
}
