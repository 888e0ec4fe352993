// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.
//!
//! Plugins compiled into the TermDash binary, exposed through
//! [`BuiltinSource`] under the standard extension group. No package metadata
//! is read.
//!
//! The catalog contains 2 plugins:
//! - core.clock (Widget)
//! - core.about (Page)

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use termdash_core::{
    Component, ExtensionEntry, ExtensionSource, HostContext, Page, PluginConfig, PluginDescriptor,
    TermdashError, Widget, ENTRYPOINT_GROUP,
};

/// Descriptors for all built-in plugins.
pub fn builtin_descriptors() -> Vec<Arc<dyn PluginDescriptor>> {
    vec![Arc::new(ClockPlugin), Arc::new(AboutPlugin)]
}

/// Extension source over the compiled-in catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSource;

impl ExtensionSource for BuiltinSource {
    fn enumerate(&self, group: &str) -> Result<Vec<ExtensionEntry>, TermdashError> {
        if group != ENTRYPOINT_GROUP {
            return Ok(Vec::new());
        }
        Ok(builtin_descriptors()
            .into_iter()
            .map(|d| ExtensionEntry::descriptor(d.id().to_string(), d))
            .collect())
    }
}

/// Settings read from `[modules.core.clock]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    pub show_seconds: bool,
    /// Text shown before the time.
    pub label: Option<String>,
    /// Offset from UTC in minutes.
    pub utc_offset_minutes: i32,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            show_seconds: false,
            label: None,
            utc_offset_minutes: 0,
        }
    }
}

/// `core.clock`: wall-clock widget.
#[derive(Debug)]
pub struct ClockPlugin;

impl PluginDescriptor for ClockPlugin {
    fn id(&self) -> &str {
        "core.clock"
    }

    fn plugin_type(&self) -> &str {
        "widget"
    }

    fn create(
        &self,
        _host: &HostContext,
        config: &PluginConfig,
    ) -> Result<Box<dyn Component>, TermdashError> {
        let settings: ClockSettings = config
            .deserialize()
            .map_err(|e| TermdashError::plugin_with_source("invalid core.clock settings", e))?;
        let offset = utc_offset(settings.utc_offset_minutes)?;
        Ok(Box::new(ClockWidget {
            label: settings.label,
            show_seconds: settings.show_seconds,
            offset,
        }))
    }
}

/// Offset must stay strictly within one day either side of UTC.
fn utc_offset(minutes: i32) -> Result<FixedOffset, TermdashError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            TermdashError::plugin(format!("utc_offset_minutes out of range: {minutes}"))
        })
}

#[derive(Debug)]
pub struct ClockWidget {
    label: Option<String>,
    show_seconds: bool,
    offset: FixedOffset,
}

impl ClockWidget {
    /// Formats an instant according to the widget settings.
    pub fn format_at(&self, now: DateTime<Utc>) -> String {
        let pattern = if self.show_seconds { "%H:%M:%S" } else { "%H:%M" };
        let time = now.with_timezone(&self.offset).format(pattern);
        match &self.label {
            Some(label) => format!("{label} {time}"),
            None => time.to_string(),
        }
    }
}

impl Widget for ClockWidget {
    fn render(&self) -> String {
        self.format_at(Utc::now())
    }
}

impl Component for ClockWidget {
    fn as_widget(&self) -> Option<&dyn Widget> {
        Some(self)
    }

    fn as_widget_mut(&mut self) -> Option<&mut dyn Widget> {
        Some(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AboutSettings {
    pub title: String,
}

impl Default for AboutSettings {
    fn default() -> Self {
        Self {
            title: "About TermDash".to_string(),
        }
    }
}

/// `core.about`: version and build information page.
#[derive(Debug)]
pub struct AboutPlugin;

impl PluginDescriptor for AboutPlugin {
    fn id(&self) -> &str {
        "core.about"
    }

    fn plugin_type(&self) -> &str {
        "page"
    }

    fn create(
        &self,
        _host: &HostContext,
        config: &PluginConfig,
    ) -> Result<Box<dyn Component>, TermdashError> {
        let settings: AboutSettings = config.deserialize()?;
        Ok(Box::new(AboutPage {
            title: settings.title,
        }))
    }
}

#[derive(Debug)]
pub struct AboutPage {
    title: String,
}

impl Page for AboutPage {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self) -> String {
        format!(
            "TermDash {}\nPlugins are discovered from the `{ENTRYPOINT_GROUP}` extension group.",
            env!("CARGO_PKG_VERSION")
        )
    }
}

impl Component for AboutPage {
    fn as_page(&self) -> Option<&dyn Page> {
        Some(self)
    }

    fn as_page_mut(&mut self) -> Option<&mut dyn Page> {
        Some(self)
    }
}
