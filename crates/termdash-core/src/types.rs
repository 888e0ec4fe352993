// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by plugin descriptors, the loader, and the host.

use std::any::Any;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Extension group under which every TermDash plugin is registered.
pub const ENTRYPOINT_GROUP: &str = "termdash.plugins";

/// Opaque host application handle passed unmodified into every factory.
///
/// Plugins that need the concrete host type downcast it themselves.
pub type HostContext = dyn Any;

/// Instance shape a plugin factory promises to produce.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PluginType {
    /// A component mounted inside a dashboard layout.
    Widget,
    /// A full-screen page.
    Page,
}

/// Phase in which a diagnostic was recorded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Discover,
    Load,
}
