// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contracts between the plugin manager, plugins, and the host.
//!
//! Plugins implement [`PluginDescriptor`] and hand back [`Component`]s that
//! expose either the [`Widget`] or the [`Page`] capability. Extension
//! sources implement [`ExtensionSource`].

pub mod component;
pub mod descriptor;
pub mod extension;

pub use component::{Component, Page, Widget};
pub use descriptor::{Identified, PluginDescriptor};
pub use extension::{ExtensionEntry, ExtensionObject, ExtensionSource};
