// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery, enable resolution, and loading.
//!
//! Plugins are found through an [`ExtensionSource`](termdash_core::ExtensionSource),
//! kept in a [`PluginRegistry`], enabled from the `[modules.*]` configuration
//! tree, and instantiated through their descriptor's factory. Every failure is
//! recorded in a [`DiagnosticLog`] instead of being returned.

pub mod catalog;
pub mod diagnostics;
pub mod discovery;
pub mod loader;
pub mod manager;
pub mod registry;
pub mod resolver;

pub use catalog::{builtin_descriptors, BuiltinSource};
pub use diagnostics::{DiagnosticLog, PluginDiagnostic, ANY_PLUGIN};
pub use loader::{plugin_config, PluginInstance};
pub use manager::PluginManager;
pub use registry::{AlreadyRegistered, PluginRegistry, PluginState};
pub use resolver::ConfigTable;
