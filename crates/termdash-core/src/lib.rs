// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the TermDash plugin system.
//!
//! This crate provides the contracts every plugin implements, the error
//! taxonomy, and the format-independent configuration tree. Plugin crates
//! depend on this crate only.

pub mod error;
pub mod traits;
pub mod types;
pub mod value;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BoxError, PluginErrorKind, TermdashError};
pub use traits::extension::descriptor_object;
pub use traits::{
    Component, ExtensionEntry, ExtensionObject, ExtensionSource, Identified, Page,
    PluginDescriptor, Widget,
};
pub use types::{HostContext, PluginType, Stage, ENTRYPOINT_GROUP};
pub use value::{ConfigKey, ConfigMap, ConfigValue, PluginConfig};
