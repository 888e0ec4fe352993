// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registered extension enumeration.
//!
//! An [`ExtensionSource`] lists named, lazily resolved entries for an
//! extension group. Resolution yields an untyped [`ExtensionObject`]; the
//! discovery engine checks whether it is an `Arc<dyn PluginDescriptor>`
//! before trusting it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::TermdashError;
use crate::traits::descriptor::PluginDescriptor;

/// Untyped object produced by resolving an extension entry.
pub type ExtensionObject = Box<dyn Any + Send + Sync>;

type Resolver = Box<dyn Fn() -> Result<ExtensionObject, TermdashError> + Send + Sync>;

/// A named entry whose object is resolved on demand.
pub struct ExtensionEntry {
    name: String,
    resolver: Resolver,
}

impl ExtensionEntry {
    pub fn new<F>(name: impl Into<String>, resolver: F) -> Self
    where
        F: Fn() -> Result<ExtensionObject, TermdashError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            resolver: Box::new(resolver),
        }
    }

    /// Entry resolving to an already constructed descriptor.
    pub fn descriptor(name: impl Into<String>, descriptor: Arc<dyn PluginDescriptor>) -> Self {
        Self::new(name, move || Ok(descriptor_object(descriptor.clone())))
    }

    /// Declared entry name (not necessarily the plugin id).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the entry to its object.
    pub fn resolve(&self) -> Result<ExtensionObject, TermdashError> {
        (self.resolver)()
    }
}

impl fmt::Debug for ExtensionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Wraps a descriptor so discovery's capability check accepts it.
pub fn descriptor_object(descriptor: Arc<dyn PluginDescriptor>) -> ExtensionObject {
    Box::new(descriptor)
}

/// Source of registered extensions, keyed by group name.
pub trait ExtensionSource {
    /// Lists every entry registered under `group`.
    ///
    /// An error here means the environment itself could not be read.
    fn enumerate(&self, group: &str) -> Result<Vec<ExtensionEntry>, TermdashError>;
}
