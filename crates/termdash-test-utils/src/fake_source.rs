// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted [`ExtensionSource`] for discovery tests.

use std::io;
use std::sync::Arc;

use termdash_core::{
    descriptor_object, ExtensionEntry, ExtensionObject, ExtensionSource, Identified,
    PluginDescriptor, TermdashError, ENTRYPOINT_GROUP,
};

type ObjectFactory = Arc<dyn Fn() -> ExtensionObject + Send + Sync>;

#[derive(Clone)]
enum FakeEntry {
    Descriptor(Arc<dyn PluginDescriptor>),
    Object(ObjectFactory),
    Broken(String),
    Panicking,
}

/// Extension source returning a fixed, ordered list of entries.
///
/// Entries are only listed for [`ENTRYPOINT_GROUP`]; other groups are empty.
#[derive(Clone, Default)]
pub struct FakeExtensionSource {
    entries: Vec<(String, FakeEntry)>,
    enumeration_error: Option<String>,
}

impl FakeExtensionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry resolving to a valid descriptor.
    pub fn with_descriptor(mut self, name: &str, descriptor: impl PluginDescriptor) -> Self {
        self.entries
            .push((name.to_string(), FakeEntry::Descriptor(Arc::new(descriptor))));
        self
    }

    /// Entry resolving to an arbitrary object.
    pub fn with_object<F>(mut self, name: &str, make: F) -> Self
    where
        F: Fn() -> ExtensionObject + Send + Sync + 'static,
    {
        self.entries
            .push((name.to_string(), FakeEntry::Object(Arc::new(make))));
        self
    }

    /// Entry resolving to a non-descriptor object that still claims an id.
    pub fn with_identified(self, name: &str, id: &str) -> Self {
        let id = id.to_string();
        self.with_object(name, move || {
            let claimed: Arc<dyn Identified> = Arc::new(ClaimsId(id.clone()));
            Box::new(claimed)
        })
    }

    /// Entry whose resolution fails with an `io::Error` carrying `message`.
    pub fn with_broken(mut self, name: &str, message: &str) -> Self {
        self.entries
            .push((name.to_string(), FakeEntry::Broken(message.to_string())));
        self
    }

    /// Entry whose resolution panics.
    pub fn with_panicking(mut self, name: &str) -> Self {
        self.entries.push((name.to_string(), FakeEntry::Panicking));
        self
    }

    /// Makes enumeration itself fail.
    pub fn failing(mut self, message: &str) -> Self {
        self.enumeration_error = Some(message.to_string());
        self
    }
}

impl ExtensionSource for FakeExtensionSource {
    fn enumerate(&self, group: &str) -> Result<Vec<ExtensionEntry>, TermdashError> {
        if let Some(message) = &self.enumeration_error {
            return Err(TermdashError::extension(message.clone()));
        }
        if group != ENTRYPOINT_GROUP {
            return Ok(Vec::new());
        }

        Ok(self
            .entries
            .iter()
            .map(|(name, entry)| {
                let entry = entry.clone();
                let entry_name = name.clone();
                ExtensionEntry::new(name.clone(), move || match &entry {
                    FakeEntry::Descriptor(d) => Ok(descriptor_object(Arc::clone(d))),
                    FakeEntry::Object(make) => Ok(make()),
                    FakeEntry::Broken(message) => Err(TermdashError::extension_with_source(
                        format!("cannot import `{entry_name}`"),
                        io::Error::new(io::ErrorKind::NotFound, message.clone()),
                    )),
                    FakeEntry::Panicking => panic!("entry `{entry_name}` panicked on import"),
                })
            })
            .collect())
    }
}

struct ClaimsId(String);

impl Identified for ClaimsId {
    fn id(&self) -> &str {
        &self.0
    }
}
