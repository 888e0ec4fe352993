// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovery engine: enumerates registered extensions and fills the registry.
//!
//! Each entry is resolved and checked in isolation. Only a failure to
//! enumerate the extension group short-circuits the pass.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use termdash_core::{
    ExtensionObject, ExtensionSource, Identified, PluginDescriptor, PluginErrorKind, Stage,
    TermdashError,
};
use tracing::{debug, info};

use crate::diagnostics::{DiagnosticLog, ANY_PLUGIN};
use crate::registry::PluginRegistry;

/// Clears `registry` and repopulates it from `source`'s `group`.
pub fn discover(
    source: &dyn ExtensionSource,
    group: &str,
    registry: &mut PluginRegistry,
    log: &mut DiagnosticLog,
) {
    registry.clear();

    let entries = match source.enumerate(group) {
        Ok(entries) => entries,
        Err(e) => {
            log.record(
                ANY_PLUGIN,
                Stage::Discover,
                PluginErrorKind::EnumerationFailure {
                    group: group.to_string(),
                    source: Arc::new(e),
                },
                format!("failed to read extension group `{group}`"),
            );
            return;
        }
    };

    let total = entries.len();
    for entry in entries {
        let name = entry.name();

        let object = match catch_panic(|| entry.resolve()) {
            Ok(object) => object,
            Err(e) => {
                log.record(
                    name,
                    Stage::Discover,
                    PluginErrorKind::ResolutionFailure {
                        source: Arc::new(e),
                    },
                    format!("failed to resolve extension entry `{name}`"),
                );
                continue;
            }
        };

        let descriptor = match object.downcast::<Arc<dyn PluginDescriptor>>() {
            Ok(descriptor) => *descriptor,
            Err(other) => {
                let id = claimed_id(&other).unwrap_or_else(|| name.to_string());
                log.record(
                    id,
                    Stage::Discover,
                    PluginErrorKind::InvalidDescriptor {
                        entry: name.to_string(),
                    },
                    format!("entry `{name}` did not resolve to a TermDash plugin descriptor"),
                );
                continue;
            }
        };

        let id = descriptor.id().to_string();
        match registry.register(descriptor) {
            Ok(()) => debug!(plugin = %id, entry = %name, "plugin registered"),
            Err(_) => log.record(
                id.as_str(),
                Stage::Discover,
                PluginErrorKind::DuplicateId,
                format!("duplicate plugin id `{id}` from entry `{name}`; keeping the first registration"),
            ),
        }
    }

    info!(
        group = group,
        entries = total,
        registered = registry.len(),
        "plugin discovery complete"
    );
}

/// Id exposed by a non-descriptor object, if it has one.
fn claimed_id(object: &ExtensionObject) -> Option<String> {
    object
        .downcast_ref::<Arc<dyn Identified>>()
        .map(|o| o.id().to_string())
}

/// Runs plugin-supplied code, turning a panic into an error.
pub(crate) fn catch_panic<T>(
    f: impl FnOnce() -> Result<T, TermdashError>,
) -> Result<T, TermdashError> {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(TermdashError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use termdash_core::ENTRYPOINT_GROUP;
    use termdash_test_utils::{FakeExtensionSource, MockDescriptor};

    use super::*;

    fn run(source: &FakeExtensionSource) -> (PluginRegistry, DiagnosticLog) {
        let mut registry = PluginRegistry::new();
        let mut log = DiagnosticLog::new();
        discover(source, ENTRYPOINT_GROUP, &mut registry, &mut log);
        (registry, log)
    }

    #[test]
    fn registers_valid_descriptors() {
        let source = FakeExtensionSource::new()
            .with_descriptor("clock", MockDescriptor::widget("core.clock"))
            .with_descriptor("about", MockDescriptor::page("core.about"));

        let (registry, log) = run(&source);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["core.about", "core.clock"]);
        assert!(log.is_empty());
    }

    #[test]
    fn enumeration_failure_short_circuits() {
        let source = FakeExtensionSource::new()
            .with_descriptor("clock", MockDescriptor::widget("core.clock"))
            .failing("metadata unreadable");

        let (registry, log) = run(&source);
        assert!(registry.is_empty());
        assert_eq!(log.len(), 1);
        let d = &log.records()[0];
        assert_eq!(d.plugin_id, "*");
        assert_eq!(d.stage, Stage::Discover);
        assert!(matches!(d.error, PluginErrorKind::EnumerationFailure { .. }));
    }

    #[test]
    fn only_the_requested_group_is_read() {
        let source = FakeExtensionSource::new()
            .with_descriptor("clock", MockDescriptor::widget("core.clock"));
        let mut registry = PluginRegistry::new();
        let mut log = DiagnosticLog::new();

        discover(&source, "other.group", &mut registry, &mut log);
        assert!(registry.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn bad_entries_do_not_block_good_ones() {
        let source = FakeExtensionSource::new()
            .with_broken("broken", "module not found")
            .with_panicking("explosive")
            .with_object("junk", || Box::new(17u8))
            .with_descriptor("clock", MockDescriptor::widget("core.clock"));

        let (registry, log) = run(&source);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["core.clock"]);

        let kinds: Vec<(&str, &str)> = log
            .records()
            .iter()
            .map(|d| (d.plugin_id.as_str(), d.error.name()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("broken", "ResolutionFailure"),
                ("explosive", "ResolutionFailure"),
                ("junk", "InvalidDescriptor"),
            ]
        );
    }

    #[test]
    fn resolution_failure_chains_to_underlying_cause() {
        use std::error::Error;

        let source = FakeExtensionSource::new().with_broken("broken", "module not found");
        let (_, log) = run(&source);

        let error = &log.records()[0].error;
        assert!(matches!(error, PluginErrorKind::ResolutionFailure { .. }));
        let resolve_error = error.source().expect("resolve error kept");
        assert!(resolve_error.to_string().contains("cannot import `broken`"));
        let cause = resolve_error.source().expect("io cause kept");
        let io = cause.downcast_ref::<std::io::Error>().expect("io::Error cause");
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(io.to_string(), "module not found");
    }

    #[test]
    fn invalid_object_uses_its_own_id_when_available() {
        let source = FakeExtensionSource::new().with_identified("entry-name", "claimed.id");

        let (registry, log) = run(&source);
        assert!(registry.is_empty());
        assert_eq!(log.records()[0].plugin_id, "claimed.id");
        assert!(matches!(
            &log.records()[0].error,
            PluginErrorKind::InvalidDescriptor { entry } if entry == "entry-name"
        ));
    }

    #[test]
    fn duplicate_ids_keep_first_and_record_once() {
        let source = FakeExtensionSource::new()
            .with_descriptor("first", MockDescriptor::widget("core.clock"))
            .with_descriptor("second", MockDescriptor::page("core.clock"));

        let (registry, log) = run(&source);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("core.clock").unwrap().plugin_type(), "widget");

        let dups: Vec<_> = log
            .records()
            .iter()
            .filter(|d| matches!(d.error, PluginErrorKind::DuplicateId))
            .collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].plugin_id, "core.clock");
    }

    #[test]
    fn rediscovery_rebuilds_registry() {
        let source = FakeExtensionSource::new()
            .with_descriptor("clock", MockDescriptor::widget("core.clock"));
        let mut registry = PluginRegistry::new();
        let mut log = DiagnosticLog::new();
        registry
            .register(Arc::new(MockDescriptor::page("stale.page")))
            .unwrap();

        discover(&source, ENTRYPOINT_GROUP, &mut registry, &mut log);
        let first: Vec<String> = registry.ids().map(str::to_string).collect();
        discover(&source, ENTRYPOINT_GROUP, &mut registry, &mut log);
        let second: Vec<String> = registry.ids().map(str::to_string).collect();

        assert_eq!(first, vec!["core.clock"]);
        assert_eq!(first, second);
        assert!(log.is_empty());
    }

    #[test]
    fn panic_message_extracts_text() {
        let err = catch_panic::<()>(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(err.to_string(), "panicked: boom 1");

        let err = catch_panic::<()>(|| std::panic::panic_any(5u32)).unwrap_err();
        assert_eq!(err.to_string(), "panicked: non-string panic payload");
    }
}
