// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the plugin manager over scripted extension sources.

use serde_json::json;
use termdash_core::{ConfigValue, PluginErrorKind, PluginType, Stage};
use termdash_plugin::{PluginManager, ANY_PLUGIN};
use termdash_test_utils::{FakeExtensionSource, MockDescriptor, MockHost, MockOutcome};

fn config(value: serde_json::Value) -> ConfigValue {
    ConfigValue::from(value)
}

fn discovered(source: FakeExtensionSource) -> PluginManager {
    let mut manager = PluginManager::with_source(source);
    manager.discover();
    manager
}

fn standard_source() -> FakeExtensionSource {
    FakeExtensionSource::new()
        .with_descriptor("weather", MockDescriptor::widget("core.weather"))
        .with_descriptor("clock", MockDescriptor::widget("extra.clock"))
        .with_descriptor("about", MockDescriptor::page("core.about"))
}

#[test]
fn enabled_ids_with_type_mismatch() {
    let mut manager = discovered(standard_source());
    let cfg = config(json!({
        "modules": {
            "core": {"weather": {"enabled": true}},
            "extra": {"clock": {"enabled": "yes"}}
        }
    }));

    assert_eq!(manager.get_enabled_plugin_ids(&cfg), vec!["core.weather"]);
    let errors = manager.get_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].plugin_id, "extra.clock");
    assert!(matches!(errors[0].error, PluginErrorKind::ConfigTypeMismatch { .. }));
}

#[test]
fn listing_and_lookup() {
    let manager = discovered(standard_source());

    assert_eq!(
        manager.list_plugins(),
        vec!["core.about", "core.weather", "extra.clock"]
    );
    assert!(manager.is_installed("core.about"));
    assert!(!manager.is_installed("core"));
    assert_eq!(manager.get_plugin("core.about").unwrap().plugin_type(), "page");
    assert!(manager.get_plugin("nope").is_none());
}

#[test]
fn configured_plugins_are_flattened() {
    let manager = discovered(standard_source());
    let cfg = config(json!({
        "modules": {"core": {"weather": {"enabled": true, "city": "Oslo"}, "misc": {"x": 1}}}
    }));

    let table = manager.get_configured_plugins(&cfg);
    assert_eq!(table.keys().collect::<Vec<_>>(), vec!["core.weather"]);
    assert_eq!(table["core.weather"].get("city").and_then(ConfigValue::as_str), Some("Oslo"));
}

#[test]
fn load_enabled_is_sorted_by_id() {
    let mut manager = discovered(standard_source());
    let cfg = config(json!({
        "modules": {
            "extra": {"clock": {"enabled": true}},
            "core": {"weather": {"enabled": true}, "about": {"enabled": true}}
        }
    }));

    let loaded = manager.load_enabled(&(), &cfg);
    let ids: Vec<&str> = loaded.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["core.about", "core.weather", "extra.clock"]);
    assert_eq!(loaded[0].plugin_type(), PluginType::Page);
    assert!(manager.get_errors().is_empty());
}

#[test]
fn disabled_plugins_are_not_loaded() {
    let mut manager = discovered(standard_source());
    let cfg = config(json!({
        "modules": {"core": {"weather": {"enabled": false}, "about": {"enabled": true}}}
    }));

    let loaded = manager.load_enabled(&(), &cfg);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id(), "core.about");
}

#[test]
fn widget_factory_returning_non_widget_is_rejected() {
    let mut manager = discovered(
        FakeExtensionSource::new().with_descriptor(
            "clock",
            MockDescriptor::widget("core.clock").returning(MockOutcome::NotAComponent),
        ),
    );
    let cfg = config(json!({"modules": {"core": {"clock": {"enabled": true}}}}));

    assert!(manager.load_enabled(&(), &cfg).is_empty());
    let errors = manager.get_errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].error,
        PluginErrorKind::WrongReturnType { expected: PluginType::Widget, .. }
    ));
}

#[test]
fn enabled_but_missing_differs_from_not_installed() {
    let mut manager = discovered(standard_source());
    let cfg = config(json!({"modules": {"ghost": {"enabled": true}}}));

    assert!(manager.load_enabled(&(), &cfg).is_empty());
    assert!(manager.load_plugin("ghost", &(), &cfg).is_none());

    let errors = manager.get_errors();
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0].error, PluginErrorKind::EnabledButMissing));
    assert!(matches!(errors[1].error, PluginErrorKind::NotInstalled));
    assert_ne!(errors[0].message, errors[1].message);
    assert_ne!(errors[0].error.to_string(), errors[1].error.to_string());
}

#[test]
fn load_plugin_ignores_enabled_state() {
    let mut manager = discovered(standard_source());
    let cfg = config(json!({"modules": {"core": {"weather": {"enabled": false}}}}));

    let instance = manager.load_plugin("core.weather", &(), &cfg).unwrap();
    assert!(instance.as_widget().is_some());
}

#[test]
fn host_reaches_factories_unchanged() {
    let descriptor = MockDescriptor::page("core.about");
    let hosts = descriptor.hosts();
    let mut manager =
        discovered(FakeExtensionSource::new().with_descriptor("about", descriptor));
    let cfg = config(json!({"modules": {"core": {"about": {"enabled": true}}}}));

    manager.load_enabled(&MockHost::new("main-screen"), &cfg);
    assert_eq!(*hosts.lock().unwrap(), vec![Some("main-screen".to_string())]);
}

#[test]
fn failures_never_escape_the_manager() {
    let mut manager = discovered(
        FakeExtensionSource::new()
            .with_broken("broken", "import error")
            .with_panicking("explosive")
            .with_object("junk", || Box::new("not a plugin"))
            .with_descriptor("a", MockDescriptor::widget("p.err").returning(MockOutcome::Error("bad".into())))
            .with_descriptor("b", MockDescriptor::widget("p.panic").returning(MockOutcome::Panic("boom".into())))
            .with_descriptor("c", MockDescriptor::widget("p.kind").with_kind("sidebar"))
            .with_descriptor("d", MockDescriptor::widget("p.ok")),
    );
    let cfg = config(json!({
        "modules": {"p": {
            "err": {"enabled": true},
            "panic": {"enabled": true},
            "kind": {"enabled": true},
            "ok": {"enabled": true}
        }}
    }));

    let loaded = manager.load_enabled(&(), &cfg);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id(), "p.ok");

    let kinds: Vec<&str> = manager.get_errors().iter().map(|d| d.error.name()).collect();
    assert_eq!(
        kinds,
        vec![
            "ResolutionFailure",
            "ResolutionFailure",
            "InvalidDescriptor",
            "FactoryFailure",
            "UnknownPluginType",
            "FactoryFailure",
        ]
    );
    assert_eq!(manager.errors().for_stage(Stage::Discover).count(), 3);
    assert_eq!(manager.errors().for_plugin("p.panic").count(), 1);
}

#[test]
fn enumeration_failure_yields_empty_registry() {
    let mut manager = PluginManager::with_source(standard_source().failing("no metadata"));

    assert!(manager.discover().is_empty());
    let errors = manager.get_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].plugin_id, ANY_PLUGIN);
}

#[test]
fn duplicate_ids_keep_first_registration() {
    let mut manager = discovered(
        FakeExtensionSource::new()
            .with_descriptor("first", MockDescriptor::widget("core.clock"))
            .with_descriptor("second", MockDescriptor::page("core.clock")),
    );
    let cfg = config(json!({"modules": {"core": {"clock": {"enabled": true}}}}));

    assert_eq!(manager.list_plugins(), vec!["core.clock"]);
    let duplicates = manager
        .get_errors()
        .iter()
        .filter(|d| matches!(d.error, PluginErrorKind::DuplicateId))
        .count();
    assert_eq!(duplicates, 1);

    let loaded = manager.load_enabled(&(), &cfg);
    assert_eq!(loaded[0].plugin_type(), PluginType::Widget);
}

#[test]
fn discover_is_idempotent() {
    let mut manager = PluginManager::with_source(standard_source());
    let first = manager.discover().ids().map(str::to_string).collect::<Vec<_>>();
    let second = manager.discover().ids().map(str::to_string).collect::<Vec<_>>();
    assert_eq!(first, second);
}

#[test]
fn clear_errors_empties_the_log() {
    let mut manager = discovered(standard_source());
    let cfg = config(json!({"modules": {"ghost": {"enabled": true}}}));
    manager.load_enabled(&(), &cfg);
    assert!(!manager.get_errors().is_empty());

    manager.clear_errors();
    assert!(manager.get_errors().is_empty());
}

#[test]
fn errors_accumulate_until_cleared() {
    let mut manager = discovered(standard_source());
    let cfg = config(json!({"modules": {"x": {"enabled": 3}}}));

    assert!(!manager.is_enabled("x", &cfg));
    assert!(!manager.is_enabled("x", &cfg));
    assert_eq!(manager.get_errors().len(), 2);
}

#[test]
fn builtin_catalog_loads_with_plugin_settings() {
    let mut manager = PluginManager::new();
    manager.discover();
    let cfg = config(json!({
        "modules": {"core": {
            "clock": {"enabled": true, "label": "Local"},
            "about": {"enabled": true, "title": "Info"}
        }}
    }));

    let loaded = manager.load_enabled(&(), &cfg);
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].as_page().unwrap().title(), "Info");
    assert!(loaded[1].as_widget().unwrap().render().starts_with("Local "));
    assert!(manager.get_errors().is_empty());
}
