// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the TermDash configuration system.

use std::io::Write;

use termdash_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_str, ConfigError,
};
use termdash_core::ConfigValue;

/// Plugin tables land in the untyped tree untouched.
#[test]
fn modules_section_is_kept_as_tree() {
    let toml = r#"
[app]
name = "desk"

[modules.core.weather]
enabled = true
city = "Oslo"

[modules.extra.clock]
enabled = "yes"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should load");
    assert_eq!(config.app.name, "desk");

    let modules = config.modules().expect("modules present");
    let weather = modules.get("core").unwrap().get("weather").unwrap();
    assert_eq!(weather.get("enabled"), Some(&ConfigValue::Bool(true)));
    assert_eq!(weather.get("city").and_then(ConfigValue::as_str), Some("Oslo"));

    let clock = modules.get("extra").unwrap().get("clock").unwrap();
    assert_eq!(clock.get("enabled"), Some(&ConfigValue::String("yes".into())));
}

/// Empty input falls back to compiled defaults.
#[test]
fn empty_config_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.app.name, "termdash");
    assert_eq!(config.app.log_level, "info");
    assert!(config.modules().is_none());
}

/// `modules` that is not a table is preserved as-is; the resolver decides.
#[test]
fn scalar_modules_value_is_preserved() {
    let config = load_config_from_str("modules = 5").unwrap();
    assert_eq!(config.modules(), Some(&ConfigValue::Integer(5)));
}

/// Unknown key in [app] produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_app_key_suggests_correction() {
    let toml = r#"
[app]
naem = "desk"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert!(
        errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "name"
        )),
        "expected UnknownKey with suggestion, got: {errors:?}"
    );
}

/// Wrong type for a typed key becomes InvalidType.
#[test]
fn wrong_type_in_app_section() {
    let toml = r#"
[app]
log_level = 3
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject int log level");
    assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidType { .. })));
}

/// Validation runs after a successful load.
#[test]
fn invalid_log_level_is_a_validation_error() {
    let toml = r#"
[app]
log_level = "chatty"
"#;

    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// Dotted override pairs merge into the tree the same way env vars do.
#[test]
fn merged_override_enables_plugin() {
    use figment::{
        providers::{Format, Toml},
        Figment,
    };

    let figment = Figment::new()
        .merge(Toml::string("[modules.core.clock]\nenabled = false\n"))
        .merge(("app", termdash_config::AppConfig::default()))
        .merge(("modules.core.clock.enabled", true));

    let config = termdash_config::loader::extract(figment).expect("should merge override");
    let clock = config.modules().unwrap().get("core").unwrap().get("clock").unwrap();
    assert_eq!(clock.get("enabled"), Some(&ConfigValue::Bool(true)));
}

/// Loading from an explicit path reads that file.
#[test]
fn load_from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[modules.core.about]\nenabled = true").unwrap();

    let config = load_and_validate_path(file.path()).expect("file should load");
    let about = config.modules().unwrap().get("core").unwrap().get("about").unwrap();
    assert_eq!(about.get("enabled"), Some(&ConfigValue::Bool(true)));
}

/// An explicitly named file that does not exist is an error, not defaults.
#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load_and_validate_path(&dir.path().join("typo.toml"))
        .expect_err("missing explicit file must be reported");
    assert!(!errors.is_empty());
}

/// The standard hierarchy still skips files that are absent.
#[test]
fn hierarchy_skips_absent_files() {
    use figment::providers::{Format, Serialized, Toml};

    let figment = figment::Figment::new()
        .merge(Serialized::defaults(termdash_config::AppConfig::default()).key("app"))
        .merge(Toml::file("/nonexistent/termdash.toml"));
    let config = termdash_config::loader::extract(figment).expect("absent file is skipped");
    assert_eq!(config.app.name, "termdash");
}

/// A bare TOML document converts to a tree with no defaults merged in.
#[test]
fn parse_tree_keeps_only_document_contents() {
    let tree = termdash_config::parse_tree(
        "[modules.core.clock]\nenabled = true\nlabel = \"UTC\"\noffsets = [1, 2.5]\n",
    )
    .expect("valid TOML");

    assert!(tree.get("app").is_none());
    let clock = tree.get("modules").unwrap().get("core").unwrap().get("clock").unwrap();
    assert_eq!(clock.get("enabled").and_then(ConfigValue::as_bool), Some(true));
    assert_eq!(
        clock.get("offsets"),
        Some(&ConfigValue::List(vec![ConfigValue::Integer(1), ConfigValue::Float(2.5)]))
    );
}

#[test]
fn parse_tree_rejects_malformed_toml() {
    assert!(termdash_config::parse_tree("[modules\nenabled =").is_err());
}
