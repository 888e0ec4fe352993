// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `termdash plugins` subcommands.
//!
//! Both commands run against the compiled-in catalog. Output goes to stdout;
//! diagnostics are also emitted as tracing events by the manager.

use std::io::IsTerminal;
use std::process::ExitCode;

use colored::Colorize;
use termdash_core::ConfigValue;
use termdash_plugin::{PluginDiagnostic, PluginInstance, PluginManager, PluginState};

/// Whether to colorize output.
pub fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

/// Run `termdash plugins list`.
pub fn run_list(config: &ConfigValue, use_color: bool) -> ExitCode {
    let mut manager = PluginManager::new();
    manager.discover();
    print!("{}", render_list(&manager, config, use_color));
    print_diagnostics(manager.get_errors(), use_color);
    ExitCode::SUCCESS
}

/// Run `termdash plugins check`.
///
/// Exits non-zero when any diagnostic was recorded.
pub fn run_check(config: &ConfigValue, use_color: bool) -> ExitCode {
    let mut manager = PluginManager::new();
    manager.discover();
    let loaded = manager.load_enabled(&(), config);

    print!("{}", render_loaded(&loaded, use_color));
    print_diagnostics(manager.get_errors(), use_color);

    if manager.get_errors().is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn render_list(manager: &PluginManager, config: &ConfigValue, use_color: bool) -> String {
    let mut out = String::new();
    out.push_str("\n  termdash plugins\n");
    out.push_str(&format!("  {}\n", "-".repeat(50)));

    let states = manager.plugin_states(config);
    if states.is_empty() {
        out.push_str("    (no plugins discovered)\n");
    }
    for (id, state) in states {
        let kind = manager
            .get_plugin(&id)
            .map(|d| d.plugin_type().to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "    {:<24} {:<8} {}\n",
            id,
            kind,
            state_label(state, use_color)
        ));
    }
    out
}

fn render_loaded(loaded: &[PluginInstance], use_color: bool) -> String {
    let mut out = String::new();
    out.push_str("\n  termdash plugins check\n");
    out.push_str(&format!("  {}\n", "-".repeat(50)));

    if loaded.is_empty() {
        out.push_str("    (no plugins loaded)\n");
    }
    for instance in loaded {
        let symbol = if use_color {
            "✓".green().to_string()
        } else {
            "[OK]".to_string()
        };
        out.push_str(&format!(
            "    {symbol} {:<24} {}\n",
            instance.id(),
            instance.plugin_type()
        ));
    }
    out
}

fn state_label(state: PluginState, use_color: bool) -> String {
    let label = state.to_string();
    if !use_color {
        return label;
    }
    match state {
        PluginState::Enabled => label.green().to_string(),
        PluginState::Disabled | PluginState::NotConfigured => label.dimmed().to_string(),
        PluginState::Misconfigured => label.yellow().to_string(),
    }
}

fn print_diagnostics(diagnostics: &[PluginDiagnostic], use_color: bool) {
    if diagnostics.is_empty() {
        return;
    }
    println!();
    println!("  {} problem(s):", diagnostics.len());
    for d in diagnostics {
        if use_color {
            println!("    {} {}", "✗".red(), d.to_string().red());
        } else {
            println!("    [FAIL] {d}");
        }
    }
}

#[cfg(test)]
mod tests {
    use termdash_test_utils::{FakeExtensionSource, MockDescriptor};

    use super::*;

    fn table(toml_like: &[(&str, bool)]) -> ConfigValue {
        use termdash_core::ConfigMap;
        let mut core = ConfigMap::new();
        for (name, enabled) in toml_like {
            let mut plugin = ConfigMap::new();
            plugin.insert("enabled".into(), ConfigValue::Bool(*enabled));
            core.insert((*name).into(), ConfigValue::Map(plugin));
        }
        let mut modules = ConfigMap::new();
        modules.insert("core".into(), ConfigValue::Map(core));
        let mut root = ConfigMap::new();
        root.insert("modules".into(), ConfigValue::Map(modules));
        ConfigValue::Map(root)
    }

    #[test]
    fn list_shows_type_and_state() {
        let mut manager = PluginManager::with_source(
            FakeExtensionSource::new()
                .with_descriptor("clock", MockDescriptor::widget("core.clock"))
                .with_descriptor("about", MockDescriptor::page("core.about")),
        );
        manager.discover();

        let out = render_list(&manager, &table(&[("clock", true)]), false);
        let clock = out.lines().find(|l| l.contains("core.clock")).unwrap();
        assert!(clock.contains("widget"));
        assert!(clock.ends_with("enabled"));
        let about = out.lines().find(|l| l.contains("core.about")).unwrap();
        assert!(about.contains("page"));
        assert!(about.ends_with("not-configured"));
    }

    #[test]
    fn empty_list_says_so() {
        let manager = PluginManager::with_source(FakeExtensionSource::new());
        let out = render_list(&manager, &ConfigValue::default(), false);
        assert!(out.contains("(no plugins discovered)"));
    }

    #[test]
    fn check_output_lists_loaded_plugins() {
        let mut manager = PluginManager::new();
        manager.discover();
        let loaded = manager.load_enabled(&(), &table(&[("clock", true), ("about", false)]));

        let out = render_loaded(&loaded, false);
        assert!(out.contains("[OK] core.clock"));
        assert!(!out.contains("core.about"));
    }

    #[test]
    fn plain_state_labels_are_uncolored() {
        assert_eq!(state_label(PluginState::Misconfigured, false), "misconfigured");
    }
}
