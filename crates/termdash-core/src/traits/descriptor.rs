// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptor contract.

use crate::error::TermdashError;
use crate::traits::component::Component;
use crate::types::HostContext;
use crate::value::PluginConfig;

/// Describes one installable plugin and builds its instances.
///
/// Descriptors are shared (`Arc<dyn PluginDescriptor>`) between the
/// extension source and the registry.
pub trait PluginDescriptor: Send + Sync + 'static {
    /// Dotted identifier, unique among discovered plugins (e.g. `core.weather`).
    fn id(&self) -> &str;

    /// Declared instance shape: `"widget"` or `"page"`.
    ///
    /// Kept as free text so that descriptors built against a newer host
    /// can be rejected at load time instead of at compile time.
    fn plugin_type(&self) -> &str;

    /// Builds an instance for the given host and per-plugin configuration.
    fn create(
        &self,
        host: &HostContext,
        config: &PluginConfig,
    ) -> Result<Box<dyn Component>, TermdashError>;
}

/// Minimal identity capability.
///
/// Extension objects that are not descriptors can still expose an id through
/// this trait (as `Arc<dyn Identified>`) so discovery diagnostics name them.
pub trait Identified: Send + Sync + 'static {
    fn id(&self) -> &str;
}
