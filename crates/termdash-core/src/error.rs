// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the TermDash plugin system.
//!
//! [`TermdashError`] is what fallible collaborators (extension sources,
//! factories, config conversion) return. [`PluginErrorKind`] is the
//! taxonomy the plugin manager records in its diagnostic log; the manager
//! itself never returns either to its caller.

use std::sync::Arc;

use strum::IntoStaticStr;
use thiserror::Error;

use crate::types::PluginType;

/// Boxed error accepted as a `source` by [`TermdashError`] variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type returned by plugin contracts and core operations.
#[derive(Debug, Error)]
pub enum TermdashError {
    /// Configuration errors (malformed tree, failed typed extraction).
    #[error("configuration error: {0}")]
    Config(String),

    /// The extension source could not enumerate or resolve an entry.
    #[error("extension error: {message}")]
    Extension {
        message: String,
        source: Option<BoxError>,
    },

    /// A plugin factory refused to build an instance.
    #[error("plugin error: {message}")]
    Plugin {
        message: String,
        source: Option<BoxError>,
    },

    /// Plugin code panicked; the payload is rendered as text.
    #[error("panicked: {0}")]
    Panicked(String),
}

impl TermdashError {
    /// Shorthand for an [`TermdashError::Extension`] without a source.
    pub fn extension(message: impl Into<String>) -> Self {
        Self::Extension {
            message: message.into(),
            source: None,
        }
    }

    /// [`TermdashError::Extension`] wrapping the error that caused it.
    pub fn extension_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Extension {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Shorthand for a [`TermdashError::Plugin`] without a source.
    pub fn plugin(message: impl Into<String>) -> Self {
        Self::Plugin {
            message: message.into(),
            source: None,
        }
    }

    /// [`TermdashError::Plugin`] wrapping the error that caused it.
    pub fn plugin_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Plugin {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Classified failure recorded by the plugin manager.
///
/// Each variant is the `underlying_error` half of a diagnostic record. The
/// static name (via `Into<&'static str>`) is stable and suitable for
/// filtering in tests and tooling.
#[derive(Debug, Clone, Error, IntoStaticStr)]
pub enum PluginErrorKind {
    /// The extension group itself could not be read.
    #[error("failed to enumerate extension group `{group}`: {source}")]
    EnumerationFailure {
        group: String,
        source: Arc<TermdashError>,
    },

    /// A single entry could not be resolved to an object.
    #[error("failed to resolve extension entry: {source}")]
    ResolutionFailure { source: Arc<TermdashError> },

    /// The resolved object does not implement the descriptor contract.
    #[error("entry `{entry}` did not resolve to a plugin descriptor")]
    InvalidDescriptor { entry: String },

    /// Another descriptor already registered this id.
    #[error("duplicate plugin id")]
    DuplicateId,

    /// `enabled` was present but not a boolean.
    #[error("`enabled` must be a boolean, found {found}")]
    ConfigTypeMismatch { found: String },

    /// `load_plugin` was asked for an id that discovery never registered.
    #[error("plugin not installed")]
    NotInstalled,

    /// The configuration enables an id that discovery never registered.
    #[error("plugin enabled in config but not installed")]
    EnabledButMissing,

    /// The factory returned an error or panicked.
    #[error("plugin factory failed: {source}")]
    FactoryFailure { source: Arc<TermdashError> },

    /// The factory produced an instance of the wrong shape.
    #[error("expected a {expected} instance, factory returned {found}")]
    WrongReturnType { expected: PluginType, found: String },

    /// The descriptor declares a kind this host does not know.
    #[error("unknown plugin_type `{0}`")]
    UnknownPluginType(String),
}

impl PluginErrorKind {
    /// Stable variant name, e.g. `"DuplicateId"`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
