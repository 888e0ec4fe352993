// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renderable capabilities a plugin instance can expose.
//!
//! The loader never renders anything itself. It only asks a [`Component`]
//! which capability it offers and compares that with the descriptor's
//! declared plugin type.

/// A component that can be mounted inside a dashboard layout.
pub trait Widget: Send {
    /// Renders the widget body as text for the current frame.
    fn render(&self) -> String;
}

/// A full-screen page.
pub trait Page: Send {
    /// Title shown in the page switcher.
    fn title(&self) -> &str;

    /// Renders the page body as text for the current frame.
    fn render(&self) -> String;
}

/// Any object a plugin factory returns.
///
/// Capability queries default to `None`; implementors override the one(s)
/// they actually provide.
pub trait Component: Send + 'static {
    /// Type name reported in diagnostics when the instance is rejected.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_widget(&self) -> Option<&dyn Widget> {
        None
    }

    fn as_widget_mut(&mut self) -> Option<&mut dyn Widget> {
        None
    }

    fn as_page(&self) -> Option<&dyn Page> {
        None
    }

    fn as_page_mut(&mut self) -> Option<&mut dyn Page> {
        None
    }
}
