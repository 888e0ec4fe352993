// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted plugin descriptors and components.
//!
//! `MockDescriptor` records every factory call (config and host) so tests can
//! assert on what the loader passed through.

use std::sync::{Arc, Mutex};

use termdash_core::{
    Component, HostContext, Page, PluginConfig, PluginDescriptor, TermdashError, Widget,
};

/// What a [`MockDescriptor`]'s factory does when called.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return a [`MockWidget`].
    Widget,
    /// Return a [`MockPage`].
    Page,
    /// Return a component with neither capability.
    NotAComponent,
    /// Return `Err` with this message.
    Error(String),
    /// Panic with this message.
    Panic(String),
}

/// Host handle the mocks know how to recognise.
#[derive(Debug, Clone)]
pub struct MockHost {
    pub name: String,
}

impl MockHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A plugin descriptor with a scripted factory.
pub struct MockDescriptor {
    id: String,
    kind: String,
    outcome: MockOutcome,
    calls: Arc<Mutex<Vec<PluginConfig>>>,
    hosts: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockDescriptor {
    /// Widget plugin whose factory returns a [`MockWidget`].
    pub fn widget(id: impl Into<String>) -> Self {
        Self::new(id, "widget", MockOutcome::Widget)
    }

    /// Page plugin whose factory returns a [`MockPage`] titled with the id.
    pub fn page(id: impl Into<String>) -> Self {
        Self::new(id, "page", MockOutcome::Page)
    }

    fn new(id: impl Into<String>, kind: &str, outcome: MockOutcome) -> Self {
        Self {
            id: id.into(),
            kind: kind.to_string(),
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
            hosts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Overrides the declared plugin type string.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Overrides what the factory does.
    pub fn returning(mut self, outcome: MockOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Shared handle to every config the factory received.
    pub fn calls(&self) -> Arc<Mutex<Vec<PluginConfig>>> {
        Arc::clone(&self.calls)
    }

    /// Shared handle to the host names seen (`None` when the host was not a [`MockHost`]).
    pub fn hosts(&self) -> Arc<Mutex<Vec<Option<String>>>> {
        Arc::clone(&self.hosts)
    }
}

impl PluginDescriptor for MockDescriptor {
    fn id(&self) -> &str {
        &self.id
    }

    fn plugin_type(&self) -> &str {
        &self.kind
    }

    fn create(
        &self,
        host: &HostContext,
        config: &PluginConfig,
    ) -> Result<Box<dyn Component>, TermdashError> {
        self.calls.lock().expect("calls lock").push(config.clone());
        self.hosts
            .lock()
            .expect("hosts lock")
            .push(host.downcast_ref::<MockHost>().map(|h| h.name.clone()));

        match &self.outcome {
            MockOutcome::Widget => Ok(Box::new(MockWidget::new(&self.id))),
            MockOutcome::Page => Ok(Box::new(MockPage::new(&self.id))),
            MockOutcome::NotAComponent => Ok(Box::new(NotAComponent)),
            MockOutcome::Error(message) => Err(TermdashError::plugin(message.clone())),
            MockOutcome::Panic(message) => panic!("{message}"),
        }
    }
}

/// Widget that renders its label.
#[derive(Debug, Clone)]
pub struct MockWidget {
    pub label: String,
}

impl MockWidget {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Widget for MockWidget {
    fn render(&self) -> String {
        format!("[{}]", self.label)
    }
}

impl Component for MockWidget {
    fn as_widget(&self) -> Option<&dyn Widget> {
        Some(self)
    }

    fn as_widget_mut(&mut self) -> Option<&mut dyn Widget> {
        Some(self)
    }
}

/// Page with a fixed title.
#[derive(Debug, Clone)]
pub struct MockPage {
    pub title: String,
}

impl MockPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Page for MockPage {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self) -> String {
        format!("# {}", self.title)
    }
}

impl Component for MockPage {
    fn as_page(&self) -> Option<&dyn Page> {
        Some(self)
    }

    fn as_page_mut(&mut self) -> Option<&mut dyn Page> {
        Some(self)
    }
}

/// A component exposing no capability at all.
#[derive(Debug, Clone, Copy)]
pub struct NotAComponent;

impl Component for NotAComponent {}
