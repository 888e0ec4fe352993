// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for TermDash plugin tests.
//!
//! Provides scripted plugins and a fake extension source for fast,
//! deterministic tests without real plugin packages.
//!
//! # Components
//!
//! - [`FakeExtensionSource`] - Scripted extension entries, including broken ones
//! - [`MockDescriptor`] - Plugin descriptor with a scripted factory outcome
//! - [`MockWidget`], [`MockPage`], [`NotAComponent`] - Factory return values

pub mod fake_source;
pub mod mock_plugins;

pub use fake_source::FakeExtensionSource;
pub use mock_plugins::{MockDescriptor, MockHost, MockOutcome, MockPage, MockWidget, NotAComponent};
