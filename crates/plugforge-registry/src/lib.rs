// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry: definitions, validation and queries.
//!
//! Definitions come either from builder artifacts on disk ([`loader`],
//! [`reader`]) or from Rust code via [`create_plugin`]. Either way they pass
//! through [`ValidatedRegistry::validate`] exactly once before they can be
//! queried.

pub mod builder;
pub mod definition;
pub mod detect;
pub mod loader;
pub mod reader;
pub mod registry;
pub mod validate;

pub use builder::{PluginBuilder, create_plugin};
pub use definition::{CallbackStep, Plugin, PluginDefinition};
pub use detect::{evaluate_detect, referenced_dependencies};
pub use loader::{load_registry, read_registry, registry_imports, registry_members};
pub use reader::{read_definition, read_definitions};
pub use registry::ValidatedRegistry;
pub use validate::{
    Rejection, ValidationIssue, ValidationRules, ValidationWarning, validate_definition,
};
