// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin name to export identifier derivation.
//!
//! `@tanstack/react-query` becomes `tanstackreactqueryPlugin`: every
//! character that cannot appear in an identifier is dropped and a fixed
//! suffix is appended. Dropping characters is not injective, so every batch
//! runs its names through an [`IdentifierTable`] and refuses collisions.

use std::collections::{BTreeMap, BTreeSet};

use plugforge_core::PlugforgeError;

/// Sanitize `name` into an identifier and append `suffix`.
///
/// A name that would start with a digit gets a leading `_`.
pub fn sanitize_identifier(name: &str, suffix: &str) -> String {
    let mut ident: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    ident.push_str(suffix);
    ident
}

/// Identifier assignments for a whole batch, with collision tracking.
#[derive(Debug, Clone)]
pub struct IdentifierTable {
    suffix: String,
    names_by_identifier: BTreeMap<String, BTreeSet<String>>,
}

impl IdentifierTable {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            names_by_identifier: BTreeMap::new(),
        }
    }

    /// Record `name` and return its identifier.
    pub fn insert(&mut self, name: &str) -> String {
        let identifier = sanitize_identifier(name, &self.suffix);
        self.names_by_identifier
            .entry(identifier.clone())
            .or_default()
            .insert(name.to_string());
        identifier
    }

    /// Whether `name` shares its identifier with a different name.
    pub fn collides(&self, name: &str) -> bool {
        let identifier = sanitize_identifier(name, &self.suffix);
        self.names_by_identifier
            .get(&identifier)
            .is_some_and(|names| names.len() > 1)
    }

    /// One error per identifier claimed by more than one distinct name.
    pub fn collisions(&self) -> Vec<PlugforgeError> {
        self.names_by_identifier
            .iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(identifier, names)| PlugforgeError::IdentifierCollision {
                identifier: identifier.clone(),
                names: names.iter().cloned().collect(),
            })
            .collect()
    }
}
