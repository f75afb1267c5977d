// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin definitions before and after validation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use plugforge_core::{CallbackRole, Category};
use serde::Serialize;

/// A callback attached by a `withDetect` / `withInstall` / `withConfigure` step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackStep {
    pub role: CallbackRole,
    /// Whether the callable is declared `async`.
    pub asynchronous: bool,
    /// Body text, without the surrounding braces.
    pub body: String,
}

impl CallbackStep {
    pub fn new(role: CallbackRole, body: impl Into<String>) -> Self {
        Self {
            role,
            asynchronous: role.is_async(),
            body: body.into(),
        }
    }
}

/// A plugin as declared, whether read from a builder artifact or built in
/// Rust. Nothing here has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginDefinition {
    /// Export symbol the definition is bound to.
    pub identifier: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    /// Raw category tag (`ROUTING`), checked during validation.
    pub category: Option<String>,
    /// Declared version; `None` when resolved through the version table.
    pub version: Option<String>,
    pub frameworks: Vec<String>,
    pub incompatible_with: Vec<String>,
    pub requires: Vec<String>,
    pub recommends: Vec<String>,
    pub bundlers: Vec<String>,
    pub requires_typescript: bool,
    pub callbacks: BTreeMap<CallbackRole, CallbackStep>,
    /// Builder artifact the definition was read from.
    pub source: Option<PathBuf>,
}

impl PluginDefinition {
    /// Name used in diagnostics: the plugin name, or the export symbol when
    /// the name is missing.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.identifier)
    }
}

/// A definition that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    #[serde(skip)]
    pub identifier: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub frameworks: Vec<String>,
    pub incompatible_with: Vec<String>,
    pub requires: Vec<String>,
    pub recommends: Vec<String>,
    pub bundlers: Vec<String>,
    #[serde(rename = "requiresTypeScript")]
    pub requires_typescript: bool,
    #[serde(skip)]
    pub callbacks: BTreeMap<CallbackRole, CallbackStep>,
}

impl Plugin {
    pub fn callback(&self, role: CallbackRole) -> Option<&CallbackStep> {
        self.callbacks.get(&role)
    }

    pub fn detect(&self) -> Option<&CallbackStep> {
        self.callback(CallbackRole::Detect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_serializes_like_the_typescript_interface() {
        let plugin = Plugin {
            identifier: "zodPlugin".to_string(),
            name: "zod".to_string(),
            display_name: "Zod".to_string(),
            description: String::new(),
            category: Category::Forms,
            version: None,
            frameworks: vec!["react".to_string()],
            incompatible_with: Vec::new(),
            requires: Vec::new(),
            recommends: Vec::new(),
            bundlers: Vec::new(),
            requires_typescript: true,
            callbacks: BTreeMap::new(),
        };

        let json = serde_json::to_value(&plugin).unwrap();
        assert_eq!(json["displayName"], "Zod");
        assert_eq!(json["category"], "FORMS");
        assert_eq!(json["requiresTypeScript"], true);
        assert!(json.get("version").is_none());
        assert!(json.get("identifier").is_none());
    }
}
