// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural validation of plugin definitions.

use plugforge_config::RegistryConfig;
use plugforge_core::{CallbackRole, Category, PlugforgeError};
use serde::Serialize;
use thiserror::Error;

use crate::definition::{Plugin, PluginDefinition};

/// Why a definition was excluded from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Rejection {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("invalid category '{0}'")]
    UnknownCategory(String),

    #[error("'frameworks' must be a non-empty array")]
    NoFrameworks,

    #[error("'{0}' must be a function")]
    MissingCallback(CallbackRole),

    #[error("{0}")]
    Unreadable(String),
}

/// A definition excluded at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Plugin name, or export symbol when the name is missing.
    pub plugin: String,
    pub rejection: Rejection,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.plugin, self.rejection)
    }
}

impl From<ValidationIssue> for PlugforgeError {
    fn from(issue: ValidationIssue) -> Self {
        PlugforgeError::Validation {
            plugin: issue.plugin,
            message: issue.rejection.to_string(),
        }
    }
}

/// A problem worth reporting that does not exclude the definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub plugin: String,
    pub message: String,
}

/// Which callback roles every definition must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub required_roles: Vec<CallbackRole>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            required_roles: CallbackRole::all().to_vec(),
        }
    }
}

impl ValidationRules {
    pub fn from_config(config: &RegistryConfig) -> Result<Self, PlugforgeError> {
        let required_roles = config
            .required_roles
            .iter()
            .map(|role| {
                role.parse::<CallbackRole>()
                    .map_err(|_| PlugforgeError::Config(format!("unknown callback role '{role}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { required_roles })
    }
}

/// Validate one definition.
///
/// Checks run in a fixed order and the first failure is reported: required
/// identity fields, category membership, frameworks, then callbacks.
pub fn validate_definition(
    definition: &PluginDefinition,
    rules: &ValidationRules,
) -> Result<Plugin, ValidationIssue> {
    let reject = |rejection| ValidationIssue {
        plugin: definition.label().to_string(),
        rejection,
    };

    let name = definition
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| reject(Rejection::MissingField("name")))?;
    let display_name = definition
        .display_name
        .clone()
        .ok_or_else(|| reject(Rejection::MissingField("displayName")))?;
    let description = definition
        .description
        .clone()
        .ok_or_else(|| reject(Rejection::MissingField("description")))?;
    let tag = definition
        .category
        .as_deref()
        .ok_or_else(|| reject(Rejection::MissingField("category")))?;
    let category = Category::from_tag(tag)
        .filter(|_| tag.chars().all(|c| !c.is_ascii_lowercase()))
        .ok_or_else(|| reject(Rejection::UnknownCategory(tag.to_string())))?;

    if definition.frameworks.is_empty() {
        return Err(reject(Rejection::NoFrameworks));
    }

    if let Some(role) = rules
        .required_roles
        .iter()
        .find(|role| !definition.callbacks.contains_key(*role))
    {
        return Err(reject(Rejection::MissingCallback(*role)));
    }

    Ok(Plugin {
        identifier: definition.identifier.clone(),
        name,
        display_name,
        description,
        category,
        version: definition.version.clone(),
        frameworks: definition.frameworks.clone(),
        incompatible_with: definition.incompatible_with.clone(),
        requires: definition.requires.clone(),
        recommends: definition.recommends.clone(),
        bundlers: definition.bundlers.clone(),
        requires_typescript: definition.requires_typescript,
        callbacks: definition.callbacks.clone(),
    })
}

/// Non-fatal findings for a validated plugin.
pub fn warnings_for(plugin: &Plugin) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    if let Some(version) = &plugin.version {
        let parses = semver::Version::parse(version).is_ok() || semver::VersionReq::parse(version).is_ok();
        if !parses {
            warnings.push(ValidationWarning {
                plugin: plugin.name.clone(),
                message: format!("version '{version}' is neither a semver version nor a requirement"),
            });
        }
    }
    warnings
}
