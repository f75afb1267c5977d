// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The validated, queryable plugin registry.
//!
//! Validation happens once, in [`ValidatedRegistry::validate`]. Invalid
//! definitions are excluded and recorded as diagnostics; every query after
//! that is a read over the immutable validated set.

use plugforge_core::{Category, ProjectContext};

use crate::definition::{Plugin, PluginDefinition};
use crate::detect::evaluate_detect;
use crate::validate::{
    ValidationIssue, ValidationRules, ValidationWarning, validate_definition, warnings_for,
};

#[derive(Debug, Clone, Default)]
pub struct ValidatedRegistry {
    plugins: Vec<Plugin>,
    diagnostics: Vec<ValidationIssue>,
    warnings: Vec<ValidationWarning>,
}

impl ValidatedRegistry {
    /// Validate `definitions`, keeping their order.
    pub fn validate(definitions: Vec<PluginDefinition>, rules: &ValidationRules) -> Self {
        Self::validate_with(definitions, Vec::new(), rules)
    }

    /// Validate `definitions`, starting from issues found while loading them.
    pub fn validate_with(
        definitions: Vec<PluginDefinition>,
        mut diagnostics: Vec<ValidationIssue>,
        rules: &ValidationRules,
    ) -> Self {
        let total = definitions.len() + diagnostics.len();
        let mut plugins = Vec::with_capacity(definitions.len());
        let mut warnings = Vec::new();

        for definition in &definitions {
            match validate_definition(definition, rules) {
                Ok(plugin) => {
                    warnings.extend(warnings_for(&plugin));
                    plugins.push(plugin);
                }
                Err(issue) => {
                    tracing::error!(plugin = %issue.plugin, reason = %issue.rejection, "plugin validation failed");
                    diagnostics.push(issue);
                }
            }
        }

        for warning in &warnings {
            tracing::warn!(plugin = %warning.plugin, "{}", warning.message);
        }

        if !diagnostics.is_empty() {
            tracing::warn!(
                total,
                valid = plugins.len(),
                excluded = diagnostics.len(),
                "some plugins failed validation and were excluded"
            );
        }

        Self {
            plugins,
            diagnostics,
            warnings,
        }
    }

    /// Validated plugins, in registry order.
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Definitions excluded at load time.
    pub fn diagnostics(&self) -> &[ValidationIssue] {
        &self.diagnostics
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Look up a plugin by name.
    pub fn get_plugin_by_id(&self, id: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.name == id)
    }

    pub fn get_plugins_by_category(&self, category: Category) -> Vec<&Plugin> {
        self.plugins.iter().filter(|p| p.category == category).collect()
    }

    pub fn get_plugins_by_framework(&self, framework: &str) -> Vec<&Plugin> {
        self.plugins
            .iter()
            .filter(|p| p.frameworks.iter().any(|f| f == framework))
            .collect()
    }

    /// Plugins usable in `ctx`: framework targeted, TypeScript present when
    /// required, bundler listed when the plugin restricts bundlers.
    pub fn get_compatible_plugins(&self, ctx: &ProjectContext) -> Vec<&Plugin> {
        self.plugins
            .iter()
            .filter(|p| is_compatible(p, ctx))
            .collect()
    }

    /// Compatible plugins that `plugin` does not declare incompatible.
    pub fn get_compatible_plugins_for_plugin(
        &self,
        plugin: &Plugin,
        ctx: &ProjectContext,
    ) -> Vec<&Plugin> {
        self.get_compatible_plugins(ctx)
            .into_iter()
            .filter(|p| !plugin.incompatible_with.contains(&p.name))
            .collect()
    }

    /// Case-insensitive substring search over name, display name,
    /// description and category.
    pub fn search_plugins(&self, query: &str) -> Vec<&Plugin> {
        let query = query.to_lowercase();
        self.plugins
            .iter()
            .filter(|p| {
                let category = p.category.to_string();
                [
                    p.name.as_str(),
                    p.display_name.as_str(),
                    p.description.as_str(),
                    category.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Plugins whose detect step reports them present in `ctx`.
    pub fn get_installed_plugins(&self, ctx: &ProjectContext) -> Vec<&Plugin> {
        self.plugins
            .iter()
            .filter(|p| p.detect().is_some_and(|step| evaluate_detect(step, ctx)))
            .collect()
    }
}

fn is_compatible(plugin: &Plugin, ctx: &ProjectContext) -> bool {
    if !plugin.frameworks.iter().any(|f| *f == ctx.framework) {
        return false;
    }
    if plugin.requires_typescript && !ctx.typescript {
        return false;
    }
    if !plugin.bundlers.is_empty() {
        match &ctx.bundler {
            Some(bundler) if plugin.bundlers.contains(bundler) => {}
            _ => return false,
        }
    }
    true
}
