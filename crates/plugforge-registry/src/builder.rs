// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fluent construction of [`PluginDefinition`]s.
//!
//! Mirrors the generated builder chain so definitions can be declared in
//! Rust the same way builder artifacts declare them:
//!
//! ```
//! use plugforge_core::Category;
//! use plugforge_registry::create_plugin;
//!
//! let definition = create_plugin()
//!     .named("zod", "Zod", "Schema validation")
//!     .for_frameworks(["react", "vue"])
//!     .in_category(Category::Forms)
//!     .with_detect("return ctx.dependencies['zod'] !== undefined")
//!     .with_install("return { success: true }")
//!     .with_configure("return { files: [], success: true }")
//!     .build();
//!
//! assert_eq!(definition.name.as_deref(), Some("zod"));
//! ```

use plugforge_core::{CallbackRole, Category};

use crate::definition::{CallbackStep, PluginDefinition};

/// Start a new builder chain.
pub fn create_plugin() -> PluginBuilder {
    PluginBuilder::default()
}

#[derive(Debug, Clone, Default)]
pub struct PluginBuilder {
    definition: PluginDefinition,
}

fn strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl PluginBuilder {
    /// Bind the definition to an export symbol.
    pub fn exported_as(mut self, identifier: impl Into<String>) -> Self {
        self.definition.identifier = identifier.into();
        self
    }

    pub fn named(
        mut self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.definition.name = Some(name.into());
        self.definition.display_name = Some(display_name.into());
        self.definition.description = Some(description.into());
        self
    }

    pub fn for_frameworks<I, S>(mut self, frameworks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition.frameworks = strings(frameworks);
        self
    }

    pub fn in_category(self, category: Category) -> Self {
        self.in_category_tag(category.to_string())
    }

    /// Set a raw category tag, which may not name a known category.
    pub fn in_category_tag(mut self, tag: impl Into<String>) -> Self {
        self.definition.category = Some(tag.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.definition.version = Some(version.into());
        self
    }

    pub fn incompatible_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition.incompatible_with = strings(names);
        self
    }

    pub fn requires<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition.requires = strings(names);
        self
    }

    pub fn recommends<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition.recommends = strings(names);
        self
    }

    pub fn for_bundlers<I, S>(mut self, bundlers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition.bundlers = strings(bundlers);
        self
    }

    pub fn requires_typescript(mut self) -> Self {
        self.definition.requires_typescript = true;
        self
    }

    pub fn with_callback(mut self, step: CallbackStep) -> Self {
        self.definition.callbacks.insert(step.role, step);
        self
    }

    pub fn with_detect(self, body: impl Into<String>) -> Self {
        self.with_callback(CallbackStep::new(CallbackRole::Detect, body))
    }

    pub fn with_install(self, body: impl Into<String>) -> Self {
        self.with_callback(CallbackStep::new(CallbackRole::Install, body))
    }

    pub fn with_configure(self, body: impl Into<String>) -> Self {
        self.with_callback(CallbackStep::new(CallbackRole::Configure, body))
    }

    pub fn build(self) -> PluginDefinition {
        self.definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_field() {
        let definition = create_plugin()
            .exported_as("tanstackreactqueryPlugin")
            .named("@tanstack/react-query", "TanStack Query", "Server state")
            .for_frameworks(["react"])
            .in_category(Category::Http)
            .with_version("^5.0.0")
            .incompatible_with(["swr"])
            .requires(["react"])
            .recommends(["@tanstack/react-query-devtools"])
            .for_bundlers(["vite"])
            .requires_typescript()
            .with_detect("return true")
            .build();

        assert_eq!(definition.identifier, "tanstackreactqueryPlugin");
        assert_eq!(definition.category.as_deref(), Some("HTTP"));
        assert_eq!(definition.version.as_deref(), Some("^5.0.0"));
        assert_eq!(definition.incompatible_with, vec!["swr"]);
        assert!(definition.requires_typescript);
        assert_eq!(definition.callbacks.len(), 1);
        assert!(!definition.callbacks[&CallbackRole::Detect].asynchronous);
    }

    #[test]
    fn label_falls_back_to_identifier() {
        let definition = create_plugin().exported_as("brokenPlugin").build();
        assert_eq!(definition.label(), "brokenPlugin");
    }
}
