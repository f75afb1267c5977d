// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the extractor, synthesizer and registry crates.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The closed set of plugin categories.
///
/// Descriptors reference these as `Category.ROUTING`; category directories
/// use the lowercase form (`routing/`). Parsing accepts either.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Routing,
    State,
    Http,
    Css,
    Tooling,
    Testing,
    Ui,
    Forms,
    Animation,
    Nextjs,
    Utils,
}

impl Category {
    /// Parse a raw enumeration tag (`ROUTING`) or directory name (`routing`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.trim().parse().ok()
    }

    /// All members of the closed enumeration, in declaration order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// One of the three callback roles a plugin carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CallbackRole {
    /// Presence check against a project context.
    Detect,
    /// Acquisition procedure.
    Install,
    /// Setup procedure.
    Configure,
}

impl CallbackRole {
    /// All roles in the order they appear in a builder chain.
    pub fn all() -> [Self; 3] {
        [Self::Detect, Self::Install, Self::Configure]
    }

    /// The builder step that attaches this role (`withDetect`, ...).
    pub fn builder_step(self) -> &'static str {
        match self {
            CallbackRole::Detect => "withDetect",
            CallbackRole::Install => "withInstall",
            CallbackRole::Configure => "withConfigure",
        }
    }

    /// Install and configure run asynchronously; detect is a plain predicate.
    pub fn is_async(self) -> bool {
        !matches!(self, CallbackRole::Detect)
    }
}

/// The project a registry query is evaluated against.
///
/// Supplied by the caller; the pipeline never builds one on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    /// Declared dependencies, name to version.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    /// Target framework tag (`react`, `vue`, ...).
    pub framework: String,
    /// Whether the project is compiled with TypeScript.
    #[serde(default)]
    pub typescript: bool,
    /// Detected bundler, if any.
    #[serde(default)]
    pub bundler: Option<String>,
}

impl ProjectContext {
    /// Context for `framework` with no dependencies, no TypeScript and no bundler.
    pub fn new(framework: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            ..Self::default()
        }
    }

    /// Add a dependency to the context.
    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), version.into());
        self
    }

    /// Mark the project as TypeScript.
    pub fn with_typescript(mut self, typescript: bool) -> Self {
        self.typescript = typescript;
        self
    }

    /// Set the bundler.
    pub fn with_bundler(mut self, bundler: impl Into<String>) -> Self {
        self.bundler = Some(bundler.into());
        self
    }

    /// Whether `name` is present in the dependency map.
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }
}

/// One descriptor file, read once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    /// Location of the descriptor on disk.
    pub path: PathBuf,
    /// Name of the containing category directory.
    pub category: String,
    /// File stem; the builder artifact is named after it.
    pub base_id: String,
    /// Full descriptor text.
    pub text: String,
}

impl SourceArtifact {
    /// Build an artifact that was not read from disk (tests, stdin).
    pub fn new(
        category: impl Into<String>,
        base_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let base_id = base_id.into();
        Self {
            path: Path::new(&category).join(&base_id),
            category,
            base_id,
            text: text.into(),
        }
    }

    /// `category/base_id`, used as the artifact's name in reports.
    pub fn label(&self) -> String {
        format!("{}/{}", self.category, self.base_id)
    }
}
