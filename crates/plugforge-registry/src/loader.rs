// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loads the aggregate registry artifact from disk.
//!
//! The aggregate is read the way a module loader would read it: the
//! `pluginRegistry` collection names the members in order, the import list
//! maps each member to its builder artifact, and each artifact's chain is
//! read into a [`PluginDefinition`]. A member whose artifact is missing or
//! has no matching chain becomes a diagnostic instead of failing the load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use plugforge_config::{CodegenConfig, PipelineConfig};
use plugforge_core::PlugforgeError;
use plugforge_extract::scanner::{self, Delimiter};
use regex::Regex;

use crate::definition::PluginDefinition;
use crate::reader::read_definition;
use crate::registry::ValidatedRegistry;
use crate::validate::{Rejection, ValidationIssue, ValidationRules};

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s*\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*\}\s*from\s*['"](\./[^'"]+)['"]"#)
        .unwrap()
});

static COLLECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+const\s+pluginRegistry\s*(?::[^=]+)?=\s*\[").unwrap()
});

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*").unwrap());

static MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Relative imports of the aggregate: `(symbol, specifier)` in file order.
pub fn registry_imports(text: &str) -> Vec<(String, String)> {
    IMPORT
        .captures_iter(text)
        .filter_map(|c| Some((c.get(1)?.as_str().to_string(), c.get(2)?.as_str().to_string())))
        .collect()
}

/// Members of the `pluginRegistry` collection, in order.
pub fn registry_members(text: &str) -> Vec<String> {
    let Some(region) = scanner::extract_balanced(text, &COLLECTION, Delimiter::Bracket) else {
        return Vec::new();
    };
    let inner = LINE_COMMENT.replace_all(scanner::inner(region), "");
    inner
        .split(',')
        .map(str::trim)
        .filter(|m| MEMBER.is_match(m))
        .map(str::to_string)
        .collect()
}

/// Map an import specifier (`./state/zustand-builder.js`) to the builder
/// artifact path under `plugins_dir`.
pub fn resolve_specifier(plugins_dir: &Path, specifier: &str, source_extension: &str) -> PathBuf {
    let relative = specifier.trim_start_matches("./");
    let stem = relative
        .rsplit_once('.')
        .filter(|(_, ext)| !ext.contains('/'))
        .map_or(relative, |(stem, _)| stem);
    plugins_dir.join(format!("{stem}.{source_extension}"))
}

/// Read the definitions referenced by an aggregate registry text.
///
/// Returns the definitions in collection order together with one issue per
/// member that could not be read.
pub fn read_registry(
    text: &str,
    plugins_dir: &Path,
    source_extension: &str,
) -> (Vec<PluginDefinition>, Vec<ValidationIssue>) {
    let imports: HashMap<String, String> = registry_imports(text).into_iter().collect();
    let mut definitions = Vec::new();
    let mut issues = Vec::new();

    for member in registry_members(text) {
        let unreadable = |message: String| ValidationIssue {
            plugin: member.clone(),
            rejection: Rejection::Unreadable(message),
        };

        let Some(specifier) = imports.get(&member) else {
            issues.push(unreadable(format!("'{member}' is not imported")));
            continue;
        };

        let path = resolve_specifier(plugins_dir, specifier, source_extension);
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(plugin = %member, path = %path.display(), error = %e, "builder artifact unreadable");
                issues.push(unreadable(format!("cannot read {}: {e}", path.display())));
                continue;
            }
        };

        match read_definition(&source, &member) {
            Some(mut definition) => {
                definition.source = Some(path);
                definitions.push(definition);
            }
            None => issues.push(unreadable(format!(
                "{} does not export a builder chain named '{member}'",
                path.display()
            ))),
        }
    }

    (definitions, issues)
}

/// Load and validate the aggregate registry written by the assembler.
pub fn load_registry(
    pipeline: &PipelineConfig,
    codegen: &CodegenConfig,
    rules: &ValidationRules,
) -> Result<ValidatedRegistry, PlugforgeError> {
    let path = pipeline.plugins_dir.join(&codegen.registry_file);
    let text = std::fs::read_to_string(&path)
        .map_err(|e| PlugforgeError::io("failed to read registry", &path, e))?;

    let (definitions, issues) =
        read_registry(&text, &pipeline.plugins_dir, &pipeline.source_extension);
    tracing::debug!(
        path = %path.display(),
        definitions = definitions.len(),
        unreadable = issues.len(),
        "read registry"
    );

    Ok(ValidatedRegistry::validate_with(definitions, issues, rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = "\
import type { Plugin } from '../types/index.js'
import { logger } from '../utils/logger.js'

import { tailwindcssPlugin } from './css/tailwindcss-builder.js'
import { zustandPlugin } from './state/zustand-builder.js'

export const pluginRegistry: Plugin[] = [
  // CSS
  tailwindcssPlugin,

  // STATE
  zustandPlugin,
  ghostPlugin,
]
";

    #[test]
    fn imports_skip_non_relative_modules() {
        assert_eq!(
            registry_imports(REGISTRY),
            vec![
                ("tailwindcssPlugin".to_string(), "./css/tailwindcss-builder.js".to_string()),
                ("zustandPlugin".to_string(), "./state/zustand-builder.js".to_string()),
            ]
        );
    }

    #[test]
    fn members_ignore_category_comments() {
        assert_eq!(
            registry_members(REGISTRY),
            vec!["tailwindcssPlugin", "zustandPlugin", "ghostPlugin"]
        );
    }

    #[test]
    fn specifiers_resolve_to_source_files() {
        let dir = Path::new("/p");
        assert_eq!(
            resolve_specifier(dir, "./state/zustand-builder.js", "ts"),
            PathBuf::from("/p/state/zustand-builder.ts")
        );
        assert_eq!(
            resolve_specifier(dir, "./state/zustand-builder", "ts"),
            PathBuf::from("/p/state/zustand-builder.ts")
        );
    }

    #[test]
    fn missing_artifacts_become_issues() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("css")).unwrap();
        std::fs::write(
            dir.path().join("css/tailwindcss-builder.ts"),
            "export const tailwindcssPlugin = createPlugin().named('tailwindcss', 'Tailwind', '').build()\n",
        )
        .unwrap();

        let (definitions, issues) = read_registry(REGISTRY, dir.path(), "ts");

        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name.as_deref(), Some("tailwindcss"));
        assert_eq!(
            definitions[0].source.as_deref(),
            Some(dir.path().join("css/tailwindcss-builder.ts").as_path())
        );

        let plugins: Vec<&str> = issues.iter().map(|i| i.plugin.as_str()).collect();
        assert_eq!(plugins, ["zustandPlugin", "ghostPlugin"]);
    }
}
