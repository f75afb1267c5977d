// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry assembly.
//!
//! Scans the builder artifacts currently on disk and emits the aggregate
//! registry: one import per builder, the `pluginRegistry` collection grouped
//! by category, and the load-time validator and query functions.
//!
//! Ordering is lexicographic by category directory, then by descriptor
//! stem, independent of directory enumeration order.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use plugforge_config::{CodegenConfig, PipelineConfig};
use plugforge_core::PlugforgeError;
use regex::Regex;

use crate::identifier::sanitize_identifier;

const RUNTIME: &str = include_str!("../templates/registry_runtime.ts");

const HEADER: &str = "\
import type { Plugin, ProjectContext, Framework } from '../types/index.js'
import { Category } from '../types/index.js'
import { logger } from '../utils/logger.js'

/**
 * Central registry of every available plugin.
 *
 * Plugins are grouped by category and validated once when this module is
 * loaded. Entries that fail validation are excluded and listed in
 * `registryDiagnostics`.
 *
 * This file is generated. Edit the plugin descriptors and regenerate.
 */

// ============================================
// AUTO-GENERATED IMPORTS FROM BUILDER FILES
// ============================================

";

static EXPORT_CONST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*export\s+const\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap());

/// One builder artifact as referenced from the aggregate registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegistryEntry {
    /// Category directory name.
    pub category: String,
    /// Descriptor stem the builder was generated from.
    pub base_id: String,
    /// Import symbol and collection element name.
    pub identifier: String,
    /// Module path relative to the registry, without extension (`state/zustand-builder`).
    pub relative_path: String,
}

/// The rendered aggregate plus whatever was left out of it.
#[derive(Debug)]
pub struct AssembledRegistry {
    /// Entries included in the aggregate, in emission order.
    pub entries: Vec<RegistryEntry>,
    /// Identifier collisions; every entry involved is excluded.
    pub excluded: Vec<PlugforgeError>,
    /// Full aggregate text.
    pub text: String,
}

impl AssembledRegistry {
    /// Entries grouped by category, in emission order.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&RegistryEntry>> {
        let mut groups: BTreeMap<&str, Vec<&RegistryEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.category.as_str()).or_default().push(entry);
        }
        groups
    }
}

/// Import specifier extension for a source extension (`ts` imports as `js`).
pub fn import_extension(source_extension: &str) -> &str {
    match source_extension {
        "ts" | "tsx" => "js",
        "mts" => "mjs",
        "cts" => "cjs",
        other => other,
    }
}

/// Collect one [`RegistryEntry`] per builder artifact under `plugins_dir`.
///
/// The identifier is the artifact's exported symbol; an artifact without an
/// `export const` falls back to the sanitized stem.
pub fn scan_builders(
    pipeline: &PipelineConfig,
    codegen: &CodegenConfig,
) -> Result<Vec<RegistryEntry>, PlugforgeError> {
    let plugins_dir = &pipeline.plugins_dir;
    let file_suffix = format!("{}.{}", codegen.builder_suffix, pipeline.source_extension);
    let mut entries = Vec::new();

    for category_dir in sorted_dir(plugins_dir)? {
        if !category_dir.is_dir() {
            continue;
        }
        let Some(category) = file_name(&category_dir) else {
            continue;
        };
        if pipeline.excluded_dirs.iter().any(|d| d == &category) {
            continue;
        }

        for path in sorted_dir(&category_dir)? {
            let Some(name) = file_name(&path) else {
                continue;
            };
            let Some(base_id) = name.strip_suffix(&file_suffix) else {
                continue;
            };
            if base_id.is_empty() || !path.is_file() {
                continue;
            }

            let text = std::fs::read_to_string(&path)
                .map_err(|e| PlugforgeError::io("failed to read builder artifact", &path, e))?;
            let identifier = EXPORT_CONST
                .captures(&text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| sanitize_identifier(base_id, &codegen.identifier_suffix));

            entries.push(RegistryEntry {
                relative_path: format!("{category}/{base_id}{}", codegen.builder_suffix),
                category: category.clone(),
                base_id: base_id.to_string(),
                identifier,
            });
        }
    }

    tracing::debug!(dir = %plugins_dir.display(), count = entries.len(), "scanned builder artifacts");
    Ok(entries)
}

/// Order `entries`, drop identifier collisions and render the aggregate.
pub fn assemble(mut entries: Vec<RegistryEntry>, source_extension: &str) -> AssembledRegistry {
    entries.sort();
    entries.dedup();

    let mut claims: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for entry in &entries {
        claims
            .entry(entry.identifier.as_str())
            .or_default()
            .insert(entry.relative_path.as_str());
    }

    let mut colliding: BTreeSet<String> = BTreeSet::new();
    let mut excluded = Vec::new();
    for (identifier, paths) in &claims {
        if paths.len() > 1 {
            colliding.insert(identifier.to_string());
            excluded.push(PlugforgeError::IdentifierCollision {
                identifier: identifier.to_string(),
                names: paths.iter().map(|p| p.to_string()).collect(),
            });
        }
    }

    for error in &excluded {
        tracing::warn!(error = %error, "excluding colliding builder artifacts from registry");
    }

    entries.retain(|e| !colliding.contains(&e.identifier));
    let text = render_registry(&entries, import_extension(source_extension));

    AssembledRegistry {
        entries,
        excluded,
        text,
    }
}

/// Render the aggregate text for already-ordered entries.
pub fn render_registry(entries: &[RegistryEntry], import_extension: &str) -> String {
    let mut text = String::from(HEADER);

    for entry in entries {
        text.push_str(&format!(
            "import {{ {} }} from './{}.{import_extension}'\n",
            entry.identifier, entry.relative_path
        ));
    }

    text.push_str(
        "\n/**\n * Every plugin known to the registry, grouped by category.\n */\n\
         export const pluginRegistry: Plugin[] = [\n",
    );

    let mut current: Option<&str> = None;
    for entry in entries {
        if current != Some(entry.category.as_str()) {
            if current.is_some() {
                text.push('\n');
            }
            text.push_str(&format!("  // {}\n", entry.category.to_uppercase()));
            current = Some(entry.category.as_str());
        }
        text.push_str(&format!("  {},\n", entry.identifier));
    }

    text.push_str("]\n");
    text.push_str(RUNTIME);
    text
}

/// Scan, assemble and write the aggregate registry.
///
/// Returns `None` without touching the filesystem when no builder artifact
/// exists.
pub fn assemble_registry(
    pipeline: &PipelineConfig,
    codegen: &CodegenConfig,
) -> Result<Option<(PathBuf, AssembledRegistry)>, PlugforgeError> {
    let entries = scan_builders(pipeline, codegen)?;
    if entries.is_empty() {
        tracing::info!(dir = %pipeline.plugins_dir.display(), "no builder artifacts, registry left untouched");
        return Ok(None);
    }

    let assembled = assemble(entries, &pipeline.source_extension);
    let path = pipeline.plugins_dir.join(&codegen.registry_file);
    std::fs::write(&path, &assembled.text)
        .map_err(|e| PlugforgeError::io("failed to write registry", &path, e))?;

    tracing::info!(
        path = %path.display(),
        plugins = assembled.entries.len(),
        excluded = assembled.excluded.len(),
        "registry written"
    );

    Ok(Some((path, assembled)))
}

fn sorted_dir(dir: &Path) -> Result<Vec<PathBuf>, PlugforgeError> {
    let read = std::fs::read_dir(dir)
        .map_err(|e| PlugforgeError::io("failed to read directory", dir, e))?;
    let mut paths = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| PlugforgeError::io("failed to read directory entry", dir, e))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, base_id: &str, identifier: &str) -> RegistryEntry {
        RegistryEntry {
            category: category.to_string(),
            base_id: base_id.to_string(),
            identifier: identifier.to_string(),
            relative_path: format!("{category}/{base_id}-builder"),
        }
    }

    #[test]
    fn groups_are_sorted_regardless_of_input_order() {
        let shuffled = vec![
            entry("state", "zustand", "zustandPlugin"),
            entry("css", "tailwindcss", "tailwindcssPlugin"),
            entry("state", "jotai", "jotaiPlugin"),
        ];
        let mut reversed = shuffled.clone();
        reversed.reverse();

        let a = assemble(shuffled, "ts");
        let b = assemble(reversed, "ts");
        assert_eq!(a.text, b.text);

        let order: Vec<&str> = a.entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(order, ["tailwindcssPlugin", "jotaiPlugin", "zustandPlugin"]);

        let groups = a.by_category();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["css", "state"]);
    }

    #[test]
    fn renders_imports_and_grouped_collection() {
        let assembled = assemble(
            vec![
                entry("state", "zustand", "zustandPlugin"),
                entry("css", "tailwindcss", "tailwindcssPlugin"),
            ],
            "ts",
        );
        let text = &assembled.text;

        assert!(text.contains("import { tailwindcssPlugin } from './css/tailwindcss-builder.js'\n"));
        assert!(text.contains("import { zustandPlugin } from './state/zustand-builder.js'\n"));
        assert!(text.contains(
            "export const pluginRegistry: Plugin[] = [\n  // CSS\n  tailwindcssPlugin,\n\n  // STATE\n  zustandPlugin,\n]\n"
        ));
        assert!(text.contains("export function getPluginById(id: string)"));
        assert!(text.contains("export function getInstalledPlugins(ctx: ProjectContext)"));
    }

    #[test]
    fn colliding_identifiers_are_excluded_and_reported() {
        let assembled = assemble(
            vec![
                entry("http", "a-b", "abPlugin"),
                entry("utils", "ab", "abPlugin"),
                entry("utils", "zod", "zodPlugin"),
            ],
            "ts",
        );

        assert_eq!(assembled.entries.len(), 1);
        assert_eq!(assembled.entries[0].identifier, "zodPlugin");
        assert_eq!(assembled.excluded.len(), 1);
        assert!(!assembled.text.contains("abPlugin"));
        match &assembled.excluded[0] {
            PlugforgeError::IdentifierCollision { identifier, names } => {
                assert_eq!(identifier, "abPlugin");
                assert_eq!(names, &vec!["http/a-b-builder".to_string(), "utils/ab-builder".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_registry_is_still_well_formed() {
        let assembled = assemble(Vec::new(), "ts");
        assert!(assembled.text.contains("export const pluginRegistry: Plugin[] = [\n]\n"));
    }

    #[test]
    fn import_extensions() {
        assert_eq!(import_extension("ts"), "js");
        assert_eq!(import_extension("mts"), "mjs");
        assert_eq!(import_extension("js"), "js");
    }

    fn write(path: &Path, text: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn scan_reads_exports_and_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("state/zustand-builder.ts"), "export const zustandPlugin = createPlugin()\n");
        write(&root.join("state/zustand.ts"), "export const zustand = {}\n");
        write(&root.join("state/index.ts"), "export * from './zustand'\n");
        write(&root.join("http/swr-builder.ts"), "// no export here\n");
        write(&root.join("builder/plugin-builder.ts"), "export const createPlugin = () => {}\n");
        write(&root.join("registry.ts"), "stale\n");

        let pipeline = PipelineConfig {
            plugins_dir: root.to_path_buf(),
            ..PipelineConfig::default()
        };
        let entries = scan_builders(&pipeline, &CodegenConfig::default()).unwrap();

        assert_eq!(
            entries,
            vec![
                entry("http", "swr", "swrPlugin"),
                entry("state", "zustand", "zustandPlugin"),
            ]
        );
    }

    #[test]
    fn assemble_registry_writes_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("forms/zod-builder.ts"), "export const zodPlugin = createPlugin()\n");

        let pipeline = PipelineConfig {
            plugins_dir: root.to_path_buf(),
            ..PipelineConfig::default()
        };
        let codegen = CodegenConfig::default();

        let (path, _) = assemble_registry(&pipeline, &codegen).unwrap().unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assemble_registry(&pipeline, &codegen).unwrap().unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(path, root.join("registry.ts"));
        assert_eq!(first, second);
        assert!(first.contains("import { zodPlugin } from './forms/zod-builder.js'"));
    }

    #[test]
    fn no_builders_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("state")).unwrap();
        let pipeline = PipelineConfig {
            plugins_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };

        let result = assemble_registry(&pipeline, &CodegenConfig::default()).unwrap();
        assert!(result.is_none());
        assert!(!dir.path().join("registry.ts").exists());
    }
}
