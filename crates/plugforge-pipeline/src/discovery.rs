// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finds descriptor files in the category tree.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use plugforge_config::PlugforgeConfig;
use plugforge_core::PlugforgeError;

/// A descriptor file found on disk, not yet read.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DescriptorFile {
    pub category: String,
    pub base_id: String,
    pub path: PathBuf,
}

impl DescriptorFile {
    pub fn label(&self) -> String {
        format!("{}/{}", self.category, self.base_id)
    }
}

/// Whether a file name is pipeline output or support code rather than a
/// descriptor.
fn is_reserved(name: &str, config: &PlugforgeConfig) -> bool {
    let pipeline = &config.pipeline;
    let builder_tail = format!("{}.{}", config.codegen.builder_suffix, pipeline.source_extension);
    name.ends_with(&builder_tail)
        || name == pipeline.index_file
        || name == config.codegen.registry_file
        || pipeline.excluded_files.iter().any(|f| f == name)
}

fn source_stem<'a>(name: &'a str, extension: &str) -> Option<&'a str> {
    name.strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}

/// Descriptors one level below `plugins_dir`, sorted by category then stem.
///
/// Excluded category directories, builder artifacts, index files and
/// every base identifier in `skip` are left out.
pub fn discover_descriptors(
    config: &PlugforgeConfig,
    skip: &BTreeSet<String>,
) -> Result<Vec<DescriptorFile>, PlugforgeError> {
    let pipeline = &config.pipeline;
    let mut found = Vec::new();

    for category_dir in read_sorted(&pipeline.plugins_dir)? {
        if !category_dir.is_dir() {
            continue;
        }
        let Some(category) = file_name(&category_dir) else {
            continue;
        };
        if pipeline.excluded_dirs.iter().any(|d| *d == category) {
            continue;
        }

        for path in read_sorted(&category_dir)? {
            let Some(name) = file_name(&path) else {
                continue;
            };
            if !path.is_file() || is_reserved(&name, config) {
                continue;
            }
            let Some(base_id) = source_stem(&name, &pipeline.source_extension) else {
                continue;
            };
            if skip.contains(base_id) {
                tracing::debug!(artifact = %format!("{category}/{base_id}"), "skipped");
                continue;
            }

            found.push(DescriptorFile {
                category: category.clone(),
                base_id: base_id.to_string(),
                path: path.clone(),
            });
        }
    }

    tracing::debug!(dir = %pipeline.plugins_dir.display(), count = found.len(), "discovered descriptors");
    Ok(found)
}

/// Every source file under `plugins_dir`, recursively, except builder
/// artifacts, index files, the registry and excluded files. Sorted.
pub fn discover_sources(config: &PlugforgeConfig) -> Result<Vec<PathBuf>, PlugforgeError> {
    let mut found = Vec::new();
    let mut pending = vec![config.pipeline.plugins_dir.clone()];

    while let Some(dir) = pending.pop() {
        for path in read_sorted(&dir)? {
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let Some(name) = file_name(&path) else {
                continue;
            };
            if is_reserved(&name, config) {
                continue;
            }
            if source_stem(&name, &config.pipeline.source_extension).is_some() {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

fn read_sorted(dir: &Path) -> Result<Vec<PathBuf>, PlugforgeError> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| PlugforgeError::io("failed to read directory", dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| PlugforgeError::io("failed to read directory entry", dir, e))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}
