// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch runs over the descriptor tree.
//!
//! [`generate_builders`] is the per-artifact stage: read, extract,
//! synthesize, write. Artifacts never see each other except for the
//! corpus-wide duplicate-name and identifier-collision checks, which run
//! between extraction and synthesis. [`run`] adds the assembly barrier:
//! the registry is assembled only after every artifact has been handled.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use plugforge_codegen::{
    AssembledRegistry, IdentifierTable, assemble_registry, builder_file_name, rewrite_fs_adapter,
    synthesize_builder,
};
use plugforge_config::PlugforgeConfig;
use plugforge_core::{PlugforgeError, SourceArtifact};
use plugforge_extract::{CallbackBodies, MetadataRecord, extract_callbacks, extract_metadata};

use crate::discovery::{DescriptorFile, discover_descriptors, discover_sources};
use crate::report::{BatchReport, Outcome};

/// Inputs of a generate run that do not come from the descriptor tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Base identifiers left alone (hand-written builders).
    pub skip: BTreeSet<String>,
    /// Synthesize every callback instead of extracting bodies.
    pub simple: bool,
}

impl GenerateOptions {
    /// Options taken from configuration alone.
    pub fn from_config(config: &PlugforgeConfig) -> Self {
        Self {
            skip: config.pipeline.skip.iter().cloned().collect(),
            simple: !config.pipeline.extract_callbacks,
        }
    }

    /// Add base identifiers to the skip set.
    pub fn skipping<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn simple(mut self, simple: bool) -> Self {
        self.simple = simple;
        self
    }
}

struct Extracted {
    file: DescriptorFile,
    artifact: SourceArtifact,
    record: MetadataRecord,
}

fn read_descriptor(file: &DescriptorFile) -> Result<Extracted, PlugforgeError> {
    let text = std::fs::read_to_string(&file.path)
        .map_err(|e| PlugforgeError::io("failed to read descriptor", &file.path, e))?;
    let artifact = SourceArtifact {
        path: file.path.clone(),
        category: file.category.clone(),
        base_id: file.base_id.clone(),
        text,
    };
    let record = extract_metadata(&artifact)?;
    Ok(Extracted {
        file: file.clone(),
        artifact,
        record,
    })
}

/// Corpus-wide integrity errors, keyed by the label of every artifact involved.
fn integrity_errors(extracted: &[Extracted], identifier_suffix: &str) -> BTreeMap<String, PlugforgeError> {
    let mut errors = BTreeMap::new();

    let mut by_name: BTreeMap<&str, Vec<&Extracted>> = BTreeMap::new();
    for item in extracted {
        by_name.entry(item.record.name.as_str()).or_default().push(item);
    }
    for (name, items) in &by_name {
        if items.len() > 1 {
            let paths: Vec<PathBuf> = items.iter().map(|i| i.file.path.clone()).collect();
            for item in items {
                errors.insert(
                    item.file.label(),
                    PlugforgeError::DuplicateName {
                        name: name.to_string(),
                        paths: paths.clone(),
                    },
                );
            }
        }
    }

    let mut table = IdentifierTable::new(identifier_suffix);
    for name in by_name.keys() {
        table.insert(name);
    }
    for collision in table.collisions() {
        if let PlugforgeError::IdentifierCollision { identifier, names } = collision {
            for item in extracted.iter().filter(|i| names.contains(&i.record.name)) {
                errors.entry(item.file.label()).or_insert_with(|| {
                    PlugforgeError::IdentifierCollision {
                        identifier: identifier.clone(),
                        names: names.clone(),
                    }
                });
            }
        }
    }

    errors
}

/// Generate a builder artifact for every descriptor under `plugins_dir`.
///
/// Only an unreadable plugins directory is an error; everything that goes
/// wrong with a single artifact is reported in the [`BatchReport`].
pub fn generate_builders(
    config: &PlugforgeConfig,
    options: &GenerateOptions,
) -> Result<BatchReport, PlugforgeError> {
    let files = discover_descriptors(config, &options.skip)?;
    let mut report = BatchReport::default();
    if files.is_empty() {
        tracing::info!(dir = %config.pipeline.plugins_dir.display(), "no descriptors to process");
        return Ok(report);
    }

    let mut extracted = Vec::with_capacity(files.len());
    let mut failed: BTreeMap<String, PlugforgeError> = BTreeMap::new();
    for file in &files {
        match read_descriptor(file) {
            Ok(item) => extracted.push(item),
            Err(error) => {
                failed.insert(file.label(), error);
            }
        }
    }
    failed.extend(integrity_errors(&extracted, &config.codegen.identifier_suffix));

    let mut generated: BTreeMap<String, Outcome> = BTreeMap::new();
    for item in &extracted {
        let label = item.file.label();
        if failed.contains_key(&label) {
            continue;
        }
        let outcome = match synthesize_one(item, config, options) {
            Ok(outcome) => outcome,
            Err(error) => {
                failed.insert(label, error);
                continue;
            }
        };
        generated.insert(label, outcome);
    }

    for file in &files {
        let label = file.label();
        if let Some(error) = failed.remove(&label) {
            tracing::warn!(artifact = %label, error = %error, "artifact failed");
            report.push(label, Outcome::Failed { error });
        } else if let Some(outcome) = generated.remove(&label) {
            report.push(label, outcome);
        }
    }

    tracing::info!(
        total = report.artifacts.len(),
        failed = report.failures().count(),
        "generate finished"
    );
    Ok(report)
}

fn synthesize_one(
    item: &Extracted,
    config: &PlugforgeConfig,
    options: &GenerateOptions,
) -> Result<Outcome, PlugforgeError> {
    let bodies = if options.simple {
        CallbackBodies::default()
    } else {
        extract_callbacks(&item.artifact.text)
    };

    let artifact = synthesize_builder(&item.record, &bodies, &item.file.category, &config.codegen);
    let output = item.file.path.with_file_name(builder_file_name(
        &item.file.base_id,
        &config.codegen.builder_suffix,
        &config.pipeline.source_extension,
    ));

    if std::fs::read_to_string(&output).is_ok_and(|existing| existing == artifact.text) {
        tracing::debug!(artifact = %item.file.label(), "builder unchanged");
        return Ok(Outcome::Unchanged {
            output,
            identifier: artifact.identifier,
        });
    }

    std::fs::write(&output, &artifact.text)
        .map_err(|e| PlugforgeError::io("failed to write builder artifact", &output, e))?;
    tracing::info!(
        artifact = %item.file.label(),
        identifier = %artifact.identifier,
        synthesized = artifact.synthesized.len(),
        "builder written"
    );

    Ok(Outcome::Generated {
        output,
        identifier: artifact.identifier,
        synthesized: artifact.synthesized,
    })
}

/// The aggregate written by an assemble step.
#[derive(Debug)]
pub struct RegistrySummary {
    pub path: PathBuf,
    pub assembled: AssembledRegistry,
}

/// Assemble the registry from the builder artifacts currently on disk.
///
/// `None` when there is no builder artifact at all.
pub fn assemble(config: &PlugforgeConfig) -> Result<Option<RegistrySummary>, PlugforgeError> {
    Ok(assemble_registry(&config.pipeline, &config.codegen)?
        .map(|(path, assembled)| RegistrySummary { path, assembled }))
}

/// A generate run followed by assembly.
#[derive(Debug)]
pub struct RunReport {
    pub generated: BatchReport,
    pub registry: Option<RegistrySummary>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.generated.has_failures()
            || self
                .registry
                .as_ref()
                .is_some_and(|r| !r.assembled.excluded.is_empty())
    }
}

/// Generate every builder, then assemble the registry.
pub fn run(config: &PlugforgeConfig, options: &GenerateOptions) -> Result<RunReport, PlugforgeError> {
    let generated = generate_builders(config, options)?;
    let registry = assemble(config)?;
    Ok(RunReport {
        generated,
        registry,
    })
}

/// Thread the context `fsAdapter` through every source file's helper calls.
pub fn migrate_fs_adapter(config: &PlugforgeConfig) -> Result<BatchReport, PlugforgeError> {
    let plugins_dir = &config.pipeline.plugins_dir;
    let mut report = BatchReport::default();

    for path in discover_sources(config)? {
        let label = path
            .strip_prefix(plugins_dir)
            .unwrap_or(&path)
            .display()
            .to_string();

        let outcome = match migrate_file(&path) {
            Ok(true) => {
                tracing::info!(file = %label, "fs adapter threaded");
                Outcome::Rewritten
            }
            Ok(false) => Outcome::Untouched,
            Err(error) => {
                tracing::warn!(file = %label, error = %error, "fs adapter rewrite failed");
                Outcome::Failed { error }
            }
        };
        report.push(label, outcome);
    }

    Ok(report)
}

fn migrate_file(path: &std::path::Path) -> Result<bool, PlugforgeError> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| PlugforgeError::io("failed to read source", path, e))?;
    let Some(rewritten) = rewrite_fs_adapter(&source) else {
        return Ok(false);
    };
    std::fs::write(path, rewritten)
        .map_err(|e| PlugforgeError::io("failed to write source", path, e))?;
    Ok(true)
}
