// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each returns `Ok(false)` when the run completed but reported failures,
//! so the caller can pick the exit code.

use plugforge_config::PlugforgeConfig;
use plugforge_core::PlugforgeError;
use plugforge_pipeline::{BatchReport, GenerateOptions, Outcome, RegistrySummary};
use plugforge_registry::{ValidatedRegistry, ValidationRules};

use crate::output::{Printer, Status};

pub fn generate(
    config: &PlugforgeConfig,
    printer: &Printer,
    skip: Vec<String>,
    simple: bool,
) -> Result<bool, PlugforgeError> {
    let options = options(config, skip, simple);
    let report = plugforge_pipeline::generate_builders(config, &options)?;

    printer.header("generate");
    if report.is_noop() {
        println!("    No descriptors to process.");
        printer.summary(0, "Nothing to do.");
        return Ok(true);
    }
    print_batch(printer, &report);
    let failures = report.failures().count();
    printer.summary(failures, &format!("{} builders up to date.", report.succeeded()));
    Ok(failures == 0)
}

pub fn assemble(config: &PlugforgeConfig, printer: &Printer) -> Result<bool, PlugforgeError> {
    let summary = plugforge_pipeline::assemble(config)?;

    printer.header("assemble");
    let excluded = print_registry(printer, summary.as_ref());
    printer.summary(excluded, "Registry assembled.");
    Ok(excluded == 0)
}

pub fn run(
    config: &PlugforgeConfig,
    printer: &Printer,
    skip: Vec<String>,
    simple: bool,
) -> Result<bool, PlugforgeError> {
    let options = options(config, skip, simple);
    let report = plugforge_pipeline::run(config, &options)?;

    printer.header("run");
    if report.generated.is_noop() {
        println!("    No descriptors to process.");
    } else {
        print_batch(printer, &report.generated);
    }
    let excluded = print_registry(printer, report.registry.as_ref());
    let issues = report.generated.failures().count() + excluded;
    printer.summary(issues, "All artifacts generated.");
    Ok(!report.has_failures())
}

pub fn check(config: &PlugforgeConfig, printer: &Printer, json: bool) -> Result<bool, PlugforgeError> {
    let registry = load(config)?;

    if json {
        let value = serde_json::json!({
            "plugins": registry.plugins(),
            "diagnostics": registry.diagnostics(),
            "warnings": registry.warnings(),
        });
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| PlugforgeError::Internal(format!("failed to render JSON: {e}")))?;
        println!("{text}");
        return Ok(registry.diagnostics().is_empty());
    }

    printer.header("check");
    for plugin in registry.plugins() {
        printer.line(
            Status::Ok,
            &plugin.name,
            &format!("{} ({})", plugin.display_name, plugin.category),
        );
    }
    for warning in registry.warnings() {
        printer.line(Status::Warn, &warning.plugin, &warning.message);
    }
    for issue in registry.diagnostics() {
        printer.line(Status::Fail, &issue.plugin, &issue.rejection.to_string());
    }
    printer.summary(
        registry.diagnostics().len() + registry.warnings().len(),
        &format!("{} plugins valid.", registry.len()),
    );
    Ok(registry.diagnostics().is_empty())
}

pub fn search(config: &PlugforgeConfig, printer: &Printer, query: &str) -> Result<bool, PlugforgeError> {
    let registry = load(config)?;
    let hits = registry.search_plugins(query);

    printer.header("search");
    for plugin in &hits {
        printer.line(Status::Ok, &plugin.name, &plugin.description);
    }
    println!();
    let plugin_word = if hits.len() == 1 { "plugin" } else { "plugins" };
    println!("  {} {plugin_word} matching '{query}'.", hits.len());
    println!();
    Ok(true)
}

pub fn migrate_fs_adapter(config: &PlugforgeConfig, printer: &Printer) -> Result<bool, PlugforgeError> {
    let report = plugforge_pipeline::migrate_fs_adapter(config)?;

    printer.header("migrate-fs-adapter");
    let mut rewritten = 0;
    for artifact in &report.artifacts {
        match &artifact.outcome {
            Outcome::Rewritten => {
                rewritten += 1;
                printer.line(Status::Ok, &artifact.artifact, "rewritten");
            }
            Outcome::Failed { error } => {
                printer.line(Status::Fail, &artifact.artifact, &error.to_string());
            }
            _ => {}
        }
    }
    let failures = report.failures().count();
    printer.summary(failures, &format!("{rewritten} files rewritten."));
    Ok(failures == 0)
}

fn options(config: &PlugforgeConfig, skip: Vec<String>, simple: bool) -> GenerateOptions {
    let options = GenerateOptions::from_config(config).skipping(skip);
    if simple { options.simple(true) } else { options }
}

fn load(config: &PlugforgeConfig) -> Result<ValidatedRegistry, PlugforgeError> {
    let rules = ValidationRules::from_config(&config.registry)?;
    plugforge_registry::load_registry(&config.pipeline, &config.codegen, &rules)
}

fn print_batch(printer: &Printer, report: &BatchReport) {
    for artifact in &report.artifacts {
        match &artifact.outcome {
            Outcome::Generated {
                identifier,
                synthesized,
                ..
            } => {
                let message = if synthesized.is_empty() {
                    format!("generated {identifier}")
                } else {
                    let roles: Vec<String> = synthesized.iter().map(|r| r.to_string()).collect();
                    format!("generated {identifier} (synthesized {})", roles.join(", "))
                };
                printer.line(Status::Ok, &artifact.artifact, &message);
            }
            Outcome::Unchanged { identifier, .. } => {
                printer.line(Status::Ok, &artifact.artifact, &format!("{identifier} unchanged"));
            }
            Outcome::Failed { error } => {
                printer.line(Status::Fail, &artifact.artifact, &error.to_string());
            }
            Outcome::Rewritten | Outcome::Untouched => {}
        }
    }
}

/// Prints the assembled registry and returns how many builders it excluded.
fn print_registry(printer: &Printer, summary: Option<&RegistrySummary>) -> usize {
    let Some(summary) = summary else {
        printer.line(Status::Warn, "registry", "no builder artifacts found, nothing written");
        return 0;
    };
    for (category, entries) in summary.assembled.by_category() {
        printer.line(
            Status::Ok,
            category,
            &format!("{} plugins", entries.len()),
        );
    }
    for error in &summary.assembled.excluded {
        printer.line(Status::Fail, "registry", &error.to_string());
    }
    println!("    wrote {}", summary.path.display());
    summary.assembled.excluded.len()
}
