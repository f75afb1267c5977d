// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reads builder chains back out of builder artifacts.
//!
//! A chain starts at `export const <ident> = createPlugin()` and is a run of
//! `.step(args)` calls up to `.build()`. Step arguments are delimited with
//! the balanced scanner, so callback bodies containing their own calls or
//! string literals never end a step early.

use std::sync::LazyLock;

use plugforge_core::CallbackRole;
use plugforge_extract::scanner::{self, Delimiter};
use plugforge_extract::{quoted_tokens, string_literals};
use regex::Regex;

use crate::definition::{CallbackStep, PluginDefinition};

static CHAIN_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+const\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*(?::[^=]+)?=\s*createPlugin\s*\(\s*\)")
        .unwrap()
});

/// `.step(` at the start of the remaining chain, after whitespace and line comments.
static STEP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s|//[^\n]*\n)*\.\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*\(").unwrap()
});

static CATEGORY_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Category\.([A-Za-z][A-Za-z0-9_]*)\s*$").unwrap());

static CALLABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(async\s+)?(?:function\b[^(]*\([^)]*\)|\([^)]*\)(?:\s*:\s*[^=]+?)?\s*=>|[A-Za-z_$][A-Za-z0-9_$]*\s*=>)",
    )
    .unwrap()
});

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[A-Za-z_$][A-Za-z0-9_$.]*\s*$").unwrap());

/// Read every builder chain in `text`.
pub fn read_definitions(text: &str) -> Vec<PluginDefinition> {
    CHAIN_START
        .captures_iter(text)
        .filter_map(|captures| {
            let identifier = captures.get(1)?.as_str();
            let start = captures.get(0)?.end();
            Some(read_chain(identifier, &text[start..]))
        })
        .collect()
}

/// Read the chain bound to `identifier`, if `text` declares one.
pub fn read_definition(text: &str, identifier: &str) -> Option<PluginDefinition> {
    read_definitions(text)
        .into_iter()
        .find(|d| d.identifier == identifier)
}

fn read_chain(identifier: &str, chain: &str) -> PluginDefinition {
    let mut definition = PluginDefinition {
        identifier: identifier.to_string(),
        ..PluginDefinition::default()
    };

    let mut rest = chain;
    while let Some(captures) = STEP.captures(rest) {
        let (Some(whole), Some(step)) = (captures.get(0), captures.get(1)) else {
            break;
        };
        let open = whole.end() - 1;
        let Some(region) = scanner::balanced_region(rest, open, Delimiter::Paren) else {
            tracing::debug!(identifier, step = step.as_str(), "unbalanced builder step");
            break;
        };

        let step = step.as_str();
        if step == "build" {
            break;
        }
        apply_step(&mut definition, step, scanner::inner(region));
        rest = &rest[open + region.len()..];
    }

    definition
}

fn apply_step(definition: &mut PluginDefinition, step: &str, args: &str) {
    match step {
        "named" => {
            let mut literals = string_literals(args).into_iter();
            definition.name = literals.next();
            definition.display_name = literals.next();
            definition.description = literals.next();
        }
        "forFrameworks" => definition.frameworks = quoted_tokens(args),
        "inCategory" => {
            definition.category = CATEGORY_REF
                .captures(args)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .or_else(|| string_literals(args).into_iter().next());
        }
        "withVersion" => {
            // `getVersion('x')!` resolves at runtime and leaves the version undeclared.
            let trimmed = args.trim_start();
            if trimmed.starts_with(['\'', '"', '`']) {
                definition.version = string_literals(args).into_iter().next();
            }
        }
        "incompatibleWith" => definition.incompatible_with = quoted_tokens(args),
        "requires" => definition.requires = quoted_tokens(args),
        "recommends" => definition.recommends = quoted_tokens(args),
        "forBundlers" => definition.bundlers = quoted_tokens(args),
        "requiresTypeScript" => definition.requires_typescript = args.trim() != "false",
        "withDetect" => attach(definition, CallbackRole::Detect, args),
        "withInstall" => attach(definition, CallbackRole::Install, args),
        "withConfigure" => attach(definition, CallbackRole::Configure, args),
        other => {
            tracing::debug!(identifier = %definition.identifier, step = other, "ignoring unknown builder step");
        }
    }
}

fn attach(definition: &mut PluginDefinition, role: CallbackRole, args: &str) {
    if let Some(step) = callable(role, args) {
        definition.callbacks.insert(role, step);
    }
}

/// Interpret a step argument as a callable, if it is one.
fn callable(role: CallbackRole, args: &str) -> Option<CallbackStep> {
    if let Some(captures) = CALLABLE.captures(args) {
        let signature = captures.get(0)?;
        let asynchronous = captures.get(1).is_some();
        let tail = &args[signature.end()..];
        let body = match tail.find(|c: char| !c.is_whitespace()) {
            Some(offset) if tail[offset..].starts_with('{') => {
                let start = signature.end() + offset;
                scanner::balanced_region(args, start, Delimiter::Brace)
                    .map(|region| scanner::inner(region).trim().to_string())
                    .unwrap_or_default()
            }
            // Expression-bodied arrow.
            _ => tail.trim().to_string(),
        };
        return Some(CallbackStep {
            role,
            asynchronous,
            body,
        });
    }

    let reference = args.trim();
    if REFERENCE.is_match(reference) && !matches!(reference, "undefined" | "null") {
        return Some(CallbackStep {
            role,
            asynchronous: false,
            body: String::new(),
        });
    }

    None
}
