// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Detect-step evaluation against a [`ProjectContext`].
//!
//! Detect bodies are not executed. The dependency names a body looks up are
//! collected and the step reports true when any of them is present in the
//! context. The synthesized default, `ctx.dependencies['x'] !== undefined`,
//! therefore evaluates to exactly "the project depends on x".
//!
//! Lookups are matched on the `dependencies` member whatever the context
//! parameter is called, so `context.dependencies[..]` and a destructured
//! `{ dependencies }` evaluate the same as `ctx.dependencies[..]`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use plugforge_core::ProjectContext;
use regex::Regex;

use crate::definition::CallbackStep;

static INDEXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bdependencies\s*(?:\?\.)?\[\s*(?:'([^']+)'|"([^"]+)"|`([^`$]+)`)\s*\]"#)
        .unwrap()
});

static MEMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bdependencies\s*\??\.\s*([A-Za-z_$][A-Za-z0-9_$]*)").unwrap()
});

static CONTAINS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:'([^']+)'|"([^"]+)")\s+in\s+(?:[A-Za-z_$][\w$]*\??\.)?dependencies\b"#).unwrap()
});

/// Dependency names referenced by a detect body.
pub fn referenced_dependencies(body: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for pattern in [&*INDEXED, &*CONTAINS] {
        for captures in pattern.captures_iter(body) {
            if let Some(name) = (1..=3).find_map(|i| captures.get(i)) {
                names.insert(name.as_str().to_string());
            }
        }
    }
    for captures in MEMBER.captures_iter(body) {
        if let Some(name) = captures.get(1) {
            names.insert(name.as_str().to_string());
        }
    }
    names
}

/// Evaluate a detect step against `ctx`.
pub fn evaluate_detect(step: &CallbackStep, ctx: &ProjectContext) -> bool {
    referenced_dependencies(&step.body)
        .iter()
        .any(|name| ctx.has_dependency(name))
}
