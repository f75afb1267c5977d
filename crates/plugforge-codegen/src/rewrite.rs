// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem adapter rewrite.
//!
//! Descriptor callbacks reach the filesystem through a handful of helper
//! calls. This pass threads the context's `fsAdapter` through each of them:
//!
//! | before                           | after                                                         |
//! |----------------------------------|---------------------------------------------------------------|
//! | `new BackupManager()`            | `new BackupManager(_ctx?.fsAdapter \|\| ctx?.fsAdapter)`         |
//! | `new ConfigWriter(backupManager)`| `new ConfigWriter(backupManager, _ctx?.fsAdapter \|\| ctx?.fsAdapter)` |
//! | `ensureDirectory(p)`             | `ensureDirectory(p, ctx.fsAdapter)`                   |
//! | `readFileContent(p)`             | `readFileContent(p, 'utf-8', ctx.fsAdapter)`          |
//! | `writeFileContent(p, c)`         | `writeFileContent(p, c, 'utf-8', ctx.fsAdapter)`      |
//! | `checkPathExists(p)`             | `checkPathExists(p, ctx.fsAdapter)`                   |
//! | `readPackageJson(p)`             | `readPackageJson(p, ctx.fsAdapter)`                   |
//! | `writePackageJson(p, pkg)`       | `writePackageJson(p, pkg, ctx.fsAdapter)`             |
//!
//! The two constructors also appear in callbacks whose context parameter is
//! the unused `_ctx`, so they take whichever binding is in scope. The
//! helper calls only occur where `ctx` is bound.
//!
//! Every pattern only matches the pre-adapter arity, so a rewritten call is
//! never rewritten again.

use std::sync::LazyLock;

use regex::Regex;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        pattern: Regex::new(pattern).unwrap(),
        replacement,
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(
            r"new BackupManager\(\s*\)",
            "new BackupManager(_ctx?.fsAdapter || ctx?.fsAdapter)",
        ),
        rule(
            r"new ConfigWriter\(\s*backupManager\s*\)",
            "new ConfigWriter(backupManager, _ctx?.fsAdapter || ctx?.fsAdapter)",
        ),
        rule(r"\bensureDirectory\(([^,()]+)\)", "ensureDirectory(${1}, ctx.fsAdapter)"),
        rule(
            r"\breadFileContent\(([^,()]+)\)",
            "readFileContent(${1}, 'utf-8', ctx.fsAdapter)",
        ),
        rule(
            r"\bwriteFileContent\(([^,()]+),\s*([^,()]+)\)",
            "writeFileContent(${1}, ${2}, 'utf-8', ctx.fsAdapter)",
        ),
        rule(r"\bcheckPathExists\(([^,()]+)\)", "checkPathExists(${1}, ctx.fsAdapter)"),
        rule(r"\breadPackageJson\(([^,()]+)\)", "readPackageJson(${1}, ctx.fsAdapter)"),
        rule(
            r"\bwritePackageJson\(([^,()]+),\s*([^,()]+)\)",
            "writePackageJson(${1}, ${2}, ctx.fsAdapter)",
        ),
    ]
});

/// Rewrite every adapter-less helper call in `source`.
///
/// Returns `None` when nothing needed rewriting.
pub fn rewrite_fs_adapter(source: &str) -> Option<String> {
    let mut text = source.to_string();
    for rule in RULES.iter() {
        let replaced = rule.pattern.replace_all(&text, rule.replacement);
        if let std::borrow::Cow::Owned(replaced) = replaced {
            text = replaced;
        }
    }

    (text != source).then_some(text)
}
