// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder synthesis.
//!
//! Turns a [`MetadataRecord`] and its extracted callback bodies into the
//! canonical builder chain:
//!
//! ```text
//! export const zodPlugin = createPlugin()
//!   .named('zod', 'Zod', 'Schema validation')
//!   .forFrameworks(['react', 'vue'])
//!   .inCategory(Category.FORMS)
//!   .withVersion(getVersion('zod')!)
//!   .withDetect((ctx) => { ... })
//!   .withInstall(async (ctx) => { ... })
//!   .withConfigure(async (ctx) => { ... })
//!   .build()
//! ```
//!
//! Output is a pure function of its inputs, so regenerating an unchanged
//! descriptor reproduces the same bytes.

use std::sync::LazyLock;

use plugforge_config::CodegenConfig;
use plugforge_core::CallbackRole;
use plugforge_extract::{CallbackBodies, MetadataRecord};
use regex::Regex;

use crate::identifier::sanitize_identifier;
use crate::literal::{array, doc_line, quoted};

static AWAIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bawait\b").unwrap());

/// Parameter list of synthesized steps, which the default bodies refer to.
const DEFAULT_PARAMS: &str = "ctx";

const IMPORTS: &str = "\
import { createPlugin } from '../builder/plugin-builder.js'
import { getVersion } from '../versions.js'
import type { ProjectContext, ConfigResult, InstallResult } from '../../types/index.js'
import { Category } from '../../types/index.js'
import { installPackages } from '../../utils/package-manager.js'
import { ConfigWriter } from '../../core/config-writer.js'
import { BackupManager } from '../../core/backup-manager.js'
";

/// A synthesized builder artifact, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderArtifact {
    /// Exported symbol of the builder chain.
    pub identifier: String,
    /// Roles whose body was synthesized instead of extracted.
    pub synthesized: Vec<CallbackRole>,
    /// Full artifact text.
    pub text: String,
}

/// File name of the builder artifact for a descriptor stem.
pub fn builder_file_name(base_id: &str, builder_suffix: &str, extension: &str) -> String {
    format!("{base_id}{builder_suffix}.{extension}")
}

/// Category tag used in `.inCategory(..)`.
///
/// The declared tag wins; otherwise the containing directory name is
/// upper-cased (`routing` becomes `ROUTING`).
pub fn category_tag(record: &MetadataRecord, directory: &str) -> String {
    if let Some(tag) = record.category.as_deref().filter(|t| !t.is_empty()) {
        return tag.to_string();
    }

    let tag: String = directory
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();

    if tag.starts_with(|c: char| c.is_ascii_alphabetic()) {
        tag
    } else {
        "UNCATEGORIZED".to_string()
    }
}

/// Synthesize the builder artifact for one descriptor.
///
/// `directory` is the category directory the descriptor lives in, used when
/// the record declares no category.
pub fn synthesize_builder(
    record: &MetadataRecord,
    bodies: &CallbackBodies,
    directory: &str,
    codegen: &CodegenConfig,
) -> BuilderArtifact {
    let name = record.name.as_str();
    let display_name = record.display_name.as_deref().unwrap_or(name);
    let description = record.description.as_deref().unwrap_or_default();
    let identifier = sanitize_identifier(name, &codegen.identifier_suffix);

    let mut text = String::with_capacity(2048);
    text.push_str(IMPORTS);
    text.push('\n');

    text.push_str("/**\n");
    text.push_str(&format!(" * Plugin {}\n", doc_line(display_name)));
    if !description.trim().is_empty() {
        text.push_str(" *\n");
        text.push_str(&format!(" * {}\n", doc_line(description)));
    }
    text.push_str(&format!(
        " * Documentation: {}{}\n",
        codegen.docs_url_base,
        doc_line(name)
    ));
    text.push_str(" */\n");

    text.push_str(&format!("export const {identifier} = createPlugin()\n"));
    text.push_str(&format!(
        "  .named({}, {}, {})\n",
        quoted(name),
        quoted(display_name),
        quoted(description)
    ));
    text.push_str(&format!("  .forFrameworks({})\n", array(&record.frameworks)));
    text.push_str(&format!(
        "  .inCategory(Category.{})\n",
        category_tag(record, directory)
    ));
    let version = match &record.version {
        Some(version) => quoted(version),
        None => format!("getVersion({})!", quoted(name)),
    };
    text.push_str(&format!("  .withVersion({version})\n"));

    for (step, values) in [
        ("incompatibleWith", &record.incompatible_with),
        ("requires", &record.requires),
        ("recommends", &record.recommends),
        ("forBundlers", &record.bundlers),
    ] {
        if !values.is_empty() {
            text.push_str(&format!("  .{step}({})\n", array(values)));
        }
    }
    if record.requires_typescript {
        text.push_str("  .requiresTypeScript()\n");
    }

    let mut synthesized = Vec::new();
    for role in CallbackRole::all() {
        match bodies.get(role) {
            Some(callback) => push_step(&mut text, role, &callback.params, &callback.body),
            None => {
                synthesized.push(role);
                push_step(&mut text, role, DEFAULT_PARAMS, &default_body(role, record));
            }
        }
    }

    text.push_str("  .build()\n");

    tracing::debug!(
        plugin = %name,
        identifier = %identifier,
        synthesized = synthesized.len(),
        "synthesized builder"
    );

    BuilderArtifact {
        identifier,
        synthesized,
        text,
    }
}

/// Emit one callback step. The extracted parameter list is carried as-is so
/// a body written against `context` or a destructured `{ dependencies }`
/// still binds; an empty list falls back to `ctx`.
fn push_step(text: &mut String, role: CallbackRole, params: &str, body: &str) {
    let asynchronous = role.is_async() || AWAIT.is_match(body);
    let prefix = if asynchronous { "async " } else { "" };
    let params = if params.trim().is_empty() {
        DEFAULT_PARAMS
    } else {
        params
    };

    text.push_str(&format!("  .{}({prefix}({params}) => {{\n", role.builder_step()));
    if !body.trim().is_empty() {
        text.push_str(&format!("    {body}\n"));
    }
    text.push_str("  })\n");
}

/// The body emitted for a role the descriptor does not define.
pub fn default_body(role: CallbackRole, record: &MetadataRecord) -> String {
    let name = quoted(&record.name);
    match role {
        CallbackRole::Detect => format!("return ctx.dependencies[{name}] !== undefined"),
        CallbackRole::Install => {
            let package = match &record.version {
                Some(version) => quoted(&format!("{}@{version}", record.name)),
                None => format!("{} + getVersion({name})", quoted(&format!("{}@", record.name))),
            };
            format!(
                "const packages = [{package}]\n    \
                 try {{\n      \
                 await installPackages(ctx, packages)\n      \
                 return {{ success: true }}\n    \
                 }} catch (error) {{\n      \
                 return {{ success: false, message: String(error) }}\n    \
                 }}"
            )
        }
        CallbackRole::Configure => "const files: ConfigResult['files'] = []\n    \
             return { files, success: true }"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use plugforge_extract::ExtractedCallback;

    use super::*;

    fn record(name: &str) -> MetadataRecord {
        MetadataRecord {
            name: name.to_string(),
            frameworks: vec!["react".to_string()],
            ..MetadataRecord::default()
        }
    }

    #[test]
    fn all_defaults_produce_a_complete_chain() {
        let artifact = synthesize_builder(
            &record("widget"),
            &CallbackBodies::default(),
            "utils",
            &CodegenConfig::default(),
        );

        assert_eq!(artifact.identifier, "widgetPlugin");
        assert_eq!(artifact.synthesized, CallbackRole::all().to_vec());

        let text = &artifact.text;
        assert!(text.contains("export const widgetPlugin = createPlugin()\n"));
        assert!(text.contains("  .named('widget', 'widget', '')\n"));
        assert!(text.contains("  .forFrameworks(['react'])\n"));
        assert!(text.contains("  .inCategory(Category.UTILS)\n"));
        assert!(text.contains("  .withVersion(getVersion('widget')!)\n"));
        assert!(text.contains("return ctx.dependencies['widget'] !== undefined"));
        assert!(text.contains("const packages = ['widget@' + getVersion('widget')]"));
        assert!(text.contains("return { files, success: true }"));
        assert!(text.ends_with("  .build()\n"));
        assert!(!text.contains(".incompatibleWith"));
        assert!(!text.contains(".requiresTypeScript"));
    }

    #[test]
    fn steps_appear_in_chain_order() {
        let artifact = synthesize_builder(
            &record("widget"),
            &CallbackBodies::default(),
            "utils",
            &CodegenConfig::default(),
        );
        let text = &artifact.text;
        let positions: Vec<usize> = [".named(", ".withDetect(", ".withInstall(", ".withConfigure(", ".build()"]
            .iter()
            .map(|step| text.find(step).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn extracted_bodies_are_kept_verbatim() {
        let mut bodies = CallbackBodies::default();
        bodies.set(
            CallbackRole::Detect,
            Some(ExtractedCallback::new("ctx", "return 'zustand' in ctx.dependencies")),
        );
        bodies.set(
            CallbackRole::Configure,
            Some(ExtractedCallback::new(
                "ctx",
                "const s = '}'\n    return { files: [], success: true }",
            )),
        );

        let artifact =
            synthesize_builder(&record("zustand"), &bodies, "state", &CodegenConfig::default());

        assert_eq!(artifact.synthesized, vec![CallbackRole::Install]);
        assert!(artifact.text.contains(
            "  .withDetect((ctx) => {\n    return 'zustand' in ctx.dependencies\n  })\n"
        ));
        assert!(artifact.text.contains("const s = '}'\n    return { files: [], success: true }"));
    }

    #[test]
    fn awaiting_detect_becomes_async() {
        let mut bodies = CallbackBodies::default();
        bodies.set(
            CallbackRole::Detect,
            Some(ExtractedCallback::new("ctx", "return await hasFile(ctx, 'x')")),
        );
        let artifact = synthesize_builder(&record("x"), &bodies, "utils", &CodegenConfig::default());
        assert!(artifact.text.contains(".withDetect(async (ctx) => {"));
    }

    #[test]
    fn empty_body_stays_well_formed() {
        let mut bodies = CallbackBodies::default();
        bodies.set(CallbackRole::Configure, Some(ExtractedCallback::new("", "")));
        let artifact = synthesize_builder(&record("x"), &bodies, "utils", &CodegenConfig::default());
        assert!(artifact.text.contains("  .withConfigure(async (ctx) => {\n  })\n"));
    }

    #[test]
    fn renamed_parameter_is_kept_for_its_body() {
        let mut bodies = CallbackBodies::default();
        bodies.set(
            CallbackRole::Install,
            Some(ExtractedCallback::new(
                "context: ProjectContext",
                "await installPackages(context, ['x'])",
            )),
        );
        let artifact = synthesize_builder(&record("x"), &bodies, "utils", &CodegenConfig::default());
        assert!(artifact.text.contains(
            "  .withInstall(async (context: ProjectContext) => {\n    await installPackages(context, ['x'])\n  })\n"
        ));
    }

    #[test]
    fn destructured_parameter_is_kept_for_its_body() {
        let mut bodies = CallbackBodies::default();
        bodies.set(
            CallbackRole::Detect,
            Some(ExtractedCallback::new(
                "{ dependencies }: ProjectContext",
                "return 'x' in dependencies",
            )),
        );
        let artifact = synthesize_builder(&record("x"), &bodies, "utils", &CodegenConfig::default());
        assert!(artifact.text.contains(
            "  .withDetect(({ dependencies }: ProjectContext) => {\n    return 'x' in dependencies\n  })\n"
        ));
        assert!(artifact.text.contains("  .withInstall(async (ctx) => {\n"));
    }

    #[test]
    fn optional_fields_are_emitted_when_present() {
        let record = MetadataRecord {
            name: "@tanstack/react-query".to_string(),
            display_name: Some("TanStack Query".to_string()),
            description: Some("Server state for 'React'".to_string()),
            category: Some("HTTP".to_string()),
            version: Some("^5.0.0".to_string()),
            frameworks: vec!["react".to_string()],
            incompatible_with: vec!["swr".to_string()],
            requires: vec!["react".to_string()],
            recommends: vec!["@tanstack/react-query-devtools".to_string()],
            bundlers: vec!["vite".to_string()],
            requires_typescript: true,
        };
        let artifact =
            synthesize_builder(&record, &CallbackBodies::default(), "http", &CodegenConfig::default());
        let text = &artifact.text;

        assert_eq!(artifact.identifier, "tanstackreactqueryPlugin");
        assert!(text.contains(
            "  .named('@tanstack/react-query', 'TanStack Query', 'Server state for \\'React\\'')\n"
        ));
        assert!(text.contains("  .inCategory(Category.HTTP)\n"));
        assert!(text.contains("  .withVersion('^5.0.0')\n"));
        assert!(text.contains("  .incompatibleWith(['swr'])\n"));
        assert!(text.contains("  .requires(['react'])\n"));
        assert!(text.contains("  .recommends(['@tanstack/react-query-devtools'])\n"));
        assert!(text.contains("  .forBundlers(['vite'])\n"));
        assert!(text.contains("  .requiresTypeScript()\n"));
        assert!(text.contains("const packages = ['@tanstack/react-query@^5.0.0']"));
        assert!(text.contains(" * Documentation: https://www.npmjs.com/package/@tanstack/react-query\n"));
    }

    #[test]
    fn synthesis_is_idempotent() {
        let record = record("widget");
        let codegen = CodegenConfig::default();
        let first = synthesize_builder(&record, &CallbackBodies::default(), "utils", &codegen);
        let second = synthesize_builder(&record, &CallbackBodies::default(), "utils", &codegen);
        assert_eq!(first, second);
    }

    #[test]
    fn category_falls_back_to_directory() {
        let mut rec = record("x");
        assert_eq!(category_tag(&rec, "routing"), "ROUTING");
        assert_eq!(category_tag(&rec, "next-js"), "NEXT_JS");
        assert_eq!(category_tag(&rec, "1x"), "UNCATEGORIZED");
        rec.category = Some("STATE".to_string());
        assert_eq!(category_tag(&rec, "routing"), "STATE");
    }

    #[test]
    fn builder_file_name_appends_suffix() {
        assert_eq!(builder_file_name("zod", "-builder", "ts"), "zod-builder.ts");
    }
}
