// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata extraction from descriptor source text.
//!
//! Every scalar field is a single-shot search for a `key: "value"`
//! assignment. List fields locate the bracketed span after their key with
//! the delimiter scanner and collect the quoted tokens inside it, in order.
//! The category is kept as the raw enumeration tag; it is validated later,
//! at registry load time.

use std::sync::LazyLock;

use plugforge_core::{PlugforgeError, SourceArtifact};
use regex::Regex;
use serde::Serialize;

use crate::scanner::{self, Delimiter};

/// Metadata extracted from one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Unique plugin key. Always non-empty.
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    /// Raw enumeration tag from `Category.TAG`.
    pub category: Option<String>,
    pub version: Option<String>,
    /// Target platform tags, in declaration order.
    pub frameworks: Vec<String>,
    pub incompatible_with: Vec<String>,
    pub requires: Vec<String>,
    pub recommends: Vec<String>,
    pub bundlers: Vec<String>,
    #[serde(rename = "requiresTypeScript")]
    pub requires_typescript: bool,
}

static NAME: LazyLock<Regex> = LazyLock::new(|| scalar_pattern("name"));
static DISPLAY_NAME: LazyLock<Regex> = LazyLock::new(|| scalar_pattern("displayName"));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| scalar_pattern("description"));
static VERSION: LazyLock<Regex> = LazyLock::new(|| scalar_pattern("version"));

static CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bcategory\s*:\s*Category\.([A-Z][A-Z0-9_]*)").unwrap());

static REQUIRES_TYPESCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brequiresTypeScript\s*:\s*(true|false)\b").unwrap());

static FRAMEWORKS: LazyLock<Regex> = LazyLock::new(|| list_pattern("frameworks"));
static INCOMPATIBLE_WITH: LazyLock<Regex> = LazyLock::new(|| list_pattern("incompatibleWith"));
static REQUIRES: LazyLock<Regex> = LazyLock::new(|| list_pattern("requires"));
static RECOMMENDS: LazyLock<Regex> = LazyLock::new(|| list_pattern("recommends"));
static BUNDLERS: LazyLock<Regex> = LazyLock::new(|| list_pattern("bundlers"));

/// A quoted token in any of the three quote styles. Escapes are kept raw.
pub(crate) static QUOTED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|`((?:[^`\\]|\\.)*)`"#).unwrap()
});

fn scalar_pattern(key: &str) -> Regex {
    Regex::new(&format!(
        r#"\b{key}\s*:\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|`((?:[^`\\$]|\\.)*)`)"#
    ))
    .unwrap()
}

fn list_pattern(key: &str) -> Regex {
    Regex::new(&format!(r"\b{key}\s*:\s*\[")).unwrap()
}

/// Extract the metadata record of one descriptor.
///
/// A missing or empty `name` is an extraction failure for the whole
/// artifact; every other field is optional.
pub fn extract_metadata(artifact: &SourceArtifact) -> Result<MetadataRecord, PlugforgeError> {
    let text = artifact.text.as_str();

    let name = scalar(&NAME, text)
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| PlugforgeError::Extraction {
            artifact: artifact.label(),
            message: "could not extract plugin name".to_string(),
        })?;

    let record = MetadataRecord {
        name,
        display_name: scalar(&DISPLAY_NAME, text),
        description: scalar(&DESCRIPTION, text),
        category: CATEGORY
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
        version: scalar(&VERSION, text).filter(|v| !v.is_empty()),
        frameworks: list(&FRAMEWORKS, text),
        incompatible_with: list(&INCOMPATIBLE_WITH, text),
        requires: list(&REQUIRES, text),
        recommends: list(&RECOMMENDS, text),
        bundlers: list(&BUNDLERS, text),
        requires_typescript: REQUIRES_TYPESCRIPT
            .captures(text)
            .and_then(|c| c.get(1))
            .is_some_and(|m| m.as_str() == "true"),
    };

    tracing::debug!(
        artifact = %artifact.label(),
        name = %record.name,
        frameworks = record.frameworks.len(),
        "extracted metadata"
    );

    Ok(record)
}

fn scalar(pattern: &Regex, text: &str) -> Option<String> {
    let captures = pattern.captures(text)?;
    let raw = (1..=3).find_map(|i| captures.get(i))?;
    Some(unescape(raw.as_str()))
}

fn list(anchor: &Regex, text: &str) -> Vec<String> {
    scanner::extract_balanced(text, anchor, Delimiter::Bracket)
        .map(quoted_tokens)
        .unwrap_or_default()
}

/// Every non-empty quoted token in `span`, left to right, unescaped.
pub fn quoted_tokens(span: &str) -> Vec<String> {
    string_literals(span)
        .into_iter()
        .filter(|token| !token.is_empty())
        .collect()
}

/// Every string literal in `span`, left to right, unescaped. Empty
/// literals are kept so positional arguments stay aligned.
pub fn string_literals(span: &str) -> Vec<String> {
    QUOTED_TOKEN
        .captures_iter(span)
        .map(|c| {
            (1..=3)
                .find_map(|i| c.get(i))
                .map(|m| unescape(m.as_str()))
                .unwrap_or_default()
        })
        .collect()
}

/// Resolve backslash escapes of a string literal body.
///
/// Only the escapes that can appear in metadata values are resolved;
/// anything else keeps the escaped character.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(text: &str) -> SourceArtifact {
        SourceArtifact::new("state", "zustand", text)
    }

    const ZUSTAND: &str = r#"
import { Category } from '../../types/index.js'

export const zustandPlugin: Plugin = {
  name: 'zustand',
  displayName: 'Zustand',
  description: "A small, fast state manager (it's tiny)",
  category: Category.STATE,
  version: '^4.5.0',
  frameworks: ['react', 'nextjs'],
  incompatibleWith: ['redux', "@reduxjs/toolkit"],
  requires: [],
  recommends: [
    'immer', // structural sharing
    'zustand-middleware',
  ],
  bundlers: ['vite'],
  requiresTypeScript: true,
}
"#;

    #[test]
    fn extracts_every_field() {
        let record = extract_metadata(&artifact(ZUSTAND)).unwrap();
        assert_eq!(record.name, "zustand");
        assert_eq!(record.display_name.as_deref(), Some("Zustand"));
        assert_eq!(
            record.description.as_deref(),
            Some("A small, fast state manager (it's tiny)")
        );
        assert_eq!(record.category.as_deref(), Some("STATE"));
        assert_eq!(record.version.as_deref(), Some("^4.5.0"));
        assert_eq!(record.frameworks, vec!["react", "nextjs"]);
        assert_eq!(record.incompatible_with, vec!["redux", "@reduxjs/toolkit"]);
        assert!(record.requires.is_empty());
        assert_eq!(record.recommends, vec!["immer", "zustand-middleware"]);
        assert_eq!(record.bundlers, vec!["vite"]);
        assert!(record.requires_typescript);
    }

    #[test]
    fn display_name_does_not_satisfy_name() {
        let err = extract_metadata(&artifact("displayName: 'Only Display'")).unwrap_err();
        assert!(err.to_string().contains("could not extract plugin name"));
        assert!(err.to_string().contains("state/zustand"));
    }

    #[test]
    fn empty_name_is_a_failure() {
        assert!(extract_metadata(&artifact("name: ''")).is_err());
    }

    #[test]
    fn missing_optional_fields_stay_unset() {
        let record = extract_metadata(&artifact(r#"{ name: "widget" }"#)).unwrap();
        assert_eq!(record.name, "widget");
        assert_eq!(record.display_name, None);
        assert_eq!(record.category, None);
        assert_eq!(record.version, None);
        assert!(record.frameworks.is_empty());
        assert!(!record.requires_typescript);
    }

    #[test]
    fn escaped_quotes_are_resolved() {
        let record =
            extract_metadata(&artifact(r#"name: 'x', description: 'It\'s "quoted"'"#)).unwrap();
        assert_eq!(record.description.as_deref(), Some(r#"It's "quoted""#));
    }

    #[test]
    fn scoped_package_names_survive() {
        let record = extract_metadata(&artifact("name: '@tanstack/react-query'")).unwrap();
        assert_eq!(record.name, "@tanstack/react-query");
    }

    #[test]
    fn list_closer_inside_string_does_not_truncate() {
        let record =
            extract_metadata(&artifact("name: 'x', frameworks: ['re]act', 'vue']")).unwrap();
        assert_eq!(record.frameworks, vec!["re]act", "vue"]);
    }

    #[test]
    fn unbalanced_list_stays_empty() {
        let record = extract_metadata(&artifact("name: 'x', frameworks: ['react'")).unwrap();
        assert!(record.frameworks.is_empty());
    }

    #[test]
    fn lowercase_category_reference_is_not_a_tag() {
        let record = extract_metadata(&artifact("name: 'x', category: 'state'")).unwrap();
        assert_eq!(record.category, None);
    }

    #[test]
    fn string_literals_keep_empty_positions() {
        assert_eq!(
            string_literals(r#"('x', "", `it\'s`)"#),
            vec!["x".to_string(), String::new(), "it's".to_string()]
        );
        assert_eq!(quoted_tokens("('x', '')"), vec!["x".to_string()]);
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = extract_metadata(&artifact(ZUSTAND)).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["displayName"], "Zustand");
        assert_eq!(json["incompatibleWith"][1], "@reduxjs/toolkit");
        assert_eq!(json["requiresTypeScript"], true);
    }
}
