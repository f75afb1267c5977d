// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! rejected at startup instead of silently falling back to a default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Every configuration section with its keys, in file order.
///
/// Drives unknown-key suggestions and the `PLUGFORGE_<SECTION>_<KEY>`
/// environment mapping. Must list exactly the fields of the structs below.
pub const SECTIONS: &[(&str, &[&str])] = &[
    (
        "pipeline",
        &[
            "plugins_dir",
            "skip",
            "excluded_dirs",
            "source_extension",
            "index_file",
            "excluded_files",
            "extract_callbacks",
        ],
    ),
    (
        "codegen",
        &["builder_suffix", "identifier_suffix", "registry_file", "docs_url_base"],
    ),
    ("registry", &["required_roles"]),
    ("log", &["level"]),
];

/// Keys of one section, or `None` for an unknown section.
pub fn section_keys(section: &str) -> Option<&'static [&'static str]> {
    SECTIONS
        .iter()
        .find(|(name, _)| *name == section)
        .map(|(_, keys)| *keys)
}

/// Top-level Plugforge configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlugforgeConfig {
    /// Source discovery and per-artifact stage settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Output naming for builder and registry artifacts.
    #[serde(default)]
    pub codegen: CodegenConfig,

    /// Load-time validation rules.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Where descriptors live and which of them the pipeline processes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Root of the category tree.
    #[serde(default = "default_plugins_dir")]
    pub plugins_dir: PathBuf,

    /// Base identifiers excluded from generation (hand-written builders).
    #[serde(default)]
    pub skip: Vec<String>,

    /// Category directories never scanned.
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,

    /// File extension of descriptor sources, without the dot.
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Directory-level index file name, never treated as a descriptor.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Support files anywhere in the tree that are never descriptors.
    #[serde(default = "default_excluded_files")]
    pub excluded_files: Vec<String>,

    /// Extract callback bodies from descriptors. When false every callback
    /// is synthesized.
    #[serde(default = "default_true")]
    pub extract_callbacks: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            plugins_dir: default_plugins_dir(),
            skip: Vec::new(),
            excluded_dirs: default_excluded_dirs(),
            source_extension: default_source_extension(),
            index_file: default_index_file(),
            excluded_files: default_excluded_files(),
            extract_callbacks: true,
        }
    }
}

fn default_plugins_dir() -> PathBuf {
    PathBuf::from("src/plugins")
}

fn default_excluded_dirs() -> Vec<String> {
    vec!["builder".to_string()]
}

fn default_source_extension() -> String {
    "ts".to_string()
}

fn default_index_file() -> String {
    "index.ts".to_string()
}

fn default_excluded_files() -> Vec<String> {
    vec!["versions.ts".to_string()]
}

fn default_true() -> bool {
    true
}

/// Naming of generated artifacts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CodegenConfig {
    /// Appended to a descriptor's base identifier to name its builder artifact.
    #[serde(default = "default_builder_suffix")]
    pub builder_suffix: String,

    /// Appended to a sanitized plugin name to form its export symbol.
    #[serde(default = "default_identifier_suffix")]
    pub identifier_suffix: String,

    /// Aggregate registry file name, written at the root of `plugins_dir`.
    #[serde(default = "default_registry_file")]
    pub registry_file: String,

    /// Prefix of the documentation link rendered in builder doc comments.
    #[serde(default = "default_docs_url_base")]
    pub docs_url_base: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            builder_suffix: default_builder_suffix(),
            identifier_suffix: default_identifier_suffix(),
            registry_file: default_registry_file(),
            docs_url_base: default_docs_url_base(),
        }
    }
}

fn default_builder_suffix() -> String {
    "-builder".to_string()
}

fn default_identifier_suffix() -> String {
    "Plugin".to_string()
}

fn default_registry_file() -> String {
    "registry.ts".to_string()
}

fn default_docs_url_base() -> String {
    "https://www.npmjs.com/package/".to_string()
}

/// Load-time validation rules for the registry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Callback roles every entry must carry as a construction step.
    #[serde(default = "default_required_roles")]
    pub required_roles: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            required_roles: default_required_roles(),
        }
    }
}

fn default_required_roles() -> Vec<String> {
    vec![
        "detect".to_string(),
        "install".to_string(),
        "configure".to_string(),
    ]
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_table_matches_serialized_model() {
        let value = toml::Value::try_from(PlugforgeConfig::default()).unwrap();
        let table = value.as_table().unwrap();

        let sections: Vec<&str> = SECTIONS.iter().map(|(name, _)| *name).collect();
        let mut serialized: Vec<&str> = table.keys().map(String::as_str).collect();
        let mut expected = sections.clone();
        serialized.sort_unstable();
        expected.sort_unstable();
        assert_eq!(serialized, expected);

        for (section, keys) in SECTIONS {
            let mut fields: Vec<&str> = table[*section]
                .as_table()
                .unwrap()
                .keys()
                .map(String::as_str)
                .collect();
            let mut keys = keys.to_vec();
            fields.sort_unstable();
            keys.sort_unstable();
            assert_eq!(fields, keys, "section [{section}]");
        }
    }

    #[test]
    fn section_keys_looks_up_by_name() {
        assert_eq!(section_keys("log"), Some(&["level"][..]));
        assert_eq!(section_keys("logging"), None);
    }
}
