// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates constraints serde attributes cannot express: non-empty names,
//! identifier-safe suffixes, known callback roles and log levels.

use std::str::FromStr;

use plugforge_core::CallbackRole;

use crate::diagnostic::ConfigError;
use crate::model::PlugforgeConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &PlugforgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.pipeline.plugins_dir.as_os_str().is_empty() {
        errors.push(ConfigError::validation("pipeline.plugins_dir", "must not be empty"));
    }

    let extension = config.pipeline.source_extension.trim();
    if extension.is_empty() || extension.starts_with('.') {
        errors.push(ConfigError::validation(
            "pipeline.source_extension",
            format!(
                "must be a bare extension like `ts`, got `{}`",
                config.pipeline.source_extension
            ),
        ));
    }

    for (key, value) in [
        ("codegen.builder_suffix", &config.codegen.builder_suffix),
        ("codegen.registry_file", &config.codegen.registry_file),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::validation(key, "must not be empty"));
        }
    }

    let suffix = &config.codegen.identifier_suffix;
    if suffix.is_empty()
        || !suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        errors.push(ConfigError::validation(
            "codegen.identifier_suffix",
            format!("`{suffix}` must be non-empty and contain only letters, digits, `_` or `$`"),
        ));
    }

    for role in &config.registry.required_roles {
        if CallbackRole::from_str(role).is_err() {
            errors.push(ConfigError::validation(
                "registry.required_roles",
                format!("unknown callback role `{role}` (expected detect, install or configure)"),
            ));
        }
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::validation(
            "log.level",
            format!(
                "must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.log.level
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&PlugforgeConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_failure() {
        let mut config = PlugforgeConfig::default();
        config.pipeline.source_extension = ".ts".to_string();
        config.codegen.identifier_suffix = "-Plugin".to_string();
        config.registry.required_roles = vec!["detect".to_string(), "teardown".to_string()];
        config.log.level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert!(joined[0].contains("source_extension"));
        assert!(joined[1].contains("identifier_suffix"));
        assert!(joined[2].contains("teardown"));
        assert!(joined[3].contains("log.level"));
    }

    #[test]
    fn empty_registry_file_is_rejected() {
        let mut config = PlugforgeConfig::default();
        config.codegen.registry_file = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("codegen.registry_file"));
    }

    #[test]
    fn partial_toml_keeps_defaults_and_validates() {
        let toml_str = r#"
[pipeline]
plugins_dir = "packages/plugins"
skip = ["zustand"]

[registry]
required_roles = ["detect"]
"#;
        let config: PlugforgeConfig = toml::from_str(toml_str).unwrap();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.pipeline.source_extension, "ts");
        assert_eq!(config.codegen.builder_suffix, "-builder");
    }

    #[test]
    fn misspelled_key_is_rejected_before_validation() {
        let toml_str = "[codegen]\nbuilder_sufix = \"-b\"\n";
        assert!(toml::from_str::<PlugforgeConfig>(toml_str).is_err());
    }
}
