// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Plugforge descriptor pipeline.
//!
//! Four TOML sections (`[pipeline]`, `[codegen]`, `[registry]`, `[log]`)
//! with strict key checking, layered from the system, user and working
//! directory files and overridden by `PLUGFORGE_<SECTION>_<KEY>` variables.
//! Errors render through miette and name the section a stray key belongs to.
//!
//! # Usage
//!
//! ```no_run
//! use plugforge_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("plugins dir: {}", config.pipeline.plugins_dir.display());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, ConfigSource, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{CodegenConfig, LogConfig, PipelineConfig, PlugforgeConfig, RegistryConfig};

/// Load configuration from the file hierarchy and validate it.
pub fn load_and_validate() -> Result<PlugforgeConfig, Vec<ConfigError>> {
    validated(loader::load_config(), || {
        let sources: Vec<ConfigSource> = loader::search_paths()
            .iter()
            .filter_map(|path| ConfigSource::read(path))
            .collect();
        tracing::debug!(count = sources.len(), "read config sources for diagnostics");
        sources
    })
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<PlugforgeConfig, Vec<ConfigError>> {
    validated(loader::load_config_from_path(path), || {
        ConfigSource::read(path).into_iter().collect()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PlugforgeConfig, Vec<ConfigError>> {
    validated(loader::load_config_from_str(toml_content), || {
        vec![ConfigSource::new("<inline>", toml_content)]
    })
}

/// Validate a loaded configuration. Sources are only read when the load
/// failed and the diagnostics need to quote them.
fn validated(
    loaded: Result<PlugforgeConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<ConfigSource>,
) -> Result<PlugforgeConfig, Vec<ConfigError>> {
    let config =
        loaded.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}
