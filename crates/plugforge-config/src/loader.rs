// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Later layers override earlier ones: compiled defaults, then each file of
//! [`search_paths`], then `PLUGFORGE_<SECTION>_<KEY>` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::{PlugforgeConfig, SECTIONS};

/// File name looked up in the working directory.
pub const FILE_NAME: &str = "plugforge.toml";

const ENV_PREFIX: &str = "PLUGFORGE_";

/// Configuration files consulted by [`load_config`], lowest precedence first:
/// system-wide, per-user (XDG), then the working directory.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("/etc/plugforge").join(FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("plugforge").join(FILE_NAME));
    }
    paths.push(PathBuf::from(FILE_NAME));
    paths
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(PlugforgeConfig::default()))
}

/// Load from [`search_paths`] with environment overrides.
pub fn load_config() -> Result<PlugforgeConfig, figment::Error> {
    search_paths()
        .into_iter()
        .fold(defaults(), |figment, path| figment.merge(Toml::file(path)))
        .merge(env_provider())
        .extract()
}

/// Load from a TOML string alone: no files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<PlugforgeConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Load from one explicit file with environment overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlugforgeConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment variable that overrides a dotted key: `codegen.registry_file`
/// is `PLUGFORGE_CODEGEN_REGISTRY_FILE`.
pub fn env_var(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.replace('.', "_").to_ascii_uppercase())
}

/// Maps `PLUGFORGE_<SECTION>_<KEY>` to `section.key`.
///
/// Only the leading section name is split off, since keys such as
/// `plugins_dir` contain underscores themselves.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|name| {
        let name = name.as_str();
        SECTIONS
            .iter()
            .find_map(|(section, _)| {
                let key = name.strip_prefix(section)?.strip_prefix('_')?;
                Some(format!("{section}.{key}"))
            })
            .unwrap_or_else(|| name.to_string())
            .into()
    })
}
