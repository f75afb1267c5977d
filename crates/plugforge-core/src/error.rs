// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Plugforge pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across the extraction, synthesis and registry crates.
#[derive(Debug, Error)]
pub enum PlugforgeError {
    /// Configuration errors (invalid TOML, bad values after merging).
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors, scoped to the artifact or directory being touched.
    #[error("io error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        source: Option<std::io::Error>,
    },

    /// A descriptor could not yield a usable metadata record.
    #[error("extraction failed for {artifact}: {message}")]
    Extraction { artifact: String, message: String },

    /// Two distinct plugin names sanitize to the same identifier.
    #[error("identifier collision: `{identifier}` is derived from {}", .names.join(", "))]
    IdentifierCollision {
        identifier: String,
        names: Vec<String>,
    },

    /// The same plugin name is declared by more than one descriptor.
    #[error("duplicate plugin name `{name}` declared in {}", format_paths(.paths))]
    DuplicateName { name: String, paths: Vec<PathBuf> },

    /// A registry entry failed a structural check.
    #[error("plugin `{plugin}` failed validation: {message}")]
    Validation { plugin: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlugforgeError {
    /// Build an [`PlugforgeError::Io`] from a failed filesystem call.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlugforgeError::Io {
            message: format!("{}: {source}", message.into()),
            path: Some(path.into()),
            source: Some(source),
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
