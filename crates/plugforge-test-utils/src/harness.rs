// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptor corpus harness.
//!
//! `CorpusHarness` writes a category tree of descriptor files into a temp
//! directory and carries a [`PlugforgeConfig`] whose `plugins_dir` points at
//! it, so tests can drive the pipeline exactly as the CLI does.

use std::path::{Path, PathBuf};

use plugforge_config::PlugforgeConfig;
use plugforge_core::PlugforgeError;

/// Builder for descriptor corpora.
pub struct CorpusHarnessBuilder {
    files: Vec<(PathBuf, String)>,
    config: PlugforgeConfig,
}

impl CorpusHarnessBuilder {
    fn new() -> Self {
        Self {
            files: Vec::new(),
            config: PlugforgeConfig::default(),
        }
    }

    /// Add `<category>/<stem>.ts`.
    pub fn with_descriptor(mut self, category: &str, stem: &str, text: impl Into<String>) -> Self {
        let extension = self.config.pipeline.source_extension.clone();
        self.files
            .push((Path::new(category).join(format!("{stem}.{extension}")), text.into()));
        self
    }

    /// Add an arbitrary file at `relative` under the plugins directory.
    pub fn with_file(mut self, relative: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.files.push((relative.into(), text.into()));
        self
    }

    /// Start from a custom configuration. `plugins_dir` is replaced on build.
    pub fn with_config(mut self, config: PlugforgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Write every file and return the harness.
    pub fn build(self) -> Result<CorpusHarness, PlugforgeError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| PlugforgeError::Io {
            message: format!("failed to create temp dir: {e}"),
            path: None,
            source: Some(e),
        })?;
        let plugins_dir = temp_dir.path().join("plugins");

        for (relative, text) in &self.files {
            let path = plugins_dir.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| PlugforgeError::io("failed to create directory", parent, e))?;
            }
            std::fs::write(&path, text)
                .map_err(|e| PlugforgeError::io("failed to write fixture", &path, e))?;
        }
        std::fs::create_dir_all(&plugins_dir)
            .map_err(|e| PlugforgeError::io("failed to create directory", &plugins_dir, e))?;

        tracing::debug!(dir = %plugins_dir.display(), files = self.files.len(), "corpus ready");

        let mut config = self.config;
        config.pipeline.plugins_dir = plugins_dir;

        Ok(CorpusHarness {
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A descriptor tree on disk plus the configuration that targets it.
pub struct CorpusHarness {
    /// Configuration with `plugins_dir` set to the temp tree.
    pub config: PlugforgeConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl CorpusHarness {
    pub fn builder() -> CorpusHarnessBuilder {
        CorpusHarnessBuilder::new()
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.config.pipeline.plugins_dir
    }

    /// Absolute path of `relative` under the plugins directory.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.plugins_dir().join(relative)
    }

    /// Read a file under the plugins directory, `None` if it does not exist.
    pub fn read(&self, relative: impl AsRef<Path>) -> Option<String> {
        std::fs::read_to_string(self.path(relative)).ok()
    }

    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.path(relative).exists()
    }

    /// Overwrite (or create) a file under the plugins directory.
    pub fn write(&self, relative: impl AsRef<Path>, text: &str) -> Result<(), PlugforgeError> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlugforgeError::io("failed to create directory", parent, e))?;
        }
        std::fs::write(&path, text).map_err(|e| PlugforgeError::io("failed to write file", &path, e))
    }
}
