// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-artifact outcomes of a batch run.

use std::path::PathBuf;

use plugforge_core::{CallbackRole, PlugforgeError};
use serde::Serialize;

/// What happened to one artifact.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A builder artifact was written.
    Generated {
        output: PathBuf,
        identifier: String,
        /// Roles whose body was synthesized.
        synthesized: Vec<CallbackRole>,
    },
    /// The builder artifact on disk already had the generated content.
    Unchanged { output: PathBuf, identifier: String },
    /// The fs-adapter pass rewrote the file.
    Rewritten,
    /// The fs-adapter pass found nothing to rewrite.
    Untouched,
    /// The artifact failed; the batch carried on.
    Failed {
        #[serde(serialize_with = "display")]
        error: PlugforgeError,
    },
}

fn display<S: serde::Serializer>(error: &PlugforgeError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct ArtifactReport {
    /// `category/base_id`, or the path relative to the plugins directory.
    pub artifact: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// The outcome of every artifact a batch touched, in processing order.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub artifacts: Vec<ArtifactReport>,
}

impl BatchReport {
    pub fn push(&mut self, artifact: impl Into<String>, outcome: Outcome) {
        self.artifacts.push(ArtifactReport {
            artifact: artifact.into(),
            outcome,
        });
    }

    /// No processable artifact was found.
    pub fn is_noop(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        self.artifacts.iter().any(|a| a.outcome.is_failure())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts.iter().filter(|a| a.outcome.is_failure())
    }

    pub fn succeeded(&self) -> usize {
        self.artifacts.len() - self.failures().count()
    }

    pub fn get(&self, artifact: &str) -> Option<&Outcome> {
        self.artifacts
            .iter()
            .find(|a| a.artifact == artifact)
            .map(|a| &a.outcome)
    }
}
