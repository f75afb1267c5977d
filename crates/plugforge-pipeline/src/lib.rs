// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline entry points.
//!
//! Everything a run needs arrives explicitly: the [`PlugforgeConfig`] and,
//! for generation, [`GenerateOptions`] (skip set, simple mode). Nothing is
//! read from process-wide state.
//!
//! [`PlugforgeConfig`]: plugforge_config::PlugforgeConfig

pub mod batch;
pub mod discovery;
pub mod report;

pub use batch::{
    GenerateOptions, RegistrySummary, RunReport, assemble, generate_builders, migrate_fs_adapter,
    run,
};
pub use discovery::{DescriptorFile, discover_descriptors, discover_sources};
pub use report::{ArtifactReport, BatchReport, Outcome};
