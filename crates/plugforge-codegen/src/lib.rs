// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code generation for the descriptor pipeline.
//!
//! - [`identifier`]: plugin name to export symbol, with collision tracking
//! - [`builder`]: the Builder Synthesizer
//! - [`assembler`]: the aggregate registry
//! - [`rewrite`]: the `fsAdapter` source rewrite

pub mod assembler;
pub mod builder;
pub mod identifier;
pub mod literal;
pub mod rewrite;

pub use assembler::{
    AssembledRegistry, RegistryEntry, assemble, assemble_registry, import_extension,
    render_registry, scan_builders,
};
pub use builder::{BuilderArtifact, builder_file_name, category_tag, default_body, synthesize_builder};
pub use identifier::{IdentifierTable, sanitize_identifier};
pub use rewrite::rewrite_fs_adapter;
