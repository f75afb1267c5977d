// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction stage of the descriptor pipeline.
//!
//! - [`scanner`]: quote/escape-aware balanced-delimiter scanner
//! - [`metadata`]: field patterns producing a [`MetadataRecord`]
//! - [`callbacks`]: `detect` / `install` / `configure` body extraction
//!
//! Extraction is best-effort. Only a missing `name` fails an artifact; an
//! unlocatable callback simply comes back as `None`.

pub mod callbacks;
pub mod metadata;
pub mod scanner;

pub use callbacks::{CallbackBodies, ExtractedCallback, extract_callback, extract_callbacks};
pub use metadata::{MetadataRecord, extract_metadata, quoted_tokens, string_literals, unescape};
pub use scanner::{Delimiter, balanced_region, extract_balanced};
