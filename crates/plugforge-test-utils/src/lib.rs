// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Plugforge integration tests.
//!
//! - [`CorpusHarness`] - descriptor tree in a temp directory, with a config
//!   pointing at it
//! - [`fixtures`] - descriptor texts shaped like real plugin files

pub mod fixtures;
pub mod harness;

pub use harness::{CorpusHarness, CorpusHarnessBuilder};
