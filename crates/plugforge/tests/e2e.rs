// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the `plugforge` binary against corpora on disk.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use plugforge_test_utils::CorpusHarness;
use plugforge_test_utils::fixtures::minimal;

fn write_config(dir: &Path, plugins_dir: &Path) -> PathBuf {
    let path = dir.join("plugforge.toml");
    let text = format!(
        "[pipeline]\nplugins_dir = '{}'\n\n[log]\nlevel = \"warn\"\n",
        plugins_dir.display()
    );
    std::fs::write(&path, text).unwrap();
    path
}

fn plugforge(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plugforge"))
        .arg("--config")
        .arg(config)
        .arg("--plain")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn run_then_check_succeeds() {
    let harness = CorpusHarness::builder()
        .with_descriptor("utils", "widget", minimal("widget", &["react"]))
        .with_descriptor("state", "zustand", minimal("zustand", &["react", "vue"]))
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), harness.plugins_dir());

    let output = plugforge(&config, &["run"]);
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(harness.exists("utils/widget-builder.ts"));
    assert!(harness.exists("registry.ts"));
    assert!(stdout(&output).contains("[OK]"));

    let output = plugforge(&config, &["check"]);
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).contains("2 plugins valid."));

    let output = plugforge(&config, &["search", "ZUST"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("1 plugin matching 'ZUST'."));
}

#[test]
fn empty_corpus_is_a_successful_noop() {
    let harness = CorpusHarness::builder().build().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), harness.plugins_dir());

    let output = plugforge(&config, &["generate"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No descriptors to process."));
    assert!(!harness.exists("registry.ts"));
}

#[test]
fn skipped_descriptor_is_left_alone() {
    let harness = CorpusHarness::builder()
        .with_descriptor("utils", "widget", minimal("widget", &["react"]))
        .with_descriptor("utils", "gadget", minimal("gadget", &["react"]))
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), harness.plugins_dir());

    let output = plugforge(&config, &["generate", "--skip", "gadget"]);
    assert!(output.status.success());
    assert!(harness.exists("utils/widget-builder.ts"));
    assert!(!harness.exists("utils/gadget-builder.ts"));
}

#[test]
fn check_fails_when_a_plugin_is_excluded() {
    let harness = CorpusHarness::builder()
        .with_descriptor("utils", "widget", minimal("widget", &["react"]))
        .with_descriptor("utils", "orphan", minimal("orphan", &[]))
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), harness.plugins_dir());

    assert!(plugforge(&config, &["run"]).status.success());

    let output = plugforge(&config, &["check", "--json"]);
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["plugins"].as_array().unwrap().len(), 1);
    assert_eq!(report["diagnostics"][0]["plugin"], "orphan");
    assert_eq!(report["diagnostics"][0]["rejection"]["kind"], "no_frameworks");
}

#[test]
fn invalid_config_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plugforge.toml");
    std::fs::write(&path, "[pipeline]\nplugins_dirr = 'x'\n").unwrap();

    let output = plugforge(&path, &["generate"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("plugins_dirr"), "stderr: {stderr}");
}
