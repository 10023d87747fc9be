// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::{EXAMPLE_PROJECT_CONFIG, ExampleConfigTask};
use crate::config::ProjectConfig;
use crate::task::TaskContext;

#[test]
fn test_example_config_is_loadable() {
    let config = ProjectConfig::parse(EXAMPLE_PROJECT_CONFIG).expect("example parses");
    assert_eq!(config.project.name, "MyMod");

    let root = Path::new(if cfg!(windows) { r"C:\proj" } else { "/proj" });
    let resolved = config
        .resolve(root, root, Some(root))
        .expect("example resolves");
    assert_eq!(resolved.sources.len(), 3);
    assert!(resolved.model_jobs.is_empty());
}

#[tokio::test]
async fn test_writes_example_config() {
    let dir = TempDir::new().expect("temp dir");
    let task = ExampleConfigTask::new(dir.path());

    task.run(&TaskContext::new()).await.expect("writes");

    let written = fs::read_to_string(dir.path().join("modbuild.toml")).expect("read back");
    assert_eq!(written, EXAMPLE_PROJECT_CONFIG);
}

#[tokio::test]
async fn test_refuses_to_overwrite() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("modbuild.toml"), "# mine").expect("seed");

    let err = ExampleConfigTask::new(dir.path())
        .run(&TaskContext::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("refusing to overwrite"), "{err}");
    assert_eq!(
        fs::read_to_string(dir.path().join("modbuild.toml")).expect("read"),
        "# mine"
    );
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    ExampleConfigTask::new(dir.path())
        .run(&TaskContext::new().with_dry_run(true))
        .await
        .expect("dry run");
    assert!(!dir.path().join("modbuild.toml").exists());
}
