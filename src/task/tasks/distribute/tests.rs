// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;

use tempfile::TempDir;

use super::DistributeTask;
use crate::config::{GlobalConfig, ProjectConfig};
use crate::task::{TaskContext, Taskable};

const PROJECT: &str = r#"
[project]
name = "MyMod"

[paths]
mod_dir = "deploy/MyMod"

[[distribute.sources]]
root = "Data"
prefix = "Data"

[[distribute.sources]]
root = "Models"
include = ["**/*.mwm"]
prefix = "Models"
"#;

fn setup() -> (TempDir, DistributeTask) {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    fs::create_dir_all(root.join("Data/Scripts")).expect("mkdir");
    fs::create_dir_all(root.join("Models/Source")).expect("mkdir");
    fs::write(root.join("Data/Blocks.sbc"), "<Definitions/>").expect("write");
    fs::write(root.join("Data/Scripts/Main.cs"), "class Main {}").expect("write");
    fs::write(root.join("Models/ship.mwm"), "mwm").expect("write");
    fs::write(root.join("Models/Source/ship.fbx"), "fbx").expect("write");

    let mut global = GlobalConfig::default();
    global.deploy.state_dir = Some(root.join("state"));
    let project = ProjectConfig::parse(PROJECT)
        .expect("valid")
        .resolve(root, root, None)
        .expect("resolves");

    let task = DistributeTask::from_config(&global, &project);
    (dir, task)
}

#[tokio::test]
async fn test_distribute_copies_selected_files() {
    let (dir, task) = setup();

    let report = task.sync(false).await.expect("sync").expect("report");

    let dest = dir.path().join("deploy/MyMod");
    assert_eq!(task.destination(), dest);
    assert_eq!(report.copied.len(), 3);
    assert!(dest.join("Data/Scripts/Main.cs").is_file());
    assert!(dest.join("Models/ship.mwm").is_file());
    assert!(!dest.join("Models/Source/ship.fbx").exists());
    // The manifest lives in the configured state directory.
    assert_eq!(fs::read_dir(dir.path().join("state")).expect("state dir").count(), 1);
}

#[tokio::test]
async fn test_distribute_rerun_is_noop() {
    let (_dir, task) = setup();
    task.sync(false).await.expect("first");

    let report = task.sync(false).await.expect("second").expect("report");

    insta::assert_snapshot!(report.to_string(), @"0 copied, 0 deleted, 3 unchanged");
}

#[tokio::test]
async fn test_distribute_dry_run_leaves_destination_alone() {
    let (dir, task) = setup();

    let report = task.sync(true).await.expect("dry run");

    assert!(report.is_none());
    assert!(!dir.path().join("deploy").exists());
    assert!(!dir.path().join("state").exists());
}

#[tokio::test]
async fn test_distribute_through_taskable() {
    let (dir, task) = setup();
    assert_eq!(Taskable::name(&task), "distribute-steam");

    Taskable::run(&task, &TaskContext::new()).await.expect("runs");

    assert!(dir.path().join("deploy/MyMod/Data/Blocks.sbc").is_file());
}

#[tokio::test]
async fn test_distribute_missing_required_source_fails() {
    let (dir, task) = setup();
    fs::remove_dir_all(dir.path().join("Models")).expect("remove");

    let err = task.sync(false).await.unwrap_err();

    assert!(format!("{err:#}").contains("Models"), "{err:#}");
    assert!(!dir.path().join("deploy").exists());
}
