// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use super::tasks::build_models::BuildModelsTask;
use super::tasks::example_config::ExampleConfigTask;
use super::tasks::git_version::GitVersionTask;
use super::tasks::kill_game::KillGameTask;
use super::tasks::start_game::StartGameTask;
use super::{Task, TaskContext, Taskable};
use crate::core::lifecycle::{LaunchSpec, StopTimeouts};

#[test]
fn test_task_names() {
    let tasks = [
        Task::ExampleConfig(ExampleConfigTask::new(Path::new("."))),
        Task::GitVersion(GitVersionTask::new(PathBuf::from("."), Vec::new())),
        Task::BuildModels(BuildModelsTask::new(
            PathBuf::from("MwmBuilder.exe"),
            Vec::new(),
            Vec::new(),
            Duration::from_secs(1),
        )),
        Task::KillGame(KillGameTask::new(
            vec!["SpaceEngineers".to_string()],
            StopTimeouts::default(),
            Duration::from_millis(10),
        )),
        Task::StartGame(StartGameTask::new(LaunchSpec {
            executable: PathBuf::from("SpaceEngineers.exe"),
            args: Vec::new(),
            working_dir: None,
            companions: Vec::new(),
        })),
    ];

    let names: Vec<_> = tasks.iter().map(Taskable::name).collect();
    assert_eq!(
        names,
        ["example-config", "git-version", "build-models", "kill-se", "start-se"]
    );
}

#[test]
fn test_context_defaults() {
    assert!(!TaskContext::new().is_dry_run());
    assert!(TaskContext::new().with_dry_run(true).is_dry_run());
}

#[tokio::test]
async fn test_execute_names_failed_task() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("modbuild.toml"), "").expect("seed");
    let task = Task::ExampleConfig(ExampleConfigTask::new(dir.path()));

    let err = task.execute(&TaskContext::new()).await.unwrap_err();

    assert_eq!(err.to_string(), "task 'example-config' failed");
    assert!(format!("{err:#}").contains("refusing to overwrite"));
}

#[tokio::test]
async fn test_execute_dispatches_to_inner_task() {
    let dir = TempDir::new().expect("temp dir");
    let task = Task::ExampleConfig(ExampleConfigTask::new(dir.path()));

    task.execute(&TaskContext::new()).await.expect("runs");

    assert!(dir.path().join("modbuild.toml").is_file());
}
