// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use super::{BuildModelsTask, builder_args};
use crate::config::{GlobalConfig, ModelBuildJob, ResolvedProject};
use crate::error::ConfigError;
use crate::task::TaskContext;

fn project(jobs: Vec<ModelBuildJob>) -> ResolvedProject {
    ResolvedProject {
        name: "MyMod".to_string(),
        root: PathBuf::from("/proj"),
        build_dir: PathBuf::from("/proj/bin"),
        mod_dir: PathBuf::from("/mods/MyMod"),
        sources: Vec::new(),
        model_jobs: jobs,
        version_files: Vec::new(),
    }
}

fn job(dir: &TempDir) -> ModelBuildJob {
    let source = dir.path().join("Models/Source");
    std::fs::create_dir_all(&source).expect("mkdir source");
    ModelBuildJob {
        source,
        output: dir.path().join("Models/Built"),
    }
}

#[test]
fn test_builder_args_substitutes_paths() {
    let job = ModelBuildJob {
        source: PathBuf::from("/proj/Models/Source"),
        output: PathBuf::from("/proj/Models"),
    };
    let args = builder_args(&GlobalConfig::default().tools.mwm_builder_args, &job);
    assert_eq!(args, ["/s:/proj/Models/Source", "/o:/proj/Models"]);
}

#[test]
fn test_from_config_requires_builder() {
    let err = BuildModelsTask::from_config(&GlobalConfig::default(), &project(Vec::new()))
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'mwm_builder' in section '[tools]'");
}

#[test]
fn test_from_config_requires_jobs() {
    let mut global = GlobalConfig::default();
    global.tools.mwm_builder = Some(PathBuf::from("MwmBuilder.exe"));
    let err = BuildModelsTask::from_config(&global, &project(Vec::new())).unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey { ref key, .. } if key == "jobs"));
}

#[test]
fn test_from_config_uses_timeout() {
    let mut global = GlobalConfig::default();
    global.tools.mwm_builder = Some(PathBuf::from("MwmBuilder.exe"));
    global.timeouts.model_build_secs = 30;
    let jobs = vec![ModelBuildJob {
        source: PathBuf::from("/a"),
        output: PathBuf::from("/b"),
    }];
    let task = BuildModelsTask::from_config(&global, &project(jobs)).expect("valid");
    assert_eq!(task.timeout, Duration::from_secs(30));
    assert_eq!(task.jobs().len(), 1);
}

#[tokio::test]
async fn test_missing_source_directory_fails() {
    let dir = TempDir::new().expect("temp dir");
    let task = BuildModelsTask::new(
        PathBuf::from("MwmBuilder.exe"),
        Vec::new(),
        vec![ModelBuildJob {
            source: dir.path().join("absent"),
            output: dir.path().join("out"),
        }],
        Duration::from_secs(5),
    );
    let err = task.run(&TaskContext::new()).await.unwrap_err();
    assert!(format!("{err:#}").contains("model source directory not found"), "{err:#}");
}

#[tokio::test]
async fn test_dry_run_does_not_invoke_builder() {
    let dir = TempDir::new().expect("temp dir");
    let job = job(&dir);
    let output = job.output.clone();
    let task = BuildModelsTask::new(
        dir.path().join("does-not-exist.exe"),
        Vec::new(),
        vec![job],
        Duration::from_secs(5),
    );

    task.run(&TaskContext::new().with_dry_run(true))
        .await
        .expect("dry run");
    assert!(!output.exists());
}

#[cfg(unix)]
mod unix {
    use super::*;

    /// Runs `script` through `sh` so the test never executes a freshly
    /// written file.
    fn sh_task(dir: &TempDir, script: &str, job: ModelBuildJob) -> BuildModelsTask {
        let path = dir.path().join("builder.sh");
        std::fs::write(&path, script).expect("write script");
        BuildModelsTask::new(
            PathBuf::from("sh"),
            vec![
                path.display().to_string(),
                "/s:{source}".to_string(),
                "/o:{output}".to_string(),
            ],
            vec![job],
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn test_builds_models() {
        let dir = TempDir::new().expect("temp dir");
        let job = job(&dir);
        let output = job.output.clone();
        let task = sh_task(&dir, "out=\"${2#/o:}\"\ntouch \"$out/ship.mwm\"\n", job);

        task.run(&TaskContext::new()).await.expect("build succeeds");

        assert!(output.join("ship.mwm").is_file());
    }

    #[tokio::test]
    async fn test_no_output_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let task = sh_task(&dir, "exit 0\n", job(&dir));

        let err = task.run(&TaskContext::new()).await.unwrap_err();

        assert!(format!("{err:#}").contains("produced no .mwm files"), "{err:#}");
    }

    #[tokio::test]
    async fn test_builder_failure_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let task = sh_task(&dir, "echo broken >&2\nexit 2\n", job(&dir));

        let err = task.run(&TaskContext::new()).await.unwrap_err();

        assert!(format!("{err:#}").contains("exited with code 2"), "{err:#}");
    }
}
