// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementation.
//!
//! ```text
//! Cli ──> load_global_config ──> init logging (main)
//!     ──> run_command
//!           banner
//!           resolve root, load + resolve modbuild.toml   (not for example-config)
//!           build_task   (missing keys fail before anything runs)
//!           Task::execute
//!           finished banner
//! ```


use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::cli::Command;
use crate::cli::global::GlobalOptions;
use crate::config::paths::resolve_root;
use crate::config::{GlobalConfig, PROJECT_CONFIG_FILE, ProjectConfig, ResolvedProject};
use crate::error::{ConfigError, Result};
use crate::task::tasks::build_models::BuildModelsTask;
use crate::task::tasks::distribute::DistributeTask;
use crate::task::tasks::example_config::ExampleConfigTask;
use crate::task::tasks::git_version::GitVersionTask;
use crate::task::tasks::kill_game::KillGameTask;
use crate::task::tasks::start_game::StartGameTask;
use crate::task::{Task, TaskContext};

/// Loads the global configuration: `modbuild-global.toml` beside the
/// executable, then `--config` files, then environment overrides.
///
/// # Errors
///
/// Returns the configuration error for a missing or malformed file.
pub fn load_global_config(options: &GlobalOptions) -> Result<GlobalConfig> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let config = GlobalConfig::load(exe_dir.as_deref(), &options.configs)?;
    Ok(config)
}

/// Loads `modbuild.toml` from the project root named on the command line
/// and resolves it.
///
/// # Errors
///
/// Returns the configuration error for a missing, malformed or incomplete project.
pub fn load_project(options: &GlobalOptions) -> Result<ResolvedProject> {
    let (build_dir, root) = resolve_root(&options.build_dir, &options.root)?;
    debug!(root = %root.display(), build_dir = %build_dir.display(), "resolved project paths");

    let appdata = env::var_os("APPDATA").map(PathBuf::from);
    let project = ProjectConfig::load(&root)?
        .resolve(&root, &build_dir, appdata.as_deref())
        .with_context(|| format!("invalid project config in {}", root.display()))?;
    Ok(project)
}

/// Builds the task for `command`, validating every key it needs.
///
/// # Errors
///
/// Returns `ConfigError::MissingKey` when a required key is absent.
pub fn build_task(
    command: Command,
    global: &GlobalConfig,
    project: Option<&ResolvedProject>,
    cwd: &Path,
) -> std::result::Result<Task, ConfigError> {
    let project = || {
        project.ok_or_else(|| ConfigError::NotFound(PROJECT_CONFIG_FILE.to_string()))
    };

    Ok(match command {
        Command::ExampleConfig => Task::ExampleConfig(ExampleConfigTask::new(cwd)),
        Command::GitVersion => {
            let project = project()?;
            Task::GitVersion(GitVersionTask::new(
                project.root.clone(),
                project.version_files.clone(),
            ))
        }
        Command::BuildModels => {
            Task::BuildModels(BuildModelsTask::from_config(global, project()?)?)
        }
        Command::DistributeSteam => {
            Task::Distribute(DistributeTask::from_config(global, project()?))
        }
        Command::KillSe => Task::KillGame(KillGameTask::from_config(global)?),
        Command::StartSe => Task::StartGame(StartGameTask::from_config(global)?),
    })
}

/// Runs one task end to end.
///
/// # Errors
///
/// Returns configuration errors before the task starts, or the task's error.
pub async fn run_command(
    command: Command,
    options: &GlobalOptions,
    global: &GlobalConfig,
) -> Result<()> {
    let name = command.name();
    info!("----- modbuild {} doing {name} -----", env!("CARGO_PKG_VERSION"));
    for line in global.format_options() {
        debug!("{line}");
    }

    let project = if command.needs_project() {
        Some(load_project(options)?)
    } else {
        None
    };
    let cwd = env::current_dir().context("failed to read the current directory")?;

    let task = build_task(command, global, project.as_ref(), &cwd)?;
    let ctx = TaskContext::new().with_dry_run(options.dry);
    task.execute(&ctx).await?;

    info!("----- modbuild finished {name} -----");
    Ok(())
}
