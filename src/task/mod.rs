// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task execution system.
//!
//! # Architecture
//!
//! ```text
//!   cmd::run_command
//!        |  builds one Task from config (missing keys fail here)
//!        v
//!   Task enum ----> TaskContext (dry-run flag)
//!        |
//!        v
//!   example-config    write modbuild.toml template
//!   git-version       gix revision count -> AssemblyVersion
//!   build-models      ProcessBuilder(MwmBuilder) per job
//!   distribute-steam  Synchronizer -> mod dir
//!   kill-se           LifecycleController::stop_all
//!   start-se          LifecycleController::start
//! ```
//!
//! # The Taskable Pattern
//!
//! Every task struct implements [`Taskable`]. The [`Task`] enum implements it
//! through `impl_taskable_for_task!`, which generates an exhaustive match arm
//! per variant. Adding a task means adding a variant; the compiler points at
//! every dispatch site that needs it.

pub mod tasks;

use futures_util::future::BoxFuture;

use crate::error::Result;

use tasks::build_models::BuildModelsTask;
use tasks::distribute::DistributeTask;
use tasks::example_config::ExampleConfigTask;
use tasks::git_version::GitVersionTask;
use tasks::kill_game::KillGameTask;
use tasks::start_game::StartGameTask;

/// Trait for task implementations.
///
/// `run` returns a `BoxFuture` so the enum can dispatch without naming each
/// task's future type.
pub trait Taskable {
    /// Returns the task name, as typed on the command line.
    fn name(&self) -> &'static str;

    /// Executes the task.
    fn run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>>;
}

/// Context provided to tasks during execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskContext {
    dry_run: bool,
}

impl TaskContext {
    #[must_use]
    pub const fn new() -> Self {
        Self { dry_run: false }
    }

    /// Returns whether this is a dry-run execution.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// One unit of work per invocation.
#[derive(Debug, Clone)]
pub enum Task {
    /// Write an example `modbuild.toml`.
    ExampleConfig(ExampleConfigTask),
    /// Stamp the git revision into assembly version attributes.
    GitVersion(GitVersionTask),
    /// Compile model sources to `.mwm`.
    BuildModels(BuildModelsTask),
    /// Synchronize artifacts into the mod directory.
    Distribute(DistributeTask),
    /// Stop the game and its plugin loader.
    KillGame(KillGameTask),
    /// Start the game and its companions.
    StartGame(StartGameTask),
}

impl Task {
    /// Runs the task.
    ///
    /// # Errors
    ///
    /// Returns the task's error with the task name attached.
    pub async fn execute(&self, ctx: &TaskContext) -> Result<()> {
        let name = Taskable::name(self);
        tracing::debug!(task = name, dry_run = ctx.is_dry_run(), "starting task");
        Taskable::run(self, ctx)
            .await
            .map_err(|e| e.context(format!("task '{name}' failed")))
    }
}

/// Implements `Taskable` for `Task` by delegating to the inner types.
macro_rules! impl_taskable_for_task {
    ($($variant:ident),+ $(,)?) => {
        impl Taskable for Task {
            fn name(&self) -> &'static str {
                match self {
                    $(Task::$variant(t) => Taskable::name(t),)+
                }
            }

            fn run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
                match self {
                    $(Task::$variant(t) => Taskable::run(t, ctx),)+
                }
            }
        }
    };
}

impl_taskable_for_task!(
    ExampleConfig,
    GitVersion,
    BuildModels,
    Distribute,
    KillGame,
    StartGame,
);

#[cfg(test)]
mod tests;
