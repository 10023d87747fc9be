// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Starting the game after a deploy.
//!
//! ```text
//! StartGameTask
//! game.executable + game.args ──> detached launch ──> pid
//! game.companions ({pid}, {exe}) ──> detached launch
//! ```

use futures_util::future::BoxFuture;
use tracing::info;

use crate::config::GlobalConfig;
use crate::core::lifecycle::{
    CompanionSpec, LaunchSpec, LifecycleController, StartReport, SystemProcessTable,
};
use crate::error::{ConfigError, Result};
use crate::task::{TaskContext, Taskable};

#[derive(Debug, Clone)]
pub struct StartGameTask {
    spec: LaunchSpec,
}

impl StartGameTask {
    #[must_use]
    pub const fn new(spec: LaunchSpec) -> Self {
        Self { spec }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if `game.executable` is not set.
    pub fn from_config(global: &GlobalConfig) -> std::result::Result<Self, ConfigError> {
        let executable = global
            .game
            .executable
            .clone()
            .ok_or_else(|| ConfigError::missing("game", "executable"))?;
        Ok(Self::new(LaunchSpec {
            executable,
            args: global.game.args.clone(),
            working_dir: None,
            companions: global
                .game
                .companions
                .iter()
                .map(|c| CompanionSpec {
                    executable: c.executable.clone(),
                    args: c.args.clone(),
                })
                .collect(),
        }))
    }

    #[must_use]
    pub const fn spec(&self) -> &LaunchSpec {
        &self.spec
    }

    /// Launches the game and its companions. Returns `None` for a dry run.
    ///
    /// # Errors
    ///
    /// Returns a launch error naming the executable that could not start.
    pub fn start(&self, dry_run: bool) -> Result<Option<StartReport>> {
        if dry_run {
            info!(
                executable = %self.spec.executable.display(),
                args = %self.spec.args.join(" "),
                companions = self.spec.companions.len(),
                "[DRY-RUN] would start"
            );
            return Ok(None);
        }

        let controller =
            LifecycleController::new(SystemProcessTable::new(), std::time::Duration::ZERO);
        Ok(Some(controller.start(&self.spec)?))
    }
}

impl Taskable for StartGameTask {
    fn name(&self) -> &'static str {
        "start-se"
    }

    fn run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.start(ctx.is_dry_run())?;
            Ok(())
        })
    }
}
