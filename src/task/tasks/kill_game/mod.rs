// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stopping the game before a deploy.
//!
//! ```text
//! KillGameTask
//! game.process_names ──> stop_all(graceful, forced)
//! --dry: discovery only
//! ```
//!
//! Plugins loaded by the plugin loader live inside the game process, so
//! both must be gone before their files are replaced.

use std::time::Duration;

use futures_util::future::BoxFuture;
use tracing::info;

use crate::config::GlobalConfig;
use crate::core::lifecycle::{
    LifecycleController, ProcessMatcher, ProcessTable, StopReport, StopTimeouts,
    SystemProcessTable,
};
use crate::error::{ConfigError, Result};
use crate::task::{TaskContext, Taskable};

#[derive(Debug, Clone)]
pub struct KillGameTask {
    process_names: Vec<String>,
    timeouts: StopTimeouts,
    poll_interval: Duration,
}

impl KillGameTask {
    #[must_use]
    pub const fn new(
        process_names: Vec<String>,
        timeouts: StopTimeouts,
        poll_interval: Duration,
    ) -> Self {
        Self {
            process_names,
            timeouts,
            poll_interval,
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if no process name is configured.
    pub fn from_config(global: &GlobalConfig) -> std::result::Result<Self, ConfigError> {
        if global.game.process_names.iter().all(|n| n.trim().is_empty()) {
            return Err(ConfigError::missing("game", "process_names"));
        }
        Ok(Self::new(
            global.game.process_names.clone(),
            StopTimeouts {
                graceful: global.timeouts.graceful(),
                forced: global.timeouts.forced(),
            },
            global.timeouts.poll_interval(),
        ))
    }

    #[must_use]
    pub fn process_names(&self) -> &[String] {
        &self.process_names
    }

    /// Stops every matching process through `table`.
    ///
    /// A dry run only reports what is running.
    ///
    /// # Errors
    ///
    /// Returns the lifecycle error, e.g. a stop timeout naming the survivors.
    pub async fn stop_with<T: ProcessTable>(&self, table: T, dry_run: bool) -> Result<StopReport> {
        let controller = LifecycleController::new(table, self.poll_interval);
        let matcher = ProcessMatcher::new(&self.process_names);

        if dry_run {
            for process in controller.discover(&matcher).await? {
                info!(%process, "[DRY-RUN] would stop");
            }
            return Ok(StopReport::default());
        }

        let report = controller.stop_all(&matcher, self.timeouts).await?;
        for managed in &report.stopped {
            info!(
                process = %managed.process,
                escalated = managed.escalated,
                "stopped"
            );
        }
        Ok(report)
    }
}

impl Taskable for KillGameTask {
    fn name(&self) -> &'static str {
        "kill-se"
    }

    fn run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.stop_with(SystemProcessTable::new(), ctx.is_dry_run())
                .await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests;
