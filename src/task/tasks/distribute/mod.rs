// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact distribution into the local mod folder.
//!
//! ```text
//! DistributeTask
//! sources (Data, Models, ...) --Synchronizer--> paths.mod_dir
//! --dry: plan only, destination untouched
//! ```
//!
//! Stopping the game first is the build script's job: `kill-se` runs before
//! this task and a failing `kill-se` aborts the script.

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use tracing::info;

use crate::config::{GlobalConfig, ResolvedProject};
use crate::deploy::{ArtifactSource, ManifestStore, SyncReport, Synchronizer};
use crate::error::Result;
use crate::task::{TaskContext, Taskable};

#[derive(Debug, Clone)]
pub struct DistributeTask {
    synchronizer: Synchronizer,
    sources: Vec<ArtifactSource>,
    destination: PathBuf,
}

impl DistributeTask {
    #[must_use]
    pub const fn new(
        synchronizer: Synchronizer,
        sources: Vec<ArtifactSource>,
        destination: PathBuf,
    ) -> Self {
        Self {
            synchronizer,
            sources,
            destination,
        }
    }

    #[must_use]
    pub fn from_config(global: &GlobalConfig, project: &ResolvedProject) -> Self {
        let store = global
            .deploy
            .state_dir
            .as_ref()
            .map_or_else(ManifestStore::new, ManifestStore::with_state_dir);
        Self::new(
            Synchronizer::new(store, global.deploy.fingerprint),
            project.sources.clone(),
            project.mod_dir.clone(),
        )
    }

    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Synchronizes, or only plans when dry-running.
    ///
    /// Returns `None` for a dry run.
    ///
    /// # Errors
    ///
    /// Returns the synchronizer's error. A failed sync leaves the manifest
    /// untouched and can be retried.
    pub async fn sync(&self, dry_run: bool) -> Result<Option<SyncReport>> {
        let this = self.clone();
        let report = tokio::task::spawn_blocking(move || {
            if dry_run {
                this.log_plan().map(|()| None)
            } else {
                this.synchronizer
                    .sync(&this.sources, &this.destination)
                    .map(Some)
                    .map_err(anyhow::Error::from)
            }
        })
        .await??;
        Ok(report)
    }

    fn log_plan(&self) -> Result<()> {
        let prepared = self.synchronizer.plan(&self.sources, &self.destination)?;
        let plan = prepared.plan();
        for path in &plan.to_delete {
            info!(%path, "[DRY-RUN] would delete");
        }
        for path in &plan.to_copy {
            info!(%path, "[DRY-RUN] would copy");
        }
        info!(
            destination = %self.destination.display(),
            copy = plan.to_copy.len(),
            delete = plan.to_delete.len(),
            unchanged = plan.unchanged.len(),
            "[DRY-RUN] sync plan"
        );
        Ok(())
    }
}

impl Taskable for DistributeTask {
    fn name(&self) -> &'static str {
        "distribute-steam"
    }

    fn run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.sync(ctx.is_dry_run()).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests;
