// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Model compilation.
//!
//! ```text
//! BuildModelsTask
//! for each job:
//!   MwmBuilder /s:<source> /o:<output>   (cwd = source, bounded by timeout)
//!   exit code 0 ?
//!   output/**/*.mwm non-empty ?
//! ```
//!
//! The builder itself is opaque. Only its exit status and output files
//! are checked.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::info;

use crate::config::{GlobalConfig, ModelBuildJob, ResolvedProject};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ConfigError, Result};
use crate::task::{TaskContext, Taskable};
use crate::utility::fs::walk::find_files;

/// Substitutes `{source}` and `{output}` in builder arguments.
#[must_use]
pub fn builder_args(template: &[String], job: &ModelBuildJob) -> Vec<String> {
    let source = job.source.display().to_string();
    let output = job.output.display().to_string();
    template
        .iter()
        .map(|arg| arg.replace("{source}", &source).replace("{output}", &output))
        .collect()
}

/// Runs the model builder once per configured job.
#[derive(Debug, Clone)]
pub struct BuildModelsTask {
    builder: PathBuf,
    args: Vec<String>,
    jobs: Vec<ModelBuildJob>,
    timeout: Duration,
}

impl BuildModelsTask {
    #[must_use]
    pub const fn new(
        builder: PathBuf,
        args: Vec<String>,
        jobs: Vec<ModelBuildJob>,
        timeout: Duration,
    ) -> Self {
        Self {
            builder,
            args,
            jobs,
            timeout,
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if no builder path or no job is configured.
    pub fn from_config(
        global: &GlobalConfig,
        project: &ResolvedProject,
    ) -> std::result::Result<Self, ConfigError> {
        let builder = global
            .tools
            .mwm_builder
            .clone()
            .ok_or_else(|| ConfigError::missing("tools", "mwm_builder"))?;
        if project.model_jobs.is_empty() {
            return Err(ConfigError::missing("models", "jobs"));
        }
        Ok(Self::new(
            builder,
            global.tools.mwm_builder_args.clone(),
            project.model_jobs.clone(),
            global.timeouts.model_build(),
        ))
    }

    #[must_use]
    pub fn jobs(&self) -> &[ModelBuildJob] {
        &self.jobs
    }

    /// # Errors
    ///
    /// Fails on the first job whose source is missing, whose builder run
    /// fails or times out, or which produces no `.mwm` file.
    pub async fn run(&self, ctx: &TaskContext) -> Result<()> {
        for job in &self.jobs {
            self.build(job, ctx.is_dry_run())
                .await
                .with_context(|| format!("model build failed for {}", job.source.display()))?;
        }
        Ok(())
    }

    async fn build(&self, job: &ModelBuildJob, dry_run: bool) -> Result<()> {
        if !job.source.is_dir() {
            anyhow::bail!("model source directory not found: {}", job.source.display());
        }

        let args = builder_args(&self.args, job);
        if dry_run {
            info!(
                builder = %self.builder.display(),
                args = %args.join(" "),
                "[DRY-RUN] would build models"
            );
            return Ok(());
        }

        tokio::fs::create_dir_all(&job.output)
            .await
            .with_context(|| format!("failed to create {}", job.output.display()))?;

        info!(source = %job.source.display(), output = %job.output.display(), "building models");
        ProcessBuilder::new(&self.builder)
            .args(&args)
            .cwd(&job.source)
            .name("mwmbuilder")
            .timeout(self.timeout)
            .run()
            .await?;

        let output = job.output.clone();
        let models = tokio::task::spawn_blocking(move || find_files(&output, "**/*.mwm")).await??;
        if models.is_empty() {
            anyhow::bail!("builder produced no .mwm files in {}", job.output.display());
        }
        info!(count = models.len(), output = %job.output.display(), "models built");
        Ok(())
    }
}

impl Taskable for BuildModelsTask {
    fn name(&self) -> &'static str {
        "build-models"
    }

    fn run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.run(ctx))
    }
}

#[cfg(test)]
mod tests;
