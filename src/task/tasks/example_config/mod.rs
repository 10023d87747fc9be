// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Example project configuration.
//!
//! ```text
//! ExampleConfigTask
//! cwd/modbuild.toml  (refuses to overwrite)
//! ```

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use tracing::info;

use crate::config::PROJECT_CONFIG_FILE;
use crate::error::Result;
use crate::task::{TaskContext, Taskable};
use crate::utility::fs::atomic::write_atomic;

/// Template written by `example-config`.
pub const EXAMPLE_PROJECT_CONFIG: &str = r#"# modbuild project configuration.
# Paths are relative to the project root unless noted otherwise.

[project]
# Mod name. The mod is deployed to %APPDATA%/SpaceEngineers/Mods/<name>
# unless paths.mod_dir is set.
name = "MyMod"

[paths]
# mod_dir = "C:/Users/me/AppData/Roaming/SpaceEngineers/Mods/MyMod"
# build_dir = "bin/Debug"

# Files copied by distribute-steam. Later sources win when two of them
# produce the same destination path. Without any [[distribute.sources]]
# the standard Data, Models, Textures and Audio folders are used.
[[distribute.sources]]
root = "Data"
prefix = "Data"

[[distribute.sources]]
root = "Models"
include = ["**/*.mwm"]
prefix = "Models"
optional = true

[[distribute.sources]]
root = "Textures"
include = ["**/*.dds"]
prefix = "Textures"
optional = true

# Model sources compiled by build-models.
# [[models.jobs]]
# source = "Models/Source"
# output = "Models"

[version]
# Files whose AssemblyVersion / AssemblyFileVersion get the git revision.
files = ["Properties/AssemblyInfo.cs"]
"#;

/// Writes [`EXAMPLE_PROJECT_CONFIG`] into a directory.
#[derive(Debug, Clone)]
pub struct ExampleConfigTask {
    target: PathBuf,
}

impl ExampleConfigTask {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            target: dir.join(PROJECT_CONFIG_FILE),
        }
    }

    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// # Errors
    ///
    /// Fails if the target already exists or cannot be written.
    pub async fn run(&self, ctx: &TaskContext) -> Result<()> {
        if tokio::fs::try_exists(&self.target).await.unwrap_or(true) {
            anyhow::bail!(
                "refusing to overwrite existing config: {}",
                self.target.display()
            );
        }

        if ctx.is_dry_run() {
            info!(path = %self.target.display(), "[DRY-RUN] would write example config");
            return Ok(());
        }

        let target = self.target.clone();
        tokio::task::spawn_blocking(move || write_atomic(&target, EXAMPLE_PROJECT_CONFIG.as_bytes()))
            .await??;
        info!(path = %self.target.display(), "wrote example config");
        Ok(())
    }
}

impl Taskable for ExampleConfigTask {
    fn name(&self) -> &'static str {
        "example-config"
    }

    fn run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.run(ctx))
    }
}

#[cfg(test)]
mod tests;
