// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git revision stamping.
//!
//! ```text
//! GitVersionTask
//! HEAD ancestor count = N
//! [assembly: AssemblyVersion("1.2.3")]        -> ("1.2.3.N")
//! [assembly: AssemblyFileVersion("1.2.3.7")]  -> ("1.2.3.N")
//! ```
//!
//! Run before compilation so the revision ends up in the assembly.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Context;
use futures_util::future::BoxFuture;
use regex::Regex;
use tracing::{debug, info};

use crate::error::Result;
use crate::git::revision_count;
use crate::task::{TaskContext, Taskable};
use crate::utility::fs::atomic::write_atomic;

static VERSION_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(Assembly(?:File)?Version\s*\(\s*"\d+\.\d+\.\d+)(?:\.(?:\d+|\*))?("\s*\))"#)
        .unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// Replaces the fourth version component of every `AssemblyVersion` and
/// `AssemblyFileVersion` attribute with `revision`.
///
/// Returns `None` if `content` has no such attribute.
#[must_use]
pub fn stamp_version(content: &str, revision: u64) -> Option<String> {
    if !VERSION_ATTRIBUTE.is_match(content) {
        return None;
    }
    let replacement = format!("${{1}}.{revision}${{2}}");
    Some(
        VERSION_ATTRIBUTE
            .replace_all(content, replacement.as_str())
            .into_owned(),
    )
}

/// Stamps the revision count of the repository containing `repo` into
/// each version file.
#[derive(Debug, Clone)]
pub struct GitVersionTask {
    repo: PathBuf,
    files: Vec<PathBuf>,
}

impl GitVersionTask {
    #[must_use]
    pub const fn new(repo: PathBuf, files: Vec<PathBuf>) -> Self {
        Self { repo, files }
    }

    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// # Errors
    ///
    /// Fails if the revision cannot be read, or a version file is missing,
    /// unreadable, or has no version attribute.
    pub async fn run(&self, ctx: &TaskContext) -> Result<()> {
        let repo = self.repo.clone();
        let revision = tokio::task::spawn_blocking(move || revision_count(&repo)).await??;
        info!(revision, repo = %self.repo.display(), "read git revision");

        for file in &self.files {
            Self::stamp_file(file, revision, ctx.is_dry_run())
                .await
                .with_context(|| format!("failed to stamp version in {}", file.display()))?;
        }
        Ok(())
    }

    async fn stamp_file(path: &Path, revision: u64, dry_run: bool) -> Result<()> {
        let content = tokio::fs::read_to_string(path).await?;
        let stamped = stamp_version(&content, revision)
            .context("no AssemblyVersion or AssemblyFileVersion attribute found")?;

        if stamped == content {
            debug!(path = %path.display(), "version already up to date");
            return Ok(());
        }
        if dry_run {
            info!(path = %path.display(), revision, "[DRY-RUN] would stamp version");
            return Ok(());
        }

        let target = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_atomic(&target, stamped.as_bytes())).await??;
        info!(path = %path.display(), revision, "stamped version");
        Ok(())
    }
}

impl Taskable for GitVersionTask {
    fn name(&self) -> &'static str {
        "git-version"
    }

    fn run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.run(ctx))
    }
}
