// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Manifest-driven distribution of build artifacts.
//!
//! ```text
//!  sources ──enumerate──> files ─┐
//!                                ├─> SyncPlan { to_copy, to_delete, unchanged }
//!  ManifestStore ──load──> M ────┘            |
//!                                             v
//!   sweep *.tmp leftovers ─> delete stale ─> prune empty dirs ─> copy (temp + rename)
//!                                             |
//!                             all ok? ──> save new manifest
//!                             failure ──> PartialSync, manifest untouched
//! ```
//!
//! Only paths recorded in the manifest, and our own `.modbuild-*.tmp`
//! leftovers, are ever deleted. Files a user put into the destination stay
//! where they are.

pub mod fingerprint;
pub mod manifest;
pub mod path;
pub mod plan;
pub mod source;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

pub use fingerprint::{Fingerprint, FingerprintMode};
pub use manifest::{Manifest, ManifestEntry, ManifestStore};
pub use path::RelativePath;
pub use plan::SyncPlan;
pub use source::{ArtifactSource, SourceFile};

use crate::error::{SyncError, SyncOperation};
use crate::utility::fs::atomic::{copy_atomic, sweep_stale_temps};

/// Outcome of a successful sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub copied: Vec<RelativePath>,
    pub deleted: Vec<RelativePath>,
    pub unchanged: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} copied, {} deleted, {} unchanged",
            self.copied.len(),
            self.deleted.len(),
            self.unchanged
        )
    }
}

/// A computed plan together with everything needed to apply it.
#[derive(Debug)]
pub struct PreparedSync {
    destination_root: PathBuf,
    files: BTreeMap<RelativePath, SourceFile>,
    manifest: Manifest,
    plan: SyncPlan,
}

impl PreparedSync {
    #[must_use]
    pub const fn plan(&self) -> &SyncPlan {
        &self.plan
    }

    #[must_use]
    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    #[must_use]
    pub const fn files(&self) -> &BTreeMap<RelativePath, SourceFile> {
        &self.files
    }
}

/// Reconciles destination roots against artifact sources.
#[derive(Debug, Clone, Default)]
pub struct Synchronizer {
    store: ManifestStore,
    mode: FingerprintMode,
}

impl Synchronizer {
    #[must_use]
    pub const fn new(store: ManifestStore, mode: FingerprintMode) -> Self {
        Self { store, mode }
    }

    #[must_use]
    pub const fn store(&self) -> &ManifestStore {
        &self.store
    }

    /// Enumerates `sources` and diffs them against the stored manifest
    /// without touching the destination.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::EmptySource`] when no source yields a file, and
    /// enumeration or manifest errors otherwise.
    pub fn plan(
        &self,
        sources: &[ArtifactSource],
        destination_root: &Path,
    ) -> Result<PreparedSync, SyncError> {
        let files = source::enumerate(sources, self.mode)?;
        if files.is_empty() {
            return Err(SyncError::EmptySource {
                roots: sources.iter().map(|s| s.root().to_path_buf()).collect(),
            });
        }

        let manifest = self.store.load(destination_root)?;
        let plan = SyncPlan::compute(&files, &manifest, |entry| {
            entry
                .relative_path
                .to_native(destination_root)
                .metadata()
                .is_ok_and(|m| m.is_file() && m.len() == entry.size)
        });

        debug!(
            destination = %destination_root.display(),
            copy = plan.to_copy.len(),
            delete = plan.to_delete.len(),
            unchanged = plan.unchanged.len(),
            "computed sync plan"
        );

        Ok(PreparedSync {
            destination_root: destination_root.to_path_buf(),
            files,
            manifest,
            plan,
        })
    }

    /// Applies a prepared plan and records the new manifest.
    ///
    /// Deletions run first, then empty directories left behind are pruned,
    /// then copies. The manifest is saved only if every step succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::PartialSync`] for the first failing copy or delete.
    pub fn apply(&self, prepared: PreparedSync) -> Result<SyncReport, SyncError> {
        let PreparedSync {
            destination_root: root,
            files,
            manifest,
            plan,
        } = prepared;

        std::fs::create_dir_all(&root).map_err(|source| SyncError::DestinationUnavailable {
            root: root.clone(),
            source,
        })?;

        sweep_interrupted_copies(&root, files.keys().chain(manifest.paths()));

        for rel in &plan.to_delete {
            let target = rel.to_native(&root);
            match std::fs::remove_file(&target) {
                Ok(()) => debug!(path = %rel, "deleted"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %rel, "already gone");
                }
                Err(source) => {
                    return Err(SyncError::PartialSync {
                        operation: SyncOperation::Delete,
                        path: rel.to_string(),
                        source,
                    });
                }
            }
        }

        prune_empty_dirs(&root, &plan.to_delete);

        for rel in &plan.to_copy {
            let Some(file) = files.get(rel) else {
                continue;
            };
            let target = rel.to_native(&root);
            if manifest.get(rel).is_none() && target.exists() {
                warn!(path = %rel, "overwriting file not placed by a previous sync");
            }
            copy_atomic(&file.path, &target).map_err(|source| SyncError::PartialSync {
                operation: SyncOperation::Copy,
                path: rel.to_string(),
                source,
            })?;
            debug!(path = %rel, bytes = file.size, "copied");
        }

        let now = Utc::now();
        let entries = files.into_iter().map(|(rel, file)| {
            match manifest.get(&rel) {
                Some(entry) if plan.unchanged.contains(&rel) => entry.clone(),
                _ => ManifestEntry {
                    relative_path: rel,
                    fingerprint: file.fingerprint,
                    size: file.size,
                    deployed_at: now,
                },
            }
        });
        self.store.save(&Manifest::from_entries(&root, entries))?;

        let report = SyncReport {
            copied: plan.to_copy.into_iter().collect(),
            deleted: plan.to_delete.into_iter().collect(),
            unchanged: plan.unchanged.len(),
        };
        info!(destination = %root.display(), "{report}");
        Ok(report)
    }

    /// Plans and applies in one step.
    ///
    /// # Errors
    ///
    /// See [`Synchronizer::plan`] and [`Synchronizer::apply`].
    pub fn sync(
        &self,
        sources: &[ArtifactSource],
        destination_root: &Path,
    ) -> Result<SyncReport, SyncError> {
        let prepared = self.plan(sources, destination_root)?;
        self.apply(prepared)
    }
}

/// Removes temporaries an interrupted copy left in the root or in any
/// directory holding a source or manifest path.
fn sweep_interrupted_copies<'a>(root: &Path, paths: impl Iterator<Item = &'a RelativePath>) {
    let dirs: BTreeSet<PathBuf> = std::iter::once(root.to_path_buf())
        .chain(paths.flat_map(RelativePath::parents).map(|dir| dir.to_native(root)))
        .collect();

    for dir in &dirs {
        match sweep_stale_temps(dir) {
            Ok(0) => {}
            Ok(removed) => info!(dir = %dir.display(), removed, "removed leftovers of an interrupted sync"),
            Err(e) => warn!(dir = %dir.display(), error = %e, "failed to remove stale temporary files"),
        }
    }
}

/// Removes directories emptied by deletions, deepest first.
///
/// Only ancestors of deleted paths are considered and only empty ones are
/// removed, so directories holding user files survive. The root itself is
/// never an ancestor candidate.
fn prune_empty_dirs(root: &Path, deleted: &BTreeSet<RelativePath>) {
    let candidates: BTreeSet<RelativePath> = deleted.iter().flat_map(RelativePath::parents).collect();

    // Descendants sort after their ancestors, so reverse order is deepest first.
    for dir in candidates.iter().rev() {
        match std::fs::remove_dir(dir.to_native(root)) {
            Ok(()) => debug!(path = %dir, "pruned empty directory"),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::DirectoryNotEmpty
                ) => {}
            Err(e) => warn!(path = %dir, error = %e, "failed to prune directory"),
        }
    }
}
