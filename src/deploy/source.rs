// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact sources and their enumeration.
//!
//! ```text
//! ArtifactSource { root, include, prefix }
//!        |
//!        v  parallel walk, glob filter, fingerprint per file
//! BTreeMap<RelativePath, SourceFile>   (later sources overwrite earlier ones)
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use wax::{Glob, Program};

use super::fingerprint::{Fingerprint, FingerprintMode};
use super::path::RelativePath;
use crate::error::SyncError;
use crate::utility::fs::walk::{WalkOptions, parallel_map_files};

/// A directory of built artifacts plus the rule selecting deployable files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSource {
    root: PathBuf,
    include: Vec<String>,
    prefix: Option<RelativePath>,
    optional: bool,
}

impl ArtifactSource {
    /// Creates a source selecting every file under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include: Vec::new(),
            prefix: None,
            optional: false,
        }
    }

    /// Restricts the selection to files matching any of the glob patterns.
    /// Patterns match against the path relative to the source root.
    #[must_use]
    pub fn with_include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Places the selected files under `prefix` in the destination.
    #[must_use]
    pub fn with_prefix(mut self, prefix: RelativePath) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// A missing optional root contributes nothing instead of failing.
    #[must_use]
    pub const fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn include(&self) -> &[String] {
        &self.include
    }

    #[must_use]
    pub const fn prefix(&self) -> Option<&RelativePath> {
        self.prefix.as_ref()
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    fn compile(&self) -> Result<Vec<Glob<'static>>, SyncError> {
        self.include
            .iter()
            .map(|pattern| {
                Glob::new(pattern)
                    .map(Glob::into_owned)
                    .map_err(|e| SyncError::InvalidPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}

/// One enumerated deployable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub fingerprint: Fingerprint,
    pub size: u64,
}

/// Enumerates and fingerprints every selected file of every source.
///
/// # Errors
///
/// Fails on a missing required root, an invalid pattern, any walk error and
/// any unreadable file. A partial enumeration would turn unseen files into
/// deletions, so nothing is skipped silently.
pub fn enumerate(
    sources: &[ArtifactSource],
    mode: FingerprintMode,
) -> Result<BTreeMap<RelativePath, SourceFile>, SyncError> {
    let mut files = BTreeMap::new();

    for source in sources {
        let root = source.root();
        if !root.is_dir() {
            if source.is_optional() {
                debug!(root = %root.display(), "optional source missing, skipping");
                continue;
            }
            return Err(SyncError::SourceMissing {
                root: root.to_path_buf(),
            });
        }

        let globs = source.compile()?;
        let output = parallel_map_files(root, &WalkOptions::for_artifacts(), |path| {
            let rel = match RelativePath::from_path(root, path) {
                Ok(rel) => rel,
                Err(e) => return Some(Err(SyncError::from(e))),
            };
            if !globs.is_empty() && !globs.iter().any(|g| g.is_match(Path::new(rel.as_str()))) {
                return None;
            }
            Some(
                Fingerprint::of_file(path, mode)
                    .map(|(fingerprint, size)| {
                        let file = SourceFile {
                            path: path.to_path_buf(),
                            fingerprint,
                            size,
                        };
                        (rel, file)
                    })
                    .map_err(|source| SyncError::Fingerprint {
                        path: path.to_path_buf(),
                        source,
                    }),
            )
        })
        .map_err(|e| SyncError::Enumerate {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Some(message) = output.errors().first() {
            return Err(SyncError::Enumerate {
                root: root.to_path_buf(),
                message: message.clone(),
            });
        }

        let mut found = output.into_items().into_iter().collect::<Result<Vec<_>, _>>()?;
        found.sort_by(|a, b| a.0.cmp(&b.0));
        debug!(root = %root.display(), files = found.len(), "enumerated source");

        for (rel, file) in found {
            let rel = match source.prefix() {
                Some(prefix) => rel.prefixed(prefix),
                None => rel,
            };
            if let Some(previous) = files.insert(rel.clone(), file) {
                debug!(path = %rel, shadowed = %previous.path.display(), "later source overrides file");
            }
        }
    }

    Ok(files)
}
