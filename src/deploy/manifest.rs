// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted record of files placed under a destination root.
//!
//! ```text
//! <state_dir>/.modbuild-<sha256(destination_root)[..16]>.json
//! {
//!   "version": 1,
//!   "destination_root": "C:\\Users\\me\\AppData\\Roaming\\SpaceEngineers\\Mods\\MyMod",
//!   "entries": [
//!     { "relative_path": "Data/Blocks.sbc", "fingerprint": "sha256:...",
//!       "size": 2048, "deployed_at": "2026-01-01T12:00:00Z" }
//!   ]
//! }
//! ```
//!
//! `state_dir` defaults to the parent of the destination root, so the record
//! lives next to the tree it describes but never inside it.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::fingerprint::Fingerprint;
use super::path::RelativePath;
use crate::error::ManifestError;
use crate::utility::fs::atomic::write_atomic;

const MANIFEST_VERSION: u32 = 1;

/// One file the synchronizer wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub relative_path: RelativePath,
    pub fingerprint: Fingerprint,
    pub size: u64,
    pub deployed_at: DateTime<Utc>,
}

/// Files the synchronizer placed under one destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    destination_root: PathBuf,
    entries: BTreeMap<RelativePath, ManifestEntry>,
}

impl Manifest {
    #[must_use]
    pub fn empty(destination_root: impl Into<PathBuf>) -> Self {
        Self {
            destination_root: destination_root.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Builds a manifest from entries. A later entry replaces an earlier one
    /// with the same path.
    #[must_use]
    pub fn from_entries(
        destination_root: impl Into<PathBuf>,
        entries: impl IntoIterator<Item = ManifestEntry>,
    ) -> Self {
        Self {
            destination_root: destination_root.into(),
            entries: entries
                .into_iter()
                .map(|e| (e.relative_path.clone(), e))
                .collect(),
        }
    }

    #[must_use]
    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    #[must_use]
    pub fn get(&self, path: &RelativePath) -> Option<&ManifestEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct ManifestFile {
    version: u32,
    destination_root: PathBuf,
    entries: Vec<ManifestEntry>,
}

/// Loads and saves manifests.
#[derive(Debug, Clone, Default)]
pub struct ManifestStore {
    state_dir: Option<PathBuf>,
}

impl ManifestStore {
    /// Stores manifests next to each destination root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores every manifest in `state_dir`.
    #[must_use]
    pub fn with_state_dir(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: Some(state_dir.into()),
        }
    }

    /// Location of the manifest for `destination_root`.
    #[must_use]
    pub fn manifest_path(&self, destination_root: &Path) -> PathBuf {
        let digest = Sha256::digest(destination_root.to_string_lossy().as_bytes());
        let key: String = digest[..8].iter().map(|b| format!("{b:02x}")).collect();
        let dir = self
            .state_dir
            .clone()
            .or_else(|| destination_root.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| destination_root.to_path_buf());
        dir.join(format!(".modbuild-{key}.json"))
    }

    /// Loads the manifest for `destination_root`. No record yields an empty manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the record exists but cannot be read,
    /// parsed, or belongs to another root.
    pub fn load(&self, destination_root: &Path) -> Result<Manifest, ManifestError> {
        let path = self.manifest_path(destination_root);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(manifest = %path.display(), "no manifest, starting empty");
                return Ok(Manifest::empty(destination_root));
            }
            Err(source) => return Err(ManifestError::Read { path, source }),
        };

        let file: ManifestFile =
            serde_json::from_slice(&bytes).map_err(|e| ManifestError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let corrupt = |reason: String| ManifestError::Corrupt {
            path: path.clone(),
            reason,
        };
        if file.version != MANIFEST_VERSION {
            return Err(corrupt(format!("unsupported version {}", file.version)));
        }
        if file.destination_root != destination_root {
            return Err(corrupt(format!(
                "recorded for '{}', not '{}'",
                file.destination_root.display(),
                destination_root.display()
            )));
        }

        let mut entries = BTreeMap::new();
        for entry in file.entries {
            let key = entry.relative_path.clone();
            if entries.insert(key.clone(), entry).is_some() {
                return Err(corrupt(format!("duplicate entry '{key}'")));
            }
        }

        debug!(manifest = %path.display(), entries = entries.len(), "loaded manifest");
        Ok(Manifest {
            destination_root: destination_root.to_path_buf(),
            entries,
        })
    }

    /// Atomically replaces the stored manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Write`] if the record cannot be written. The
    /// previous record is left intact in that case.
    pub fn save(&self, manifest: &Manifest) -> Result<(), ManifestError> {
        let path = self.manifest_path(manifest.destination_root());
        let file = ManifestFile {
            version: MANIFEST_VERSION,
            destination_root: manifest.destination_root.clone(),
            entries: manifest.entries.values().cloned().collect(),
        };
        let json = serde_json::to_vec_pretty(&file).map_err(|e| ManifestError::Write {
            path: path.clone(),
            source: io::Error::other(e),
        })?;

        write_atomic(&path, &json).map_err(|source| ManifestError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(manifest = %path.display(), entries = manifest.len(), "saved manifest");
        Ok(())
    }
}
