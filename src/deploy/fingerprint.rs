// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Content fingerprints.
//!
//! ```text
//! sha256      sha256:<64 hex>              reads every byte, exact
//! size-mtime  size-mtime:<len>:<nanos>     metadata only, misses same-size
//!                                          rewrites within one mtime tick
//! ```

use std::fmt;
use std::fmt::Write as _;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// How source files are compared against the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FingerprintMode {
    #[default]
    Sha256,
    SizeMtime,
}

impl fmt::Display for FingerprintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sha256 => "sha256",
            Self::SizeMtime => "size-mtime",
        })
    }
}

/// Canonical fingerprint string as stored in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprints the file at `path`, returning it together with the file size.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn of_file(path: &Path, mode: FingerprintMode) -> io::Result<(Self, u64)> {
        match mode {
            FingerprintMode::Sha256 => {
                let mut file = File::open(path)?;
                let mut hasher = Sha256::new();
                let size = io::copy(&mut file, &mut hasher)?;
                Ok((Self::from_digest(&hasher.finalize()), size))
            }
            FingerprintMode::SizeMtime => {
                let meta = path.metadata()?;
                let nanos = meta
                    .modified()?
                    .duration_since(UNIX_EPOCH)
                    .map_or(0, |d| d.as_nanos());
                Ok((Self(format!("size-mtime:{}:{nanos}", meta.len())), meta.len()))
            }
        }
    }

    /// SHA-256 fingerprint of an in-memory buffer.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self::from_digest(&Sha256::digest(bytes))
    }

    fn from_digest(digest: &[u8]) -> Self {
        let mut out = String::with_capacity(7 + digest.len() * 2);
        out.push_str("sha256:");
        for byte in digest {
            let _ = write!(out, "{byte:02x}");
        }
        Self(out)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
