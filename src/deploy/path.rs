// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Destination-relative paths.
//!
//! ```text
//! "Models\Ships\frigate.mwm"  -> Models/Ships/frigate.mwm   ok
//! "/etc/passwd"               -> rooted                     rejected
//! "Data/../../x"              -> parent component           rejected
//! "C:foo"                     -> drive prefix               rejected
//! "Data/a:b.sbc"              -> ok on Unix, stream on Windows (rejected)
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PathError;

fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// A normalized, `/`-separated path that cannot escape the root it is joined to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativePath(String);

impl RelativePath {
    /// Parses and normalizes a relative path. Both `/` and `\` separate segments.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] for empty, rooted, drive-prefixed paths and for
    /// paths containing `.`, `..` or empty segments.
    pub fn new(raw: &str) -> Result<Self, PathError> {
        let fail = |reason| PathError {
            path: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(fail("empty path"));
        }
        if raw.starts_with(['/', '\\']) {
            return Err(fail("rooted path"));
        }
        if raw.contains('\0') {
            return Err(fail("NUL byte"));
        }
        if has_drive_prefix(raw) {
            return Err(fail("drive prefix"));
        }
        // `name:stream` addresses an NTFS alternate data stream.
        if cfg!(windows) && raw.contains(':') {
            return Err(fail("alternate data stream"));
        }

        let mut segments = Vec::new();
        for segment in raw.split(['/', '\\']) {
            match segment {
                "" => return Err(fail("empty segment")),
                "." => return Err(fail("current directory component")),
                ".." => return Err(fail("parent directory component")),
                s => segments.push(s),
            }
        }

        Ok(Self(segments.join("/")))
    }

    /// Builds a relative path from `path` relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if `path` is not under `root` or is not valid UTF-8.
    pub fn from_path(root: &Path, path: &Path) -> Result<Self, PathError> {
        let fail = |reason| PathError {
            path: path.display().to_string(),
            reason,
        };

        let rel = path.strip_prefix(root).map_err(|_| fail("not under root"))?;
        let mut segments = Vec::new();
        for component in rel.components() {
            match component {
                Component::Normal(s) => {
                    segments.push(s.to_str().ok_or_else(|| fail("not valid UTF-8"))?);
                }
                _ => return Err(fail("non-normal component")),
            }
        }
        Self::new(&segments.join("/"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins this path onto `root` using native separators.
    #[must_use]
    pub fn to_native(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(self.0.split('/'));
        path
    }

    /// Prepends `prefix` to this path.
    #[must_use]
    pub fn prefixed(&self, prefix: &Self) -> Self {
        Self(format!("{}/{}", prefix.0, self.0))
    }

    /// Ancestor directories, deepest first. `a/b/c.txt` yields `a/b`, `a`.
    pub fn parents(&self) -> impl Iterator<Item = Self> + '_ {
        self.0
            .char_indices()
            .rev()
            .filter(|&(_, c)| c == '/')
            .map(|(i, _)| Self(self.0[..i].to_string()))
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RelativePath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<RelativePath> for String {
    fn from(value: RelativePath) -> Self {
        value.0
    }
}
