// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Revision numbers from git.
//!
//! ```text
//! gix::discover(path) --> HEAD commit --> ancestors walk --> count
//! ```
//!
//! The count equals `git rev-list --count HEAD` and grows with every commit,
//! which makes it usable as the last component of an assembly version.

use std::path::Path;

use tracing::debug;

use crate::error::GitError;

/// Number of commits reachable from HEAD of the repository containing `path`.
///
/// # Errors
///
/// Returns [`GitError::RepoNotFound`] if no repository contains `path`, and
/// [`GitError::Revision`] if HEAD is unborn or the history cannot be walked.
pub fn revision_count(path: &Path) -> Result<u64, GitError> {
    let repo = gix::discover(path).map_err(|_| GitError::RepoNotFound {
        path: path.display().to_string(),
    })?;
    let revision = |message: String| GitError::Revision {
        path: path.display().to_string(),
        message,
    };

    let head = repo.head_commit().map_err(|e| revision(e.to_string()))?;
    let walk = head
        .ancestors()
        .all()
        .map_err(|e| revision(e.to_string()))?;

    let mut count = 0u64;
    for info in walk {
        info.map_err(|e| revision(e.to_string()))?;
        count += 1;
    }

    debug!(repo = %path.display(), head = %head.id, count, "read revision count");
    Ok(count)
}
