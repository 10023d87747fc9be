// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path resolution.
//!
//! ```text
//! cwd ──join(--build-dir)──> build dir
//! cwd ──join(--root)───────> project root
//!                               |
//!   modbuild.toml paths, sources, model jobs, version files
//!   are resolved against the project root (or build dir)
//! ```
//!
//! Paths are normalized lexically. Nothing is canonicalized, so no `\\?\`
//! prefixes reach external tools on Windows.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;

/// Removes `.` components and folds `..` into the preceding component.
///
/// A `..` that would climb above a root is dropped.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                None | Some(Component::ParentDir | Component::CurDir) => out.push(".."),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Joins a relative `path` onto `base` and normalizes the result.
#[must_use]
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Resolves the build directory and project root from the command line values.
///
/// Both are relative to the current directory, which for a build event is
/// the compiler's output directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_root(build_dir: &Path, root: &Path) -> Result<(PathBuf, PathBuf), ConfigError> {
    let cwd = env::current_dir()
        .map_err(|e| ConfigError::invalid("paths", "build_dir", e.to_string()))?;
    let build_dir = absolutize(&cwd, build_dir);
    let root = absolutize(&cwd, root);
    Ok((build_dir, root))
}

/// `<appdata>/SpaceEngineers/Mods/<name>`, the game's local mod folder.
#[must_use]
pub fn local_mod_dir(appdata: &Path, name: &str) -> PathBuf {
    appdata.join("SpaceEngineers").join("Mods").join(name)
}

/// Destination root for a project.
///
/// # Errors
///
/// Returns `ConfigError::MissingKey` when neither `paths.mod_dir` nor
/// `project.name` with `%APPDATA%` is available.
pub fn resolve_mod_dir(
    root: &Path,
    configured: Option<&Path>,
    name: &str,
    appdata: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = configured {
        return Ok(absolutize(root, dir));
    }
    if name.trim().is_empty() {
        return Err(ConfigError::missing("paths", "mod_dir"));
    }
    appdata
        .map(|appdata| local_mod_dir(appdata, name.trim()))
        .ok_or_else(|| ConfigError::missing("paths", "mod_dir"))
}
