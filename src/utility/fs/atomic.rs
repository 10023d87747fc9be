// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Crash-safe file replacement.
//!
//! Content is written to a temporary sibling of the target, flushed to disk,
//! then renamed over the target. A reader never observes a half-written file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

const TEMP_PREFIX: &str = ".modbuild-";
const TEMP_SUFFIX: &str = ".tmp";

fn temp_sibling(path: &Path) -> io::Result<NamedTempFile> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(parent)
}

/// Atomically replaces `path` with `contents`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or renamed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut tmp = temp_sibling(path)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Atomically replaces `dst` with a copy of `src`, creating parent directories.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an error if `src` cannot be read or `dst` cannot be replaced.
pub fn copy_atomic(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut source = File::open(src)?;
    let mut tmp = temp_sibling(dst)?;
    let bytes = io::copy(&mut source, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(dst).map_err(|e| e.error)?;
    Ok(bytes)
}

/// Whether `name` looks like a temporary file left by [`write_atomic`] or
/// [`copy_atomic`].
#[must_use]
pub fn is_stale_temp(name: &str) -> bool {
    name.len() > TEMP_PREFIX.len() + TEMP_SUFFIX.len()
        && name.starts_with(TEMP_PREFIX)
        && name.ends_with(TEMP_SUFFIX)
}

/// Removes temporary files an interrupted write left directly in `dir`.
///
/// Returns the number removed. A missing directory holds nothing to remove.
///
/// # Errors
///
/// Returns an error if `dir` cannot be listed or a leftover cannot be removed.
pub fn sweep_stale_temps(dir: &Path) -> io::Result<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        let is_leftover = entry.file_name().to_str().is_some_and(is_stale_temp)
            && entry.file_type()?.is_file();
        if !is_leftover {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => {
                debug!(path = %entry.path().display(), "removed stale temporary file");
                removed += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(removed)
}
