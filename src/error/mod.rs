// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!   cmd / task layer          anyhow::Result (context chains)
//!          |
//!          v
//!   component errors          thiserror enums
//!   Config    MissingKey, InvalidValue, ParseError
//!   Sync      EmptySource, SourceMissing, PartialSync, ...
//!   Manifest  Read, Parse, Write, Corrupt
//!   Lifecycle StopTimeout, Launch, Discovery, Signal
//!   Process   SpawnFailed, WaitFailed, NonZeroExit, Timeout
//!   Git       RepoNotFound, Revision
//! ```
//!
//! Every variant names the path or process it concerns.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

// --- Config Errors ---

/// Configuration-related errors. All of them are fatal before any task runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse or deserialize a configuration source.
    #[error("failed to load config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

impl ConfigError {
    pub(crate) fn missing(section: &str, key: &str) -> Self {
        Self::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    pub(crate) fn invalid(section: &str, key: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: message.into(),
        }
    }
}

// --- Path Errors ---

/// A path that cannot be used as a destination-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid relative path '{path}': {reason}")]
pub struct PathError {
    pub path: String,
    pub reason: &'static str,
}

// --- Sync Errors ---

/// Mutating step of a sync plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOperation {
    Copy,
    Delete,
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Distribution synchronizer errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No deployable file matched any source. Nothing was changed.
    #[error("no deployable files found in {}", display_roots(.roots))]
    EmptySource { roots: Vec<PathBuf> },

    /// A required source root does not exist.
    #[error("source root does not exist: {}", .root.display())]
    SourceMissing { root: PathBuf },

    /// A selection pattern could not be compiled.
    #[error("invalid include pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A source file could not be read for fingerprinting.
    #[error("failed to fingerprint '{}': {source}", .path.display())]
    Fingerprint {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking a source root failed.
    #[error("failed to enumerate '{}': {message}", .root.display())]
    Enumerate { root: PathBuf, message: String },

    /// An enumerated path cannot be expressed relative to the destination.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The destination root cannot be created.
    #[error("destination root '{}' is unavailable: {source}", .root.display())]
    DestinationUnavailable {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A copy or delete failed mid-plan. The manifest was left untouched.
    #[error("{operation} failed for '{path}' (manifest not updated, safe to retry): {source}")]
    PartialSync {
        operation: SyncOperation,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the manifest failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

fn display_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|r| format!("'{}'", r.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

// --- Manifest Errors ---

/// Manifest store errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file exists but could not be read.
    #[error("failed to read manifest '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not valid JSON for the expected schema.
    #[error("failed to parse manifest '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The manifest parsed but violates an invariant.
    #[error("manifest '{}' is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// Writing the manifest failed. The previous manifest is still intact.
    #[error("failed to write manifest '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Lifecycle Errors ---

/// Process lifecycle controller errors.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Matching processes survived graceful and forced termination.
    #[error("processes still running after forced termination: {}", .survivors.join(", "))]
    StopTimeout { survivors: Vec<String> },

    /// An executable could not be launched.
    #[error("failed to launch '{}': {source}", .executable.display())]
    Launch {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS process table could not be read.
    #[error("failed to list running processes: {message}")]
    Discovery { message: String },

    /// A termination request could not be delivered.
    #[error("failed to signal {name} (pid {pid}): {message}")]
    Signal {
        name: String,
        pid: u32,
        message: String,
    },
}

// --- Process Errors ---

/// External tool execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed.
    #[error("failed waiting for process '{command}': {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process timed out and was killed.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },
}

// --- Git Errors ---

/// Revision lookup errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// No repository contains the path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// HEAD could not be resolved or walked.
    #[error("failed to read revision of {path}: {message}")]
    Revision { path: String, message: String },
}
