// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! global   tools, game (+ companions), timeouts, deploy, logging
//! project  project, paths, distribute (sources), models (jobs), version
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::deploy::FingerprintMode;
use crate::logging::LogLevel;

// --- Global sections ---

/// External tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Path to `MwmBuilder.exe`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mwm_builder: Option<PathBuf>,
    /// Builder arguments. `{source}` and `{output}` are substituted per job.
    pub mwm_builder_args: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            mwm_builder: None,
            mwm_builder_args: vec!["/s:{source}".to_string(), "/o:{output}".to_string()],
        }
    }
}

/// The game client and processes that must not hold files during a deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
    pub args: Vec<String>,
    /// Executable names stopped by `kill-se`, compared case-insensitively.
    pub process_names: Vec<String>,
    pub companions: Vec<CompanionConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            executable: None,
            args: Vec::new(),
            process_names: vec!["SpaceEngineers".to_string(), "SEPluginLoader".to_string()],
            companions: Vec::new(),
        }
    }
}

/// A process started after the game, e.g. a plugin loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanionConfig {
    pub executable: PathBuf,
    /// `{pid}` and `{exe}` refer to the launched game.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Waits and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutsConfig {
    pub graceful_secs: u64,
    pub forced_secs: u64,
    pub poll_interval_ms: u64,
    pub model_build_secs: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            graceful_secs: 10,
            forced_secs: 5,
            poll_interval_ms: 250,
            model_build_secs: 600,
        }
    }
}

impl TimeoutsConfig {
    #[must_use]
    pub const fn graceful(&self) -> Duration {
        Duration::from_secs(self.graceful_secs)
    }

    #[must_use]
    pub const fn forced(&self) -> Duration {
        Duration::from_secs(self.forced_secs)
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub const fn model_build(&self) -> Duration {
        Duration::from_secs(self.model_build_secs)
    }
}

/// Distribution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    pub fingerprint: FingerprintMode,
    /// Where manifests are kept. Defaults to the parent of the mod directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

/// Logging defaults, overridden by `--log-level` and `--log-file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub file_level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::INFO,
            file_level: LogLevel::TRACE,
            file: None,
        }
    }
}

// --- Project sections ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSection {
    /// Mod name, also the default mod directory name.
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Destination root. Defaults to `%APPDATA%/SpaceEngineers/Mods/<name>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_dir: Option<PathBuf>,
    /// Build output directory, relative to the project root. Overrides `--build-dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,
}

/// Base directory for a relative source root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeTo {
    #[default]
    Root,
    Build,
}

/// One artifact source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub root: PathBuf,
    /// Glob patterns relative to `root`. Empty selects every file.
    #[serde(default)]
    pub include: Vec<String>,
    /// Destination subdirectory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default)]
    pub relative_to: RelativeTo,
    #[serde(default)]
    pub optional: bool,
}

impl SourceConfig {
    fn standard(dir: &str, include: &[&str]) -> Self {
        Self {
            root: PathBuf::from(dir),
            include: include.iter().map(ToString::to_string).collect(),
            prefix: Some(dir.to_string()),
            relative_to: RelativeTo::Root,
            optional: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistributeConfig {
    /// Later sources override earlier ones on path collisions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceConfig>>,
}

impl DistributeConfig {
    /// Configured sources, or the standard mod layout.
    #[must_use]
    pub fn sources_or_default(&self) -> Vec<SourceConfig> {
        self.sources.clone().unwrap_or_else(|| {
            vec![
                SourceConfig::standard("Data", &[]),
                SourceConfig::standard("Models", &["**/*.mwm"]),
                SourceConfig::standard("Textures", &["**/*.dds"]),
                SourceConfig::standard("Audio", &["**/*.xwm", "**/*.wav"]),
            ]
        })
    }
}

/// One model builder invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelJob {
    /// Directory with FBX/XML sources, relative to the project root.
    pub source: PathBuf,
    /// Output directory for `.mwm` files, relative to the project root.
    pub output: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelsConfig {
    pub jobs: Vec<ModelJob>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionConfig {
    /// Files with `AssemblyVersion` attributes, relative to the project root.
    pub files: Vec<PathBuf>,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            files: vec![PathBuf::from("Properties/AssemblyInfo.cs")],
        }
    }
}
