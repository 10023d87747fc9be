// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for modbuild.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! GlobalConfig   (machine: tool paths, game install, timeouts)
//!   Priority (low -> high)
//!   1. defaults
//!   2. modbuild-global.toml (exe dir, optional)
//!   3. --config (repeatable, required)
//!   4. MODBUILD__* env vars
//!
//! ProjectConfig  (per mod, versioned with it)
//!   <root>/modbuild.toml (required)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MODBUILD__GAME__EXECUTABLE=C:/SE/Bin64/SpaceEngineers.exe -> game.executable
//! MODBUILD__TIMEOUTS__GRACEFUL_SECS=20                      -> timeouts.graceful_secs
//! MODBUILD__TOOLS__MWM_BUILDER=C:/Tools/MwmBuilder.exe      -> tools.mwm_builder
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::deploy::{ArtifactSource, RelativePath};
use crate::error::ConfigError;

use loader::ConfigLoader;
use types::{
    DeployConfig, DistributeConfig, GameConfig, LoggingConfig, ModelsConfig, PathsConfig,
    ProjectSection, RelativeTo, TimeoutsConfig, ToolsConfig, VersionConfig,
};

/// Machine-wide configuration file, looked up next to the executable.
pub const GLOBAL_CONFIG_FILE: &str = "modbuild-global.toml";
/// Per-project configuration file at the project root.
pub const PROJECT_CONFIG_FILE: &str = "modbuild.toml";
/// Prefix for environment overrides of the global configuration.
pub const ENV_PREFIX: &str = "MODBUILD";

/// Machine-wide configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    pub tools: ToolsConfig,
    pub game: GameConfig,
    pub timeouts: TimeoutsConfig,
    pub deploy: DeployConfig,
    pub logging: LoggingConfig,
}

impl GlobalConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use modbuild_rs::config::GlobalConfig;
    ///
    /// let config: GlobalConfig = GlobalConfig::builder()
    ///     .add_toml_file_optional("modbuild-global.toml")
    ///     .with_env_prefix("MODBUILD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Loads the global configuration.
    ///
    /// `exe_dir` holds the optional `modbuild-global.toml`. Each file in
    /// `extra` must exist. `MODBUILD__*` variables are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing, malformed, or has unknown keys.
    pub fn load(exe_dir: Option<&Path>, extra: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut loader = Self::builder();
        if let Some(dir) = exe_dir {
            loader = loader.add_toml_file_optional(dir.join(GLOBAL_CONFIG_FILE));
        }
        for path in extra {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            loader = loader.add_toml_file(path);
        }
        loader.with_env_prefix(ENV_PREFIX).build::<Self>()?.validated()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::builder().add_toml_str(content).build::<Self>()?.validated()
    }

    /// Rejects values the types allow but the tasks cannot use.
    fn validated(self) -> Result<Self, ConfigError> {
        if self.timeouts.poll_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "timeouts",
                "poll_interval_ms",
                "must be at least 1",
            ));
        }
        Ok(self)
    }

    /// `key = value` lines for the effective configuration, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        let mut options = BTreeMap::new();
        options.insert("tools.mwm_builder".to_string(), fmt(&self.tools.mwm_builder));
        options.insert(
            "tools.mwm_builder_args".to_string(),
            self.tools.mwm_builder_args.join(" "),
        );
        options.insert("game.executable".to_string(), fmt(&self.game.executable));
        options.insert("game.args".to_string(), self.game.args.join(" "));
        options.insert(
            "game.process_names".to_string(),
            self.game.process_names.join(", "),
        );
        options.insert(
            "game.companions".to_string(),
            self.game.companions.len().to_string(),
        );
        options.insert(
            "timeouts.graceful_secs".to_string(),
            self.timeouts.graceful_secs.to_string(),
        );
        options.insert(
            "timeouts.forced_secs".to_string(),
            self.timeouts.forced_secs.to_string(),
        );
        options.insert(
            "timeouts.poll_interval_ms".to_string(),
            self.timeouts.poll_interval_ms.to_string(),
        );
        options.insert(
            "timeouts.model_build_secs".to_string(),
            self.timeouts.model_build_secs.to_string(),
        );
        options.insert(
            "deploy.fingerprint".to_string(),
            self.deploy.fingerprint.to_string(),
        );
        options.insert("deploy.state_dir".to_string(), fmt(&self.deploy.state_dir));
        options.insert(
            "logging.level".to_string(),
            self.logging.level.as_u8().to_string(),
        );
        options.insert(
            "logging.file_level".to_string(),
            self.logging.file_level.as_u8().to_string(),
        );
        options.insert("logging.file".to_string(), fmt(&self.logging.file));

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Per-project configuration from `modbuild.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub project: ProjectSection,
    pub paths: PathsConfig,
    pub distribute: DistributeConfig,
    pub models: ModelsConfig,
    pub version: VersionConfig,
}

impl ProjectConfig {
    /// Loads `<root>/modbuild.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file is absent, or a parse error.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(PROJECT_CONFIG_FILE);
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        ConfigLoader::new().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        ConfigLoader::new().add_toml_str(content).build()
    }

    /// Resolves every path against `root` and validates sources.
    ///
    /// `appdata` is the base for the default mod directory, normally
    /// `%APPDATA%`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` when no mod directory can be derived
    /// and `ConfigError::InvalidValue` for a bad prefix or glob.
    pub fn resolve(
        &self,
        root: &Path,
        build_dir: &Path,
        appdata: Option<&Path>,
    ) -> Result<ResolvedProject, ConfigError> {
        let root = paths::normalize(root);
        let build_dir = self.paths.build_dir.as_deref().map_or_else(
            || paths::normalize(build_dir),
            |dir| paths::absolutize(&root, dir),
        );
        let mod_dir = paths::resolve_mod_dir(
            &root,
            self.paths.mod_dir.as_deref(),
            &self.project.name,
            appdata,
        )?;

        let sources = self
            .distribute
            .sources_or_default()
            .into_iter()
            .map(|source| {
                let base = match source.relative_to {
                    RelativeTo::Root => &root,
                    RelativeTo::Build => &build_dir,
                };
                for pattern in &source.include {
                    wax::Glob::new(pattern).map_err(|e| {
                        ConfigError::invalid("distribute", "include", format!("'{pattern}': {e}"))
                    })?;
                }
                let mut artifact = ArtifactSource::new(paths::absolutize(base, &source.root))
                    .with_include(source.include)
                    .with_optional(source.optional);
                if let Some(prefix) = &source.prefix {
                    let prefix = RelativePath::new(prefix)
                        .map_err(|e| ConfigError::invalid("distribute", "prefix", e.to_string()))?;
                    artifact = artifact.with_prefix(prefix);
                }
                Ok(artifact)
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let model_jobs = self
            .models
            .jobs
            .iter()
            .map(|job| ModelBuildJob {
                source: paths::absolutize(&root, &job.source),
                output: paths::absolutize(&root, &job.output),
            })
            .collect();

        let version_files = self
            .version
            .files
            .iter()
            .map(|file| paths::absolutize(&root, file))
            .collect();

        Ok(ResolvedProject {
            name: self.project.name.trim().to_string(),
            root,
            build_dir,
            mod_dir,
            sources,
            model_jobs,
            version_files,
        })
    }
}

/// A model builder job with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBuildJob {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Project configuration with every path made absolute.
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    pub name: String,
    pub root: PathBuf,
    pub build_dir: PathBuf,
    /// Destination root for `distribute-steam`.
    pub mod_dir: PathBuf,
    pub sources: Vec<ArtifactSource>,
    pub model_jobs: Vec<ModelBuildJob>,
    pub version_files: Vec<PathBuf>,
}
