// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for modbuild using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! modbuild [global options] <task>
//!   example-config     run from the project root
//!   git-version        pre-build event
//!   build-models       post-build event
//!   kill-se            post-build event, before distribute-steam
//!   distribute-steam   post-build event
//!   start-se           post-build event
//! ```

pub mod global;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};

use crate::cli::global::GlobalOptions;

/// Space Engineers Mod Build Tool
///
/// Builds and deploys Space Engineers mods from build event scripts.
#[derive(Debug, Parser)]
#[command(
    name = "modbuild",
    author,
    version,
    about = "Space Engineers Mod Build Tool",
    long_about = "modbuild-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Provides tasks to help build and deploy Space Engineers mods.\n\
                  All tasks besides `example-config` should be run from a build\n\
                  event script, with the compiler's output directory as the\n\
                  current directory.",
    after_help = "CONFIG FILES:\n\n\
                  Machine settings (tool paths, game install, timeouts) come from\n\
                  `modbuild-global.toml` next to the executable, then any --config\n\
                  files, then MODBUILD__SECTION__KEY environment variables.\n\
                  Project settings come from `modbuild.toml` in the project root."
)]
pub struct Cli {
    /// Global options shared by all tasks
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Task to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Writes an example modbuild.toml into the current directory.
    #[command(name = "example-config")]
    ExampleConfig,

    /// Stamps the git revision into AssemblyVersion attributes.
    /// Run before compilation so the version is included in the assembly.
    #[command(name = "git-version")]
    GitVersion,

    /// Generates .mwm files from model sources.
    /// Run before distribution.
    #[command(name = "build-models")]
    BuildModels,

    /// Copies every published asset to the local mod folder and removes
    /// files a previous run placed there that are no longer built.
    #[command(name = "distribute-steam")]
    DistributeSteam,

    /// Stops all game processes, including the plugin loader, and waits
    /// for them to exit.
    #[command(name = "kill-se")]
    KillSe,

    /// Starts the game client and its companions.
    #[command(name = "start-se")]
    StartSe,
}

impl Command {
    /// Task name as typed on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ExampleConfig => "example-config",
            Self::GitVersion => "git-version",
            Self::BuildModels => "build-models",
            Self::DistributeSteam => "distribute-steam",
            Self::KillSe => "kill-se",
            Self::StartSe => "start-se",
        }
    }

    /// Whether the task needs `modbuild.toml`. Only `example-config` runs
    /// without a project.
    #[must_use]
    pub const fn needs_project(self) -> bool {
        !matches!(self, Self::ExampleConfig)
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
