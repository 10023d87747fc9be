// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all tasks.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     <- Additional global config files (can repeat)
//! --dry             <- Plan and discover only
//! --log-level N     <- Console verbosity (0-5)
//! --debug           <- Console verbosity at least 4
//! --log-file FILE   <- Also log to FILE
//!
//! Precedence: CLI flags > [logging] in config > defaults
//! ```

use std::path::PathBuf;

use clap::Args;

use crate::logging::LogLevel;

/// Global options available for all tasks.
#[derive(Debug, Clone, Args)]
pub struct GlobalOptions {
    /// Output additional detail.
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Path to the built plugin files directory.
    #[arg(short = 'b', long = "build-dir", value_name = "DIR", default_value = ".", global = true)]
    pub build_dir: PathBuf,

    /// Path to the project root.
    #[arg(short = 'r', long = "root", value_name = "DIR", default_value = "../../../../..", global = true)]
    pub root: PathBuf,

    /// Additional global config file(s), loaded after modbuild-global.toml.
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append, global = true)]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5), global = true)]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Reports what a task would change without changing it.
    #[arg(long, global = true)]
    pub dry: bool,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            debug: false,
            build_dir: PathBuf::from("."),
            root: PathBuf::from("../../../../.."),
            configs: Vec::new(),
            log_level: None,
            log_file: None,
            dry: false,
        }
    }
}

impl GlobalOptions {
    /// Console level after applying `--log-level` and `--debug` to `configured`.
    #[must_use]
    pub fn console_level(&self, configured: LogLevel) -> LogLevel {
        match self.log_level {
            Some(level) => LogLevel::from_int(i32::from(level)),
            None if self.debug => configured.max(LogLevel::DEBUG),
            None => configured,
        }
    }
}
