// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (run_command)
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  global + project TOML    |
//!              '-------------+-------------'
//!                            v
//!                          task
//!          example-config, git-version, build-models,
//!          distribute-steam, kill-se, start-se
//!                 |          |           |
//!                 v          v           v
//!               git       deploy     core::lifecycle
//!              (gix)   sync+manifest  stop/start
//!
//!   +-----------------------------------------+
//!   |  core::process   ProcessBuilder         |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod deploy;
pub mod error;
pub mod git;
pub mod logging;
pub mod task;
pub mod utility;
