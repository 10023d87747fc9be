// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("MwmBuilder.exe")
//!   .args() .cwd() .timeout() .capture_output()
//!   .run()            --> tokio::process::Command
//!                         stream stdout/stderr lines to trace!
//!                         kill on timeout
//!                     --> ProcessOutput { exit_code, stdout, stderr }
//!   .spawn_detached() --> pid, child outlives this process
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
