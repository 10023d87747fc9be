// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run()                          spawn_detached()
//!   |                               |
//!   v                               v
//! build_command()               Command, stdio null,
//! args, cwd, piped stdio        own process group,
//!   |                           kill_on_drop(false)
//!   v                               |
//! run_child()  (io.rs)              v
//! stream + wait/timeout            pid
//!   |
//!   v
//! validate exit_code
//!   |
//!   v
//! ProcessOutput
//! ```

use std::fmt::Write as _;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(super) fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    pub(super) fn command_line(&self) -> String {
        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError`] if spawning fails, the timeout elapses, or
    /// the process exits non-zero.
    pub async fn run(self) -> Result<ProcessOutput, ProcessError> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &cmd_line, &mut child).await?;

        if !output.success() {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
            });
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    /// Launches the process without waiting and returns its pid.
    ///
    /// The child gets no stdio, runs in its own process group and keeps
    /// running after this process exits.
    ///
    /// # Errors
    ///
    /// Returns the spawn error unchanged.
    pub fn spawn_detached(self) -> std::io::Result<u32> {
        let mut command = Command::new(self.program());
        command
            .args(self.args_slice())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);
        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        #[cfg(windows)]
        {
            use windows::Win32::System::Threading::{CREATE_NEW_PROCESS_GROUP, DETACHED_PROCESS};
            command.creation_flags(CREATE_NEW_PROCESS_GROUP.0 | DETACHED_PROCESS.0);
        }
        #[cfg(unix)]
        {
            command.process_group(0);
        }

        debug!(cmd = %self.command_line(), "launch");
        let child = command.spawn()?;
        child
            .id()
            .ok_or_else(|| std::io::Error::other("process exited before its pid was read"))
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command
            .args(self.args_slice())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        #[cfg(windows)]
        {
            command.creation_flags(windows::Win32::System::Threading::CREATE_NEW_PROCESS_GROUP.0);
        }

        command
    }
}
