// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming for child processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks  (decode_line: UTF-8, else CP1252)
//!   wait, or kill on timeout
//!   join readers --> ProcessOutput { exit_code, stdout, stderr }
//! ```

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::ProcessError;
use crate::utility::encoding::decode_line;

/// Reads `reader` line by line, logging each line and optionally keeping it.
fn spawn_reader<R>(
    reader: Option<R>,
    process_name: &str,
    stream_name: &'static str,
    keep: bool,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let reader = reader?;
    let process_name = process_name.to_string();

    Some(tokio::spawn(async move {
        let mut segments = BufReader::new(reader).split(b'\n');
        let mut kept = String::new();
        loop {
            match segments.next_segment().await {
                Ok(Some(raw)) => {
                    let line = decode_line(&raw);
                    trace!(process = %process_name, stream = stream_name, line = %line, "output");
                    if keep {
                        if !kept.is_empty() {
                            kept.push('\n');
                        }
                        kept.push_str(&line);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(process = %process_name, stream = stream_name, error = %e, "error reading stream");
                    break;
                }
            }
        }
        kept
    }))
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Streams the child's output and waits for it, enforcing the timeout.
    pub(super) async fn run_child(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
    ) -> Result<ProcessOutput, ProcessError> {
        let keep = self.captures();
        let stdout = spawn_reader(child.stdout.take(), name, "stdout", keep);
        let stderr = spawn_reader(child.stderr.take(), name, "stderr", keep);

        let wait_failed = |source| ProcessError::WaitFailed {
            command: cmd_line.to_string(),
            source,
        };

        let status = match self.timeout_duration() {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status.map_err(wait_failed)?,
                Err(_) => {
                    warn!(process = %name, timeout = ?limit, "process timed out, killing");
                    child.kill().await.map_err(wait_failed)?;
                    // Grandchildren may still hold the pipes open.
                    stdout.iter().chain(stderr.iter()).for_each(JoinHandle::abort);
                    return Err(ProcessError::Timeout {
                        command: name.to_string(),
                        timeout_secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait().await.map_err(wait_failed)?,
        };

        let stdout = join_reader(stdout).await;
        let stderr = join_reader(stderr).await;
        Ok(ProcessOutput::new(status.code().unwrap_or(-1), stdout, stderr))
    }
}
