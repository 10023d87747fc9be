// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process table for Unix.
//!
//! ```text
//! Linux     /proc/<pid>/{stat,cmdline,exe}   zombies skipped
//!           name: argv[0] basename > exe link > comm
//! others    ps -axo pid=,comm=
//! signals   SIGTERM (graceful), SIGKILL (forced), ESRCH = already gone
//! ```
//!
//! argv[0] comes first because Wine/Proton processes report a Windows path
//! there (`C:\...\SpaceEngineers.exe`) while `exe` points at the loader.

use futures_util::future::BoxFuture;
use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

use super::{ProcessInfo, ProcessTable, normalize_name};
use crate::error::LifecycleError;

/// The running system's process table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessTable;

impl SystemProcessTable {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn send_signal(process: &ProcessInfo, signal: Signal) -> Result<(), LifecycleError> {
    let fail = |message: String| LifecycleError::Signal {
        name: process.name.clone(),
        pid: process.pid,
        message,
    };
    let raw = i32::try_from(process.pid).map_err(|e| fail(e.to_string()))?;
    match kill(Pid::from_raw(raw), signal) {
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(e) => Err(fail(format!("{signal}: {e}"))),
    }
}

#[cfg(target_os = "linux")]
async fn blocking<T, F>(f: F) -> Result<T, LifecycleError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, LifecycleError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| LifecycleError::Discovery {
            message: e.to_string(),
        })?
}

impl ProcessTable for SystemProcessTable {
    fn snapshot(&self) -> BoxFuture<'_, Result<Vec<ProcessInfo>, LifecycleError>> {
        Box::pin(async { list_processes().await })
    }

    fn is_running<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<bool, LifecycleError>> {
        Box::pin(async move { probe(process).await })
    }

    fn request_termination<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<(), LifecycleError>> {
        Box::pin(async move { send_signal(process, Signal::SIGTERM) })
    }

    fn force_terminate<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<(), LifecycleError>> {
        Box::pin(async move { send_signal(process, Signal::SIGKILL) })
    }
}

#[cfg(target_os = "linux")]
async fn list_processes() -> Result<Vec<ProcessInfo>, LifecycleError> {
    blocking(procfs::scan).await
}

#[cfg(target_os = "linux")]
async fn probe(process: &ProcessInfo) -> Result<bool, LifecycleError> {
    let target = process.clone();
    blocking(move || {
        Ok(procfs::read(target.pid)
            .is_some_and(|name| normalize_name(&name) == normalize_name(&target.name)))
    })
    .await
}

#[cfg(target_os = "linux")]
pub(super) mod procfs {
    use std::fs;
    use std::path::Path;

    use super::super::ProcessInfo;
    use crate::error::LifecycleError;

    pub(in super::super) fn scan() -> Result<Vec<ProcessInfo>, LifecycleError> {
        let entries = fs::read_dir("/proc").map_err(|e| LifecycleError::Discovery {
            message: format!("/proc: {e}"),
        })?;

        Ok(entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let pid = entry.file_name().to_str()?.parse::<u32>().ok()?;
                let name = read(pid)?;
                Some(ProcessInfo { pid, name })
            })
            .collect())
    }

    /// Name of a live process, `None` if it is gone or a zombie.
    pub(in super::super) fn read(pid: u32) -> Option<String> {
        let dir = Path::new("/proc").join(pid.to_string());
        let stat = fs::read_to_string(dir.join("stat")).ok()?;
        if is_zombie(&stat) {
            return None;
        }
        argv0(&dir)
            .or_else(|| {
                fs::read_link(dir.join("exe"))
                    .ok()
                    .and_then(|p| Some(p.file_name()?.to_string_lossy().into_owned()))
            })
            .or_else(|| comm(&stat))
    }

    fn argv0(dir: &Path) -> Option<String> {
        let cmdline = fs::read(dir.join("cmdline")).ok()?;
        let first = cmdline.split(|&b| b == 0).next()?;
        let first = String::from_utf8_lossy(first);
        let base = first.rsplit(['/', '\\']).next()?.trim();
        (!base.is_empty()).then(|| base.to_string())
    }

    /// `comm` is the text between the first `(` and the last `)`.
    pub(in super::super) fn comm(stat: &str) -> Option<String> {
        let start = stat.find('(')?;
        let end = stat.rfind(')')?;
        (start < end).then(|| stat[start + 1..end].to_string())
    }

    /// The state field follows the last `)`; comm itself may contain parentheses.
    pub(in super::super) fn is_zombie(stat: &str) -> bool {
        stat.rfind(')')
            .and_then(|i| stat[i + 1..].split_whitespace().next())
            .is_some_and(|state| state == "Z" || state == "X")
    }
}

#[cfg(not(target_os = "linux"))]
async fn list_processes() -> Result<Vec<ProcessInfo>, LifecycleError> {
    use crate::core::process::builder::ProcessBuilder;

    let output = ProcessBuilder::new("ps")
        .args(["-axo", "pid=,comm="])
        .capture_output()
        .run()
        .await
        .map_err(|e| LifecycleError::Discovery {
            message: e.to_string(),
        })?;
    Ok(parse_ps(output.stdout()))
}

#[cfg(not(target_os = "linux"))]
async fn probe(process: &ProcessInfo) -> Result<bool, LifecycleError> {
    let wanted = normalize_name(&process.name);
    Ok(list_processes()
        .await?
        .iter()
        .any(|p| p.pid == process.pid && normalize_name(&p.name) == wanted))
}

/// Parses `ps -o pid=,comm=` output.
#[cfg_attr(target_os = "linux", allow(dead_code))]
pub(super) fn parse_ps(output: &str) -> Vec<ProcessInfo> {
    output
        .lines()
        .filter_map(|line| {
            let (pid, comm) = line.trim().split_once(char::is_whitespace)?;
            let comm = comm.trim();
            if comm.is_empty() || comm.contains("<defunct>") {
                return None;
            }
            let name = comm.rsplit('/').next().unwrap_or(comm).to_string();
            Some(ProcessInfo {
                pid: pid.parse().ok()?,
                name,
            })
        })
        .collect()
}
