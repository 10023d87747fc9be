// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process table for Windows.
//!
//! ```text
//! snapshot   CreateToolhelp32Snapshot + Process32FirstW/NextW
//! graceful   taskkill /PID <pid>         (WM_CLOSE to the main window)
//! forced     OpenProcess + TerminateProcess
//! ```

use futures_util::future::BoxFuture;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
    TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{OpenProcess, PROCESS_TERMINATE, TerminateProcess};

use super::{ProcessInfo, ProcessTable, normalize_name};
use crate::core::process::builder::ProcessBuilder;
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

/// Closes the wrapped handle on drop.
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        // SAFETY: the handle was returned by a successful Win32 call and is
        // closed exactly once.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

fn exe_name(entry: &PROCESSENTRY32W) -> String {
    let len = entry
        .szExeFile
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(entry.szExeFile.len());
    String::from_utf16_lossy(&entry.szExeFile[..len])
}

fn list_processes() -> Result<Vec<ProcessInfo>, LifecycleError> {
    let discovery = |e: windows::core::Error| LifecycleError::Discovery {
        message: e.to_string(),
    };

    // SAFETY: plain snapshot request, the handle is owned below.
    let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }.map_err(discovery)?;
    let snapshot = OwnedHandle(snapshot);

    let mut entry = PROCESSENTRY32W {
        dwSize: u32::try_from(std::mem::size_of::<PROCESSENTRY32W>()).unwrap_or(u32::MAX),
        ..Default::default()
    };
    let mut processes = Vec::new();

    // SAFETY: `entry` is a properly sized PROCESSENTRY32W and the snapshot
    // handle stays valid for the whole iteration.
    unsafe {
        if Process32FirstW(snapshot.0, &raw mut entry).is_err() {
            return Ok(processes);
        }
        loop {
            processes.push(ProcessInfo {
                pid: entry.th32ProcessID,
                name: exe_name(&entry),
            });
            if Process32NextW(snapshot.0, &raw mut entry).is_err() {
                break;
            }
        }
    }

    Ok(processes)
}

async fn snapshot() -> Result<Vec<ProcessInfo>, LifecycleError> {
    tokio::task::spawn_blocking(list_processes)
        .await
        .map_err(|e| LifecycleError::Discovery {
            message: e.to_string(),
        })?
}

fn terminate(process: &ProcessInfo) -> Result<(), LifecycleError> {
    let fail = |e: windows::core::Error| LifecycleError::Signal {
        name: process.name.clone(),
        pid: process.pid,
        message: e.to_string(),
    };

    // SAFETY: OpenProcess only reads its arguments. A pid that no longer
    // exists yields an error, which is mapped below.
    let handle = match unsafe { OpenProcess(PROCESS_TERMINATE, false, process.pid) } {
        Ok(handle) => OwnedHandle(handle),
        // Already gone.
        Err(_) if !list_processes()?.iter().any(|p| p.pid == process.pid) => return Ok(()),
        Err(e) => return Err(fail(e)),
    };

    // SAFETY: the handle was opened with PROCESS_TERMINATE above.
    unsafe { TerminateProcess(handle.0, 1) }.map_err(fail)
}

impl ProcessTable for SystemProcessTable {
    fn snapshot(&self) -> BoxFuture<'_, Result<Vec<ProcessInfo>, LifecycleError>> {
        Box::pin(snapshot())
    }

    fn is_running<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<bool, LifecycleError>> {
        Box::pin(async move {
            let wanted = normalize_name(&process.name);
            Ok(snapshot()
                .await?
                .iter()
                .any(|p| p.pid == process.pid && normalize_name(&p.name) == wanted))
        })
    }

    fn request_termination<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<(), LifecycleError>> {
        Box::pin(async move {
            ProcessBuilder::new("taskkill")
                .args(["/PID", &process.pid.to_string()])
                .capture_output()
                .run()
                .await
                .map(|_| ())
                .map_err(|e| LifecycleError::Signal {
                    name: process.name.clone(),
                    pid: process.pid,
                    message: e.to_string(),
                })
        })
    }

    fn force_terminate<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<(), LifecycleError>> {
        let process = process.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || terminate(&process))
                .await
                .map_err(|e| LifecycleError::Discovery {
                    message: e.to_string(),
                })?
        })
    }
}
