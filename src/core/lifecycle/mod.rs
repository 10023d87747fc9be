// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stopping and starting the game client and its plugin loader.
//!
//! ```text
//! stop_all(matcher, timeouts)
//!
//!   snapshot ──match names──> [Running] ── none? ──> Ok(empty report)
//!                                 |
//!                       request_termination
//!                                 v
//!                            [Signaled] ──poll until graceful──> [Exited]
//!                                 |
//!                          force_terminate
//!                                 v
//!                            [Signaled] ──poll until forced────> [Exited]
//!                                 |
//!                                 v
//!                            [TimedOut]
//!                                 |
//!   verification snapshot ────────+──> survivors? ──> StopTimeout { survivors }
//!
//! start(spec)
//!   primary ── spawn detached ──> pid
//!   companions ── {pid}/{exe} substituted ──> spawn detached
//! ```
//!
//! The OS is reached only through [`ProcessTable`], so the state machine is
//! the same on every platform and can be driven by a fake in tests.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::SystemProcessTable;
#[cfg(windows)]
pub use self::windows::SystemProcessTable;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::core::process::builder::ProcessBuilder;
use crate::error::LifecycleError;

/// A running process as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
}

impl fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pid {})", self.name, self.pid)
    }
}

/// Matches processes by executable name, ignoring case and a `.exe` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMatcher {
    names: Vec<String>,
}

impl ProcessMatcher {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| normalize_name(n.as_ref()))
                .collect(),
        }
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = normalize_name(name);
        self.names.iter().any(|n| *n == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Lowercased file name without directory and `.exe` suffix.
pub(crate) fn normalize_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let lower = base.to_lowercase();
    match lower.strip_suffix(".exe") {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

/// Access to the OS process table.
pub trait ProcessTable: Send + Sync {
    /// Lists running processes. Zombies are not running.
    fn snapshot(&self) -> BoxFuture<'_, Result<Vec<ProcessInfo>, LifecycleError>>;

    /// Whether the process is still alive. A reused pid with a different
    /// name counts as exited.
    fn is_running<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<bool, LifecycleError>>;

    /// Asks the process to exit (SIGTERM, WM_CLOSE).
    fn request_termination<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<(), LifecycleError>>;

    /// Kills the process (SIGKILL, TerminateProcess).
    fn force_terminate<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<(), LifecycleError>>;
}

/// Per-process state during a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Running,
    Signaled,
    Exited,
    TimedOut,
}

/// A matched process and how far stopping it got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedProcess {
    pub process: ProcessInfo,
    pub state: ProcessState,
    /// Forced termination was needed.
    pub escalated: bool,
}

impl ManagedProcess {
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.process.name
    }
}

/// Bounds for the two stop phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTimeouts {
    pub graceful: Duration,
    pub forced: Duration,
}

impl Default for StopTimeouts {
    fn default() -> Self {
        Self {
            graceful: Duration::from_secs(10),
            forced: Duration::from_secs(5),
        }
    }
}

/// Processes stopped by [`LifecycleController::stop_all`]. Empty when
/// nothing was running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopReport {
    pub stopped: Vec<ManagedProcess>,
}

impl StopReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stopped.is_empty()
    }
}

/// An executable started after the primary, told about it through
/// `{pid}` and `{exe}` in its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionSpec {
    pub executable: PathBuf,
    pub args: Vec<String>,
}

/// What [`LifecycleController::start`] launches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub executable: PathBuf,
    pub args: Vec<String>,
    /// Defaults to the executable's directory.
    pub working_dir: Option<PathBuf>,
    pub companions: Vec<CompanionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedProcess {
    pub name: String,
    pub pid: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReport {
    pub primary: LaunchedProcess,
    pub companions: Vec<LaunchedProcess>,
}

/// Drives stop and start over a [`ProcessTable`].
#[derive(Debug)]
pub struct LifecycleController<T> {
    table: T,
    poll_interval: Duration,
}

impl<T: ProcessTable> LifecycleController<T> {
    pub const fn new(table: T, poll_interval: Duration) -> Self {
        Self {
            table,
            poll_interval,
        }
    }

    pub const fn table(&self) -> &T {
        &self.table
    }

    /// Running processes whose name matches.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Discovery`] if the process table cannot be read.
    pub async fn discover(
        &self,
        matcher: &ProcessMatcher,
    ) -> Result<Vec<ProcessInfo>, LifecycleError> {
        let mut found: Vec<_> = self
            .table
            .snapshot()
            .await?
            .into_iter()
            .filter(|p| matcher.matches(&p.name))
            .collect();
        found.sort_by_key(|p| p.pid);
        Ok(found)
    }

    /// Stops every matching process, escalating to forced termination.
    ///
    /// Returns once every matched process has exited.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::StopTimeout`] naming every process still
    /// running after the forced phase, or a discovery error.
    pub async fn stop_all(
        &self,
        matcher: &ProcessMatcher,
        timeouts: StopTimeouts,
    ) -> Result<StopReport, LifecycleError> {
        let targets = self.discover(matcher).await?;
        if targets.is_empty() {
            info!("no matching processes running");
            return Ok(StopReport::default());
        }

        let mut managed: Vec<ManagedProcess> = targets
            .into_iter()
            .map(|process| ManagedProcess {
                process,
                state: ProcessState::Running,
                escalated: false,
            })
            .collect();

        for entry in &mut managed {
            info!(process = %entry.process, "requesting exit");
            if let Err(e) = self.table.request_termination(&entry.process).await {
                warn!(process = %entry.process, error = %e, "graceful termination request failed");
            }
            entry.state = ProcessState::Signaled;
        }
        self.wait_for_exit(&mut managed, timeouts.graceful).await?;

        let mut escalated = false;
        for entry in managed
            .iter_mut()
            .filter(|m| m.state == ProcessState::Signaled)
        {
            warn!(process = %entry.process, "still running, forcing termination");
            if let Err(e) = self.table.force_terminate(&entry.process).await {
                warn!(process = %entry.process, error = %e, "forced termination failed");
            }
            entry.escalated = true;
            escalated = true;
        }
        if escalated {
            self.wait_for_exit(&mut managed, timeouts.forced).await?;
        }

        let mut survivors = Vec::new();
        for entry in &mut managed {
            if entry.state == ProcessState::Signaled {
                entry.state = ProcessState::TimedOut;
                survivors.push(entry.process.to_string());
            }
        }

        // Anything matching now was either missed above or started meanwhile.
        for process in self.discover(matcher).await? {
            if !managed.iter().any(|m| m.process == process && m.state == ProcessState::TimedOut) {
                survivors.push(process.to_string());
            }
        }

        if !survivors.is_empty() {
            return Err(LifecycleError::StopTimeout { survivors });
        }

        info!(count = managed.len(), "all matching processes stopped");
        Ok(StopReport { stopped: managed })
    }

    /// Polls signaled processes until they exit or `limit` elapses.
    async fn wait_for_exit(
        &self,
        managed: &mut [ManagedProcess],
        limit: Duration,
    ) -> Result<(), LifecycleError> {
        let deadline = Instant::now() + limit;
        loop {
            let mut pending = 0;
            for entry in managed
                .iter_mut()
                .filter(|m| m.state == ProcessState::Signaled)
            {
                if self.table.is_running(&entry.process).await? {
                    pending += 1;
                } else {
                    debug!(process = %entry.process, "exited");
                    entry.state = ProcessState::Exited;
                }
            }

            let now = Instant::now();
            if pending == 0 || now >= deadline {
                return Ok(());
            }
            // A zero interval would rescan the process table without pause.
            let pause = self.poll_interval.max(MIN_POLL_INTERVAL);
            tokio::time::sleep(pause.min(deadline - now)).await;
        }
    }

    /// Launches the primary executable, then its companions.
    ///
    /// Returns as soon as every process has been spawned. Launched processes
    /// outlive this one.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Launch`] if an executable is missing or
    /// cannot be spawned. Companions after a failed one are not launched.
    pub fn start(&self, spec: &LaunchSpec) -> Result<StartReport, LifecycleError> {
        let executable = resolve_executable(&spec.executable)?;
        let working_dir = spec
            .working_dir
            .clone()
            .or_else(|| executable.parent().map(Path::to_path_buf))
            .filter(|d| !d.as_os_str().is_empty());

        let primary = launch(&executable, &spec.args, working_dir.as_deref())?;
        info!(process = %primary.name, pid = primary.pid, "launched");

        let mut companions = Vec::with_capacity(spec.companions.len());
        for companion in &spec.companions {
            let companion_exe = resolve_executable(&companion.executable)?;
            let args: Vec<String> = companion
                .args
                .iter()
                .map(|a| substitute(a, primary.pid, &executable))
                .collect();
            let cwd = companion_exe
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .map(Path::to_path_buf);
            let launched = launch(&companion_exe, &args, cwd.as_deref())?;
            info!(process = %launched.name, pid = launched.pid, target = primary.pid, "launched companion");
            companions.push(launched);
        }

        Ok(StartReport {
            primary,
            companions,
        })
    }
}

fn substitute(arg: &str, pid: u32, exe: &Path) -> String {
    arg.replace("{pid}", &pid.to_string())
        .replace("{exe}", &exe.display().to_string())
}

fn resolve_executable(executable: &Path) -> Result<PathBuf, LifecycleError> {
    let not_found = || LifecycleError::Launch {
        executable: executable.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "executable not found"),
    };

    if executable.components().count() > 1 || executable.is_absolute() {
        return if executable.is_file() {
            Ok(executable.to_path_buf())
        } else {
            Err(not_found())
        };
    }
    executable
        .to_str()
        .and_then(ProcessBuilder::find)
        .ok_or_else(not_found)
}

fn launch(
    executable: &Path,
    args: &[String],
    working_dir: Option<&Path>,
) -> Result<LaunchedProcess, LifecycleError> {
    let mut builder = ProcessBuilder::new(executable).args(args);
    if let Some(dir) = working_dir {
        builder = builder.cwd(dir);
    }
    let pid = builder
        .spawn_detached()
        .map_err(|source| LifecycleError::Launch {
            executable: executable.to_path_buf(),
            source,
        })?;

    let name = executable.file_name().map_or_else(
        || executable.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    );
    Ok(LaunchedProcess { name, pid })
}
