// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for process lifecycle control against the real
//! process table.
//!
//! Each test gives its child a unique argv[0] so parallel tests never
//! match each other's processes.

#![cfg(target_os = "linux")]

use std::os::unix::process::CommandExt;
use std::process::{Child, Command};
use std::time::Duration;

use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

use modbuild_rs::core::lifecycle::{
    LaunchSpec, LifecycleController, ProcessMatcher, StopTimeouts, SystemProcessTable,
};

// =============================================================================
// Helpers
// =============================================================================

fn controller() -> LifecycleController<SystemProcessTable> {
    LifecycleController::new(SystemProcessTable::new(), Duration::from_millis(50))
}

fn spawn_named(name: &str) -> Child {
    Command::new("sh")
        .arg0(name)
        .args(["-c", "sleep 30; :"])
        .spawn()
        .unwrap()
}

fn short_timeouts() -> StopTimeouts {
    StopTimeouts {
        graceful: Duration::from_secs(5),
        forced: Duration::from_secs(5),
    }
}

// =============================================================================
// Stop
// =============================================================================

#[tokio::test]
async fn lifecycle_stop_all_terminates_matching_process() {
    let mut child = spawn_named("modbuild-it-sleeper");
    let matcher = ProcessMatcher::new(["modbuild-it-sleeper"]);
    let controller = controller();

    let found = controller.discover(&matcher).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].pid, child.id());

    let report = controller.stop_all(&matcher, short_timeouts()).await.unwrap();

    assert_eq!(report.stopped.len(), 1);
    let status = child.wait().unwrap();
    assert!(!status.success());
    assert!(controller.discover(&matcher).await.unwrap().is_empty());
}

#[tokio::test]
async fn lifecycle_stop_all_with_nothing_running() {
    let matcher = ProcessMatcher::new(["modbuild-it-never-started"]);

    let report = controller().stop_all(&matcher, short_timeouts()).await.unwrap();

    assert!(report.is_empty());
}

// =============================================================================
// Start
// =============================================================================

#[tokio::test]
async fn lifecycle_start_launches_detached_process() {
    let controller = controller();
    let spec = LaunchSpec {
        executable: "/bin/sh".into(),
        args: vec!["-c".into(), "exec sleep 30".into()],
        working_dir: None,
        companions: Vec::new(),
    };

    let started = controller.start(&spec).unwrap();
    let pid = started.primary.pid;
    assert!(pid > 0);

    // The shell execs into sleep, so look the pid up under either name.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let matcher = ProcessMatcher::new(["sh", "sleep"]);
    let running = controller
        .discover(&matcher)
        .await
        .unwrap()
        .into_iter()
        .any(|p| p.pid == pid);
    assert!(running, "launched process {pid} not found");

    kill(Pid::from_raw(i32::try_from(pid).unwrap()), Signal::SIGKILL).unwrap();
}
