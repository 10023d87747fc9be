// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;

use super::KillGameTask;
use crate::config::GlobalConfig;
use crate::core::lifecycle::{ProcessInfo, ProcessState, ProcessTable, StopTimeouts};
use crate::error::{ConfigError, LifecycleError};

/// Processes that exit as soon as they are asked to.
#[derive(Debug, Clone, Default)]
struct ObedientTable {
    running: Arc<Mutex<Vec<ProcessInfo>>>,
}

impl ObedientTable {
    fn with(names: &[(u32, &str)]) -> Self {
        let table = Self::default();
        table.running.lock().unwrap().extend(names.iter().map(|(pid, name)| ProcessInfo {
            pid: *pid,
            name: (*name).to_string(),
        }));
        table
    }

    fn remove(&self, process: &ProcessInfo) {
        self.running.lock().unwrap().retain(|p| p != process);
    }

    fn pids(&self) -> Vec<u32> {
        self.running.lock().unwrap().iter().map(|p| p.pid).collect()
    }
}

impl ProcessTable for ObedientTable {
    fn snapshot(&self) -> BoxFuture<'_, Result<Vec<ProcessInfo>, LifecycleError>> {
        let running = self.running.lock().unwrap().clone();
        Box::pin(async move { Ok(running) })
    }

    fn is_running<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<bool, LifecycleError>> {
        let alive = self.running.lock().unwrap().contains(process);
        Box::pin(async move { Ok(alive) })
    }

    fn request_termination<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<(), LifecycleError>> {
        self.remove(process);
        Box::pin(async { Ok(()) })
    }

    fn force_terminate<'a>(
        &'a self,
        process: &'a ProcessInfo,
    ) -> BoxFuture<'a, Result<(), LifecycleError>> {
        self.remove(process);
        Box::pin(async { Ok(()) })
    }
}

fn task() -> KillGameTask {
    KillGameTask::from_config(&GlobalConfig::default()).expect("defaults are valid")
}

#[test]
fn test_from_config_uses_timeouts() {
    let mut global = GlobalConfig::default();
    global.timeouts.graceful_secs = 3;
    global.timeouts.forced_secs = 1;
    let task = KillGameTask::from_config(&global).expect("valid");
    assert_eq!(
        task.timeouts,
        StopTimeouts {
            graceful: Duration::from_secs(3),
            forced: Duration::from_secs(1),
        }
    );
    assert_eq!(task.process_names(), ["SpaceEngineers", "SEPluginLoader"]);
}

#[test]
fn test_from_config_requires_process_names() {
    let mut global = GlobalConfig::default();
    global.game.process_names = vec![String::new()];
    let err = KillGameTask::from_config(&global).unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey { ref key, .. } if key == "process_names"));
}

#[tokio::test(start_paused = true)]
async fn test_stops_game_and_plugin_loader() {
    let table = ObedientTable::with(&[
        (10, "SpaceEngineers.exe"),
        (11, "SEPluginLoader.exe"),
        (12, "steam.exe"),
    ]);

    let report = task().stop_with(table.clone(), false).await.expect("stops");

    assert_eq!(report.stopped.len(), 2);
    assert!(report.stopped.iter().all(|m| m.state == ProcessState::Exited));
    assert_eq!(table.pids(), [12]);
}

#[tokio::test(start_paused = true)]
async fn test_dry_run_only_discovers() {
    let table = ObedientTable::with(&[(10, "spaceengineers.exe")]);

    let report = task().stop_with(table.clone(), true).await.expect("dry run");

    assert!(report.is_empty());
    assert_eq!(table.pids(), [10]);
}

#[tokio::test(start_paused = true)]
async fn test_nothing_running_succeeds() {
    let report = task()
        .stop_with(ObedientTable::default(), false)
        .await
        .expect("nothing to stop");
    assert!(report.is_empty());
}
