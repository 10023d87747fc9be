// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use super::builder::ProcessBuilder;
use crate::error::ProcessError;

fn shell(script: &str) -> ProcessBuilder {
    #[cfg(windows)]
    {
        ProcessBuilder::new("cmd").args(["/C", script])
    }
    #[cfg(not(windows))]
    {
        ProcessBuilder::new("/bin/sh").args(["-c", script])
    }
}

#[tokio::test]
async fn test_process_echo() {
    let output = shell("echo hello")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout().trim(), @"hello");
}

#[tokio::test]
async fn test_process_captures_many_lines() {
    #[cfg(windows)]
    let script = "for /L %i in (1,1,500) do @echo line%i";
    #[cfg(not(windows))]
    let script = "i=1; while [ $i -le 500 ]; do echo line$i; i=$((i+1)); done";

    let output = shell(script).capture_output().run().await.unwrap();

    assert_eq!(output.stdout().lines().count(), 500);
    assert_eq!(output.stdout().lines().last(), Some("line500"));
}

#[tokio::test]
async fn test_process_exit_code_rejected() {
    let err = shell("exit 3").name("builder").run().await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"process 'builder' exited with code 3");
}

#[tokio::test]
async fn test_process_spawn_failure() {
    let err = ProcessBuilder::new("/definitely/not/here/tool")
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::SpawnFailed { .. }), "{err}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_timeout_kills() {
    let started = std::time::Instant::now();
    let err = ProcessBuilder::new("sleep")
        .arg("30")
        .timeout(Duration::from_millis(200))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, ProcessError::Timeout { .. }), "{err}");
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[cfg(unix)]
#[tokio::test]
async fn test_spawn_detached_returns_pid() {
    let pid = ProcessBuilder::new("sleep")
        .arg("0")
        .spawn_detached()
        .unwrap();
    assert!(pid > 0);
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("MwmBuilder.exe").args(["/s:C:\\My Mod\\Models", "/o:out"]);
    insta::assert_snapshot!(builder.command_line(), @r#"MwmBuilder.exe "/s:C:\My Mod\Models" /o:out"#);
    assert_eq!(builder.display_name(), "MwmBuilder");
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";

    assert!(ProcessBuilder::find(program).is_none());
}
