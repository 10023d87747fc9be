// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::Parser;

use crate::cli::global::GlobalOptions;
use crate::cli::{Cli, Command};
use crate::logging::LogLevel;

#[test]
fn test_parse_task_with_defaults() {
    let cli = Cli::try_parse_from(["modbuild", "distribute-steam"]).unwrap();
    assert_eq!(cli.command, Command::DistributeSteam);
    assert_eq!(cli.global.build_dir, PathBuf::from("."));
    assert_eq!(cli.global.root, PathBuf::from("../../../../.."));
    assert!(!cli.global.debug);
    assert!(!cli.global.dry);
}

#[test]
fn test_parse_global_options_before_and_after_task() {
    let cli = Cli::try_parse_from([
        "modbuild", "-d", "-b", "bin/Debug", "kill-se", "-r", "../..", "--dry", "-c", "a.toml",
        "-c", "b.toml",
    ])
    .unwrap();

    assert_eq!(cli.command, Command::KillSe);
    assert!(cli.global.debug);
    assert!(cli.global.dry);
    assert_eq!(cli.global.build_dir, PathBuf::from("bin/Debug"));
    assert_eq!(cli.global.root, PathBuf::from("../.."));
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
}

#[test]
fn test_every_task_name_parses() {
    for name in [
        "example-config",
        "git-version",
        "build-models",
        "distribute-steam",
        "kill-se",
        "start-se",
    ] {
        let cli = Cli::try_parse_from(["modbuild", name]).unwrap();
        assert_eq!(cli.command.name(), name);
    }
}

#[test]
fn test_unknown_task_is_rejected() {
    assert!(Cli::try_parse_from(["modbuild", "deploy"]).is_err());
    assert!(Cli::try_parse_from(["modbuild"]).is_err());
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["modbuild", "-l", "6", "kill-se"]).is_err());
    let cli = Cli::try_parse_from(["modbuild", "-l", "5", "kill-se"]).unwrap();
    assert_eq!(cli.global.log_level, Some(5));
}

#[test]
fn test_console_level_precedence() {
    let mut options = GlobalOptions::default();
    assert_eq!(options.console_level(LogLevel::WARN), LogLevel::WARN);

    options.debug = true;
    assert_eq!(options.console_level(LogLevel::WARN), LogLevel::DEBUG);
    assert_eq!(options.console_level(LogLevel::TRACE), LogLevel::TRACE);

    options.log_level = Some(1);
    assert_eq!(options.console_level(LogLevel::TRACE), LogLevel::ERROR);
}

#[test]
fn test_needs_project() {
    assert!(!Command::ExampleConfig.needs_project());
    assert!(Command::KillSe.needs_project());
    assert!(Command::DistributeSteam.needs_project());
    assert!(Command::GitVersion.needs_project());
}
