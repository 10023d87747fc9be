// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with command lines as build events write them.

use std::path::PathBuf;

use clap::Parser;
use modbuild_rs::cli::{Cli, Command};

// =============================================================================
// Build event command lines
// =============================================================================

#[test]
fn cli_pre_build_event() {
    let cli = Cli::try_parse_from(["modbuild", "git-version"]).unwrap();
    insta::assert_debug_snapshot!(cli.command, @"GitVersion");
}

#[test]
fn cli_post_build_event_sequence() {
    let commands: Vec<Command> = ["build-models", "kill-se", "distribute-steam", "start-se"]
        .into_iter()
        .map(|task| Cli::try_parse_from(["modbuild", "-b", ".", task]).unwrap().command)
        .collect();

    assert_eq!(
        commands,
        [
            Command::BuildModels,
            Command::KillSe,
            Command::DistributeSteam,
            Command::StartSe
        ]
    );
}

#[test]
fn cli_windows_style_root() {
    let cli = Cli::try_parse_from([
        "modbuild",
        "--root",
        r"..\..\..",
        "--build-dir",
        r"bin\x64\Debug",
        "distribute-steam",
    ])
    .unwrap();

    assert_eq!(cli.global.root, PathBuf::from(r"..\..\.."));
    assert_eq!(cli.global.build_dir, PathBuf::from(r"bin\x64\Debug"));
}

#[test]
fn cli_logging_options() {
    let cli = Cli::try_parse_from([
        "modbuild",
        "kill-se",
        "--log-level",
        "4",
        "--log-file",
        "logs/modbuild.log",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.log_file, Some(PathBuf::from("logs/modbuild.log")));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn cli_rejects_extra_positional() {
    assert!(Cli::try_parse_from(["modbuild", "kill-se", "start-se"]).is_err());
}

#[test]
fn cli_version_flag() {
    let err = Cli::try_parse_from(["modbuild", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn cli_help_lists_tasks() {
    let err = Cli::try_parse_from(["modbuild", "--help"]).unwrap_err();
    let help = err.to_string();
    for task in [
        "example-config",
        "git-version",
        "build-models",
        "distribute-steam",
        "kill-se",
        "start-se",
    ] {
        assert!(help.contains(task), "help is missing {task}");
    }
}
