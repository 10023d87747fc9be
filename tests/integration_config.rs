// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests global and project configuration with realistic files on disk.

use std::fs;

use modbuild_rs::config::{GlobalConfig, ProjectConfig};
use modbuild_rs::deploy::FingerprintMode;
use modbuild_rs::error::ConfigError;
use tempfile::TempDir;

// =============================================================================
// Global configuration
// =============================================================================

#[test]
fn config_default_timeouts() {
    insta::assert_debug_snapshot!(GlobalConfig::default().timeouts, @r"
    TimeoutsConfig {
        graceful_secs: 10,
        forced_secs: 5,
        poll_interval_ms: 250,
        model_build_secs: 600,
    }
    ");
}

#[test]
fn config_global_from_exe_dir_and_extra_file() {
    let exe_dir = TempDir::new().unwrap();
    fs::write(
        exe_dir.path().join("modbuild-global.toml"),
        r#"
[tools]
mwm_builder = "C:/Tools/MwmBuilder.exe"

[game]
executable = "C:/SE/Bin64/SpaceEngineers.exe"
process_names = ["SpaceEngineers", "SEPluginLoader", "SpaceEngineersDedicated"]

[deploy]
fingerprint = "size-mtime"
"#,
    )
    .unwrap();
    let extra = exe_dir.path().join("ci.toml");
    fs::write(&extra, "[deploy]\nfingerprint = \"sha256\"\n").unwrap();

    let config = GlobalConfig::load(Some(exe_dir.path()), &[extra]).unwrap();

    assert_eq!(config.game.process_names.len(), 3);
    assert_eq!(config.deploy.fingerprint, FingerprintMode::Sha256);
    assert!(config.tools.mwm_builder.is_some());
}

#[test]
fn config_global_malformed_file_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[game\nexecutable = 1").unwrap();

    let err = GlobalConfig::load(None, &[path]).unwrap_err();

    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("broken.toml"), "{err}");
}

// =============================================================================
// Project configuration
// =============================================================================

#[test]
fn config_project_round_trip_through_disk() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("modbuild.toml"),
        r#"
[project]
name = "WeaponCore Addon"

[paths]
mod_dir = "../Mods/WeaponCoreAddon"

[[models.jobs]]
source = "Models/Src"
output = "Models"
"#,
    )
    .unwrap();

    let project = ProjectConfig::load(root.path())
        .unwrap()
        .resolve(root.path(), root.path(), None)
        .unwrap();

    assert_eq!(project.name, "WeaponCore Addon");
    assert_eq!(
        project.mod_dir,
        root.path()
            .parent()
            .unwrap()
            .join("Mods")
            .join("WeaponCoreAddon")
    );
    // No sources configured: the standard mod layout applies.
    assert_eq!(project.sources.len(), 4);
    assert!(project.sources.iter().all(|s| s.is_optional()));
    assert_eq!(project.model_jobs.len(), 1);
}

#[test]
fn config_project_unknown_key_fails() {
    let err = ProjectConfig::parse("[project]\nname = 'x'\nauthor = 'me'\n").unwrap_err();
    assert!(err.to_string().contains("author"), "{err}");
}
