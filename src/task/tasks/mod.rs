// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Concrete task implementations.
//!
//! ```text
//! task::tasks
//! Project setup:  ExampleConfigTask
//! Pre-build:      GitVersionTask
//! Post-build:     BuildModelsTask, DistributeTask
//! Game control:   KillGameTask, StartGameTask
//! ```

pub mod build_models;
pub mod distribute;
pub mod example_config;
pub mod git_version;
pub mod kill_game;
pub mod start_game;
