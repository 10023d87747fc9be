// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> global config --> Logging --> cmd::run_command
//! ```

use std::process::ExitCode;

use modbuild_rs::cli::{self, global::GlobalOptions};
use modbuild_rs::cmd::{load_global_config, run_command};
use modbuild_rs::config::GlobalConfig;
use modbuild_rs::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_global_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&cli.global, &config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run_command(cli.command, &cli.global, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{} failed", cli.command.name());
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(options: &GlobalOptions, config: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(options.console_level(config.logging.level))
        .with_file_level(config.logging.file_level)
        .maybe_with_log_file(options.log_file.clone().or_else(|| config.logging.file.clone()))
        .with_show_target(options.debug)
        .build()
}
