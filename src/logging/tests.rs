// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(5).is_ok());
    let err = LogLevel::new(6).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'level' in section '[logging]': log level must be 0-5, got 6");
}

#[test]
fn test_log_level_from_int_saturates() {
    assert_eq!(LogLevel::from_int(-3), LogLevel::SILENT);
    assert_eq!(LogLevel::from_int(3), LogLevel::INFO);
    assert_eq!(LogLevel::from_int(100), LogLevel::TRACE);
}

#[test]
fn test_log_level_filter_strings() {
    let filters: Vec<_> = (0..=5)
        .map(|l| LogLevel::from_int(l).to_filter_string())
        .collect();
    assert_eq!(filters, ["off", "error", "warn", "info", "debug", "trace"]);
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(ok, LogLevel::DEBUG);
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}

#[test]
fn test_console_filter_levels() {
    use tracing_subscriber::filter::LevelFilter;

    let debug = super::console_filter(LogLevel::DEBUG);
    assert_eq!(debug.max_level_hint(), Some(LevelFilter::DEBUG));
    assert!(debug.to_string().contains("gix=warn"), "{debug}");

    assert_eq!(
        super::console_filter(LogLevel::SILENT).max_level_hint(),
        Some(LevelFilter::OFF)
    );
    assert!(!super::console_filter(LogLevel::TRACE).to_string().contains("gix"));
}

#[test]
fn test_log_level_serializes_as_number() {
    assert_eq!(serde_json::to_string(&LogLevel::WARN).unwrap(), "2");
}
