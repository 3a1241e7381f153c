//! Integration tests for logger behavior.

use pathway_advisor::logger::{
    close_file_logging, init_file_logging, level, set_level, set_level_from_str, should_log, Level,
};
use pathway_advisor::{debug, error, info, warn};
use std::fs;
use tempfile::TempDir;

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn errors_always_pass_the_filter() {
    set_level(Level::Error);
    assert!(should_log(Level::Error));
    set_level(Level::Debug);
    assert!(should_log(Level::Error));
    assert_eq!(level(), Level::Debug);
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_writes_prefixed_lines() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("logs").join("advisor.log");

    assert!(init_file_logging(&path));
    error!("file sink check {}", 42);
    close_file_logging();

    let content = fs::read_to_string(&path).expect("log file should exist");
    let line = content
        .lines()
        .find(|l| l.contains("file sink check 42"))
        .expect("message should be in the log file");
    assert!(line.contains("[ERROR]"));
}
