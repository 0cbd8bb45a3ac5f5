//! Integration tests for the built-in stdout destination.
//!
//! The default destination writes to the real stdout, so the test re-runs
//! itself as a child process and inspects what the child printed.

#![cfg(feature = "default-callback")]

use std::env;
use std::process::Command;

use sshlog::{Domain, Logger, LoggerConfig, Severity};

const CHILD_ENV: &str = "SSHLOG_TEST_DEFAULT_DESTINATION_CHILD";
const TEST_NAME: &str = "fresh_logger_prints_to_stdout";

fn emit_through_default_destination() {
    let logger = Logger::with_config(LoggerConfig::enabled_at(Severity::Debug));
    assert!(!logger.has_custom_handler());

    logger.log_domain_args(Severity::Error, Domain::UserAuth, format_args!("bad key"));
    logger.log_args(Severity::Warn, format_args!("hi"));
    logger.log_args(Severity::Trace, format_args!("hidden trace"));
}

// ============================================================================
// Default Destination
// ============================================================================

/// Verifies a logger without a host handler renders records on stdout.
#[test]
fn fresh_logger_prints_to_stdout() {
    if env::var_os(CHILD_ENV).is_some() {
        emit_through_default_destination();
        return;
    }

    let output = Command::new(env::current_exe().expect("test binary path"))
        .args(["--exact", TEST_NAME, "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("spawn child test");

    assert!(output.status.success(), "child failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[ERROR](USERAUTH) bad key\r\n"), "stdout: {stdout}");
    assert!(stdout.contains("[WARNING] hi\r\n"), "stdout: {stdout}");
    assert!(!stdout.contains("hidden trace"), "stdout: {stdout}");
}
