//! Integration tests for builds without the `debug` feature.
//!
//! Every entry point must stay callable while doing nothing observable.

#![cfg(not(feature = "debug"))]

use sshlog::{Domain, Logger, LoggerConfig, Record, Severity};

fn reject(_severity: Severity, _message: &str) {
    panic!("callback invoked without debug support");
}

#[test]
fn free_functions_are_inert() {
    sshlog::enable_debugging();
    assert!(!sshlog::is_debugging_enabled());
    assert!(!sshlog::log_enabled(Severity::Fatal));

    sshlog::set_logging_callback(Some(reject));
    sshlog::log(Severity::Fatal, format_args!("x"));
    sshlog::log_domain(Severity::Fatal, Domain::Kex, format_args!("x"));
    sshlog::logf(Severity::Fatal, "%s", &["x".into()]);
}

#[test]
fn macros_do_not_evaluate_arguments() {
    let mut evaluated = false;
    let mut touch = || {
        evaluated = true;
        1
    };

    sshlog::ssh_fatal!("{}", touch());
    sshlog::ssh_error!(domain = Domain::Sftp; "{}", touch());
    sshlog::logf!(Severity::Fatal, "%d", touch());

    assert!(!evaluated);
}

#[test]
fn context_is_inert() {
    let logger = Logger::with_config(LoggerConfig::enabled_at(Severity::Trace));
    logger.install(|_record: &Record<'_>| panic!("dispatched without debug support"));
    logger.log_domain_args(Severity::Fatal, Domain::Init, format_args!("x"));
    assert!(!logger.has_custom_handler());
    assert_eq!(logger.threshold(), sshlog::DEFAULT_THRESHOLD);
}
