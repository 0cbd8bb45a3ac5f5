//! Integration tests for gating and dispatch on isolated `Logger` instances.
//!
//! Each test builds its own logger with a capturing handler, so nothing here
//! touches the process-wide instance.

#![cfg(feature = "debug")]

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use sshlog::{Domain, Logger, LoggerConfig, Record, Severity};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Captured {
    severity: Severity,
    domain: Option<Domain>,
    message: String,
}

fn capturing(config: LoggerConfig) -> (Logger, Arc<Mutex<Vec<Captured>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let logger = Logger::with_handler(config, move |record: &Record<'_>| {
        sink.lock().unwrap().push(Captured {
            severity: record.severity(),
            domain: record.domain(),
            message: record.message().to_owned(),
        });
    });
    (logger, seen)
}

fn severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn domain() -> impl Strategy<Value = Domain> {
    prop::sample::select(Domain::ALL.to_vec())
}

// ============================================================================
// Threshold Scenarios
// ============================================================================

/// Verifies the warn-threshold scenario: info is dropped, error is delivered.
#[test]
fn warn_threshold_drops_info_and_delivers_error() {
    let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Warn));

    logger.logf(Severity::Info, "x", &[]);
    assert!(seen.lock().unwrap().is_empty());

    logger.logf(Severity::Error, "disk %s", &["full".into()]);
    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![Captured {
            severity: Severity::Error,
            domain: None,
            message: "disk full".to_owned(),
        }]
    );
}

/// Verifies the typed and printf entry points deliver identical text.
#[test]
fn typed_and_printf_entry_points_agree() {
    let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Trace));

    logger.log_args(Severity::Info, format_args!("{} bytes in {:.2}s", 512, 1.5));
    logger.logf(Severity::Info, "%d bytes in %.2fs", &[512.into(), 1.5.into()]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].message, "512 bytes in 1.50s");
    assert_eq!(seen[0].message, seen[1].message);
}

/// Verifies the default threshold drops only the most verbose tier.
#[test]
fn default_threshold_excludes_trace_only() {
    let (logger, seen) = capturing(LoggerConfig::default());
    logger.enable();

    for severity in Severity::ALL {
        logger.log_args(severity, format_args!("m"));
    }

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), Severity::ALL.len() - 1);
    assert!(seen.iter().all(|captured| captured.severity != Severity::Trace));
}

/// Verifies a disabled logger never dispatches, whatever the threshold.
#[test]
fn disabled_logger_is_silent() {
    let (logger, seen) = capturing(LoggerConfig {
        enabled: false,
        threshold: Severity::Trace,
    });

    for severity in Severity::ALL {
        logger.log_args(severity, format_args!("m"));
        logger.logf_domain(severity, Domain::Sftp, "m", &[]);
    }

    assert!(seen.lock().unwrap().is_empty());
}

// ============================================================================
// Handler Registration
// ============================================================================

/// Verifies a custom handler receives the label and text the host expects.
#[test]
fn custom_handler_receives_warning() {
    let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Trace));

    logger.log_args(Severity::Warn, format_args!("hi"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].severity.label(), "WARNING");
    assert_eq!(seen[0].message, "hi");
}

/// Verifies registering `None` keeps the previous handler active.
#[test]
fn none_registration_keeps_previous_handler() {
    let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Trace));

    logger.set_handler(None);
    logger.set_callback(None);
    logger.set_callback_ex(None);
    logger.log_args(Severity::Info, format_args!("after"));

    assert_eq!(seen.lock().unwrap().len(), 1);
}

/// Verifies threshold changes take effect on the next call.
#[test]
fn threshold_changes_apply_immediately() {
    let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Error));

    logger.log_args(Severity::Info, format_args!("dropped"));
    logger.set_threshold(Severity::Info);
    logger.log_args(Severity::Info, format_args!("kept"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "kept");
}

// ============================================================================
// Concurrency
// ============================================================================

/// Verifies concurrent callers each produce exactly one record.
#[test]
fn concurrent_logging_delivers_every_record() {
    let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Trace));
    let logger = Arc::new(logger);

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for index in 0..50 {
                    logger.log_domain_args(
                        Severity::Info,
                        Domain::Channel,
                        format_args!("worker {worker} message {index}"),
                    );
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 200);
    assert!(seen.iter().all(|captured| captured.domain == Some(Domain::Channel)));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn dispatch_count_follows_threshold(
        threshold in severity(),
        calls in prop::collection::vec((severity(), prop::option::of(domain())), 0..32),
    ) {
        let (logger, seen) = capturing(LoggerConfig::enabled_at(threshold));

        for (severity, domain) in &calls {
            match domain {
                Some(domain) => logger.log_domain_args(*severity, *domain, format_args!("m")),
                None => logger.log_args(*severity, format_args!("m")),
            }
        }

        let expected: Vec<_> = calls
            .iter()
            .filter(|(severity, _)| *severity >= threshold)
            .map(|(severity, domain)| (*severity, *domain))
            .collect();
        let actual: Vec<_> = seen
            .lock()
            .unwrap()
            .iter()
            .map(|captured| (captured.severity, captured.domain))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn delivered_messages_fit_the_buffer(len in 0usize..512) {
        let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Trace));
        let text = "a".repeat(len);

        logger.log_args(Severity::Info, format_args!("{text}"));

        let seen = seen.lock().unwrap();
        let message = &seen[0].message;
        prop_assert_eq!(message.len(), len.min(sshlog::DEFAULT_LOG_WIDTH - 1));
    }
}
