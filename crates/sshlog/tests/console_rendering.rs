//! Integration tests for the console renderer and its use as a destination.

#![cfg(feature = "debug")]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use sshlog::{
    ConsoleSink, Domain, LineEnding, LogHandler, Logger, LoggerConfig, Record, Severity,
    local_timestamp, render_line,
};

/// Writer handle shared between a sink and the test body.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("utf-8 output")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn console_logger(threshold: Severity) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let sink = ConsoleSink::new(buffer.clone()).without_timestamps();
    (
        Logger::with_handler(LoggerConfig::enabled_at(threshold), sink),
        buffer,
    )
}

// ============================================================================
// Line Layout
// ============================================================================

/// Verifies domain-qualified records carry both labels.
#[test]
fn domain_record_shows_severity_and_domain() {
    let (logger, buffer) = console_logger(Severity::Trace);

    logger.log_domain_args(Severity::Error, Domain::UserAuth, format_args!("bad key"));

    assert_eq!(buffer.text(), "[ERROR](USERAUTH) bad key\r\n");
}

/// Verifies plain records omit the domain field.
#[test]
fn plain_record_has_severity_only() {
    let (logger, buffer) = console_logger(Severity::Trace);

    logger.logf(Severity::Warn, "hi", &[]);

    assert_eq!(buffer.text(), "[WARNING] hi\r\n");
}

/// Verifies each legacy facility tag prints its own label.
#[test]
fn facility_severities_use_their_labels() {
    let (logger, buffer) = console_logger(Severity::Trace);

    logger.log_args(Severity::Agent, format_args!("a"));
    logger.log_args(Severity::Scp, format_args!("b"));
    logger.log_args(Severity::Sftp, format_args!("c"));
    logger.log_args(Severity::User, format_args!("d"));

    assert_eq!(buffer.text(), "[AGENT] a\r\n[SCP] b\r\n[SFTP] c\r\n[USER] d\r\n");
}

/// Verifies suppressed records write nothing.
#[test]
fn suppressed_records_write_nothing() {
    let (logger, buffer) = console_logger(Severity::Warn);

    logger.log_args(Severity::Info, format_args!("x"));

    assert!(buffer.text().is_empty());
}

/// Verifies a 200-character message is cut to the buffer capacity on the console too.
#[test]
fn oversized_message_is_truncated_in_line() {
    let (logger, buffer) = console_logger(Severity::Trace);
    let long = "m".repeat(200);

    logger.log_args(Severity::Info, format_args!("{long}"));

    let text = buffer.text();
    let message = text
        .strip_prefix("[INFO] ")
        .and_then(|rest| rest.strip_suffix("\r\n"))
        .expect("framed line");
    assert_eq!(message.len(), sshlog::DEFAULT_LOG_WIDTH - 1);
}

/// Verifies LF terminators can replace the CRLF default.
#[test]
fn lf_line_ending() {
    let mut out = Vec::new();
    let record = Record::new(Severity::Info, Some(Domain::Term), "resize");

    render_line(&mut out, Some("2024-05-06 07:08:09 "), &record, LineEnding::Lf).unwrap();

    assert_eq!(out, b"2024-05-06 07:08:09 [INFO](TERM) resize\n");
}

// ============================================================================
// Timestamps
// ============================================================================

/// Verifies the local timestamp, when available, has the documented shape.
#[test]
fn local_timestamp_shape() {
    let Some(timestamp) = local_timestamp() else {
        return;
    };
    let text = timestamp.as_str();
    assert_eq!(text.len(), 20);
    assert!(text.ends_with(' '));
    let bytes = text.as_bytes();
    assert_eq!(bytes[4], b'-');
    assert_eq!(bytes[7], b'-');
    assert_eq!(bytes[10], b' ');
    assert_eq!(bytes[13], b':');
    assert_eq!(bytes[16], b':');
}

/// Verifies a timestamped sink still ends each line with the framed record.
#[test]
fn timestamped_sink_frames_record() {
    let buffer = SharedBuffer::default();
    let sink = ConsoleSink::new(buffer.clone());

    sink.handle(&Record::new(Severity::Fatal, Some(Domain::Init), "abort"));

    let text = buffer.text();
    assert!(text.ends_with("[FATAL](INIT) abort\r\n"));
}

// ============================================================================
// Default Destination
// ============================================================================

/// Verifies a fresh logger routes to the built-in renderer rather than a host handler.
#[test]
fn fresh_logger_uses_builtin_destination() {
    let logger = Logger::with_config(LoggerConfig::enabled_at(Severity::Trace));
    assert!(!logger.has_custom_handler());

    // Lands on stdout (or nowhere without default-callback); must not panic.
    logger.log_domain_args(Severity::Error, Domain::UserAuth, format_args!("bad key"));
}

/// Verifies restoring the default after a custom handler stops host delivery.
#[test]
fn restore_default_detaches_host_handler() {
    let (logger, buffer) = console_logger(Severity::Trace);

    logger.restore_default_handler();
    logger.log_args(Severity::Info, format_args!("to stdout"));

    assert!(buffer.text().is_empty());
}
