#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `sshlog` is the diagnostics facility of an embeddable SSH protocol
//! library. Call sites attach a [`Severity`] and, optionally, a [`Domain`]
//! naming the subsystem (key exchange, user authentication, SFTP, ...). The
//! facility drops messages below the configured threshold, renders the rest
//! into a fixed-capacity buffer, and hands each one to a single destination:
//! either the built-in console renderer or a handler supplied by the host.
//!
//! # Design
//!
//! - [`Logger`] owns the master switch, the threshold, and the destination.
//!   Tests and embedders can build isolated instances; the free functions
//!   ([`enable_debugging`], [`set_logging_callback`], [`log()`], ...) and the
//!   macros ([`ssh_info!`], [`log_domain!`], ...) operate on one
//!   process-wide instance returned by [`global()`].
//! - Messages are rendered into a [`MessageBuffer`] whose capacity is
//!   [`DEFAULT_LOG_WIDTH`] (120 unless `SSHLOG_LOG_WIDTH` is set when the
//!   crate is compiled). Longer output is truncated, never reallocated.
//! - Destinations implement [`LogHandler`] and receive a [`Record`]. The
//!   legacy two- and three-argument callbacks are adapted onto the same
//!   trait, so exactly one destination is active at a time.
//! - [`ConsoleSink`] writes `YYYY-MM-DD HH:MM:SS [LEVEL](DOMAIN) message\r\n`
//!   lines to standard output or any other writer.
//!
//! # Features
//!
//! - `debug` (default): compiles in gating, formatting, and dispatch. Without
//!   it every entry point is an inline no-op and the macros never evaluate
//!   their arguments.
//! - `default-callback` (default): starts with [`ConsoleSink`] on standard
//!   output as the destination. Without it nothing is written until the host
//!   installs a handler.
//! - `timestamp` (default): prefixes console lines with the local time.
//! - `serde`: serialization for [`Severity`], [`Domain`], and [`LoggerConfig`].
//! - `tracing`: `SshLogLayer` forwards `tracing` events into a logger.
//!
//! # Invariants
//!
//! - A message is dispatched only when the switch is on and its severity is at
//!   or above the threshold; each dispatched call reaches the destination
//!   exactly once.
//! - Rendered text never exceeds `DEFAULT_LOG_WIDTH - 1` bytes and never ends
//!   in a partial UTF-8 sequence.
//! - Registering `None` as a handler or callback leaves the current
//!   destination in place.
//! - Handlers run outside the logger's locks and may log re-entrantly.
//!
//! # Errors
//!
//! Logging entry points never fail. Truncation, a missing local clock, and
//! writer failures are absorbed. Only configuration parsing
//! ([`LoggerConfig::parse_directives`], [`init_from_env`]) reports a
//! [`ConfigError`].
//!
//! # Examples
//!
//! Route messages into a host handler and filter below `WARNING`:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use sshlog::{Domain, Logger, LoggerConfig, Record, Severity};
//!
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&lines);
//! let logger = Logger::with_handler(
//!     LoggerConfig::enabled_at(Severity::Warn),
//!     move |record: &Record<'_>| {
//!         let domain = record.domain().map_or("-", Domain::label);
//!         sink.lock()
//!             .unwrap()
//!             .push(format!("{} {} {}", record.severity(), domain, record.message()));
//!     },
//! );
//!
//! logger.log_args(Severity::Info, format_args!("ignored"));
//! logger.log_domain_args(Severity::Error, Domain::UserAuth, format_args!("bad key"));
//! logger.logf(Severity::Warn, "rekey after %d bytes", &[1_073_741_824i64.into()]);
//!
//! # #[cfg(feature = "debug")]
//! assert_eq!(
//!     *lines.lock().unwrap(),
//!     ["ERROR USERAUTH bad key", "WARNING - rekey after 1073741824 bytes"],
//! );
//! ```
//!
//! Use the process-wide logger through the macros:
//!
//! ```
//! use sshlog::Domain;
//!
//! sshlog::enable_debugging();
//! sshlog::ssh_warn!("host key changed for {}", "example.org");
//! sshlog::ssh_error!(domain = Domain::Kex; "no common cipher");
//! sshlog::disable_debugging();
//! ```

mod config;
mod format;
mod global;
mod handler;
mod levels;
mod line_ending;
mod logger;
mod macros;
mod record;
mod sink;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{ConfigError, DEFAULT_LOG_WIDTH, DEFAULT_THRESHOLD, LOG_ENV_VAR, LoggerConfig};
pub use format::MessageBuffer;
pub use format::printf::{Arg, write_printf};
pub use global::{
    disable_debugging, enable_debugging, global, init_from_env, is_debugging_enabled, log,
    log_domain, log_enabled, log_level, logf, logf_domain, set_handler, set_log_level,
    set_logging_callback, set_logging_callback_ex,
};
pub use handler::{
    CallbackExHandler, CallbackHandler, LogHandler, LoggingCallback, LoggingCallbackEx,
    SharedHandler,
};
pub use levels::{Domain, ParseDomainError, ParseSeverityError, Severity, UNKNOWN_LABEL};
pub use line_ending::LineEnding;
pub use logger::Logger;
pub use record::Record;
pub use sink::{ConsoleSink, TIMESTAMP_WIDTH, Timestamp, local_timestamp, render_line};
#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
pub use tracing_bridge::{SshLogLayer, init_tracing};

#[doc(hidden)]
pub mod __private {
    /// Whether logging code is compiled in.
    pub const ENABLED: bool = cfg!(feature = "debug");

    pub use crate::format::printf::Arg;
    pub use crate::global::global;
    pub use crate::levels::{Domain, Severity};
}
