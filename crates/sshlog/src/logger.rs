//! crates/sshlog/src/logger.rs
//! Explicit logging context: master switch, threshold, and active destination.

use std::fmt;
#[cfg(feature = "debug")]
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
#[cfg(feature = "debug")]
use std::sync::{Arc, PoisonError, RwLock};
#[cfg(feature = "default-callback")]
use std::sync::LazyLock;

use crate::config::{DEFAULT_THRESHOLD, LoggerConfig};
#[cfg(feature = "debug")]
use crate::format::MessageBuffer;
use crate::format::printf::Arg;
#[cfg(feature = "debug")]
use crate::format::printf::write_printf;
#[cfg(feature = "debug")]
use crate::handler::{CallbackExHandler, CallbackHandler};
use crate::handler::{LogHandler, LoggingCallback, LoggingCallbackEx, SharedHandler};
use crate::levels::{Domain, Severity};
#[cfg(feature = "debug")]
use crate::record::Record;
#[cfg(feature = "default-callback")]
use crate::sink::ConsoleSink;

#[cfg(feature = "default-callback")]
static DEFAULT_SINK: LazyLock<ConsoleSink> = LazyLock::new(ConsoleSink::stdout);

/// A self-contained logging facility.
///
/// Each call runs `gate -> format -> dispatch` synchronously. The gate reads
/// two atomics; the destination is swapped under a lock that readers hold
/// only long enough to clone an [`Arc`](std::sync::Arc), so a handler may
/// itself log through the same `Logger`.
///
/// When no handler has been installed, messages go to the built-in console
/// renderer (feature `default-callback`) or nowhere. Without the `debug`
/// feature the type carries no state and every method is a no-op.
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use sshlog::{Logger, LoggerConfig, Record, Severity};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let logger = Logger::with_config(LoggerConfig::enabled_at(Severity::Warn));
/// let sink = Arc::clone(&seen);
/// logger.install(move |record: &Record<'_>| {
///     sink.lock().unwrap().push((record.severity(), record.message().to_owned()));
/// });
///
/// logger.log_args(Severity::Info, format_args!("x"));
/// logger.log_args(Severity::Error, format_args!("disk {}", "full"));
///
/// # #[cfg(feature = "debug")]
/// assert_eq!(*seen.lock().unwrap(), vec![(Severity::Error, "disk full".to_owned())]);
/// ```
pub struct Logger {
    #[cfg(feature = "debug")]
    enabled: AtomicBool,
    #[cfg(feature = "debug")]
    threshold: AtomicU8,
    #[cfg(feature = "debug")]
    handler: RwLock<Option<SharedHandler>>,
}

impl Logger {
    /// Creates a disabled logger at [`DEFAULT_THRESHOLD`] with the default destination.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(LoggerConfig {
            enabled: false,
            threshold: DEFAULT_THRESHOLD,
        })
    }

    /// Creates a logger from an explicit configuration.
    #[cfg(feature = "debug")]
    #[must_use]
    pub const fn with_config(config: LoggerConfig) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            threshold: AtomicU8::new(config.threshold.as_raw()),
            handler: RwLock::new(None),
        }
    }

    /// Creates a logger from an explicit configuration.
    #[cfg(not(feature = "debug"))]
    #[must_use]
    pub const fn with_config(config: LoggerConfig) -> Self {
        let _ = config;
        Self {}
    }

    /// Creates a logger from `config` that sends every message to `handler`.
    #[must_use]
    pub fn with_handler<H>(config: LoggerConfig, handler: H) -> Self
    where
        H: LogHandler + 'static,
    {
        let logger = Self::with_config(config);
        logger.install(handler);
        logger
    }

    /// Turns the master switch on.
    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Turns the master switch off.
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Sets the master switch.
    #[inline]
    pub fn set_enabled(&self, enabled: bool) {
        #[cfg(feature = "debug")]
        self.enabled.store(enabled, Ordering::Relaxed);
        #[cfg(not(feature = "debug"))]
        let _ = enabled;
    }

    /// Reports the master switch; always `false` without the `debug` feature.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "debug")]
        {
            self.enabled.load(Ordering::Relaxed)
        }
        #[cfg(not(feature = "debug"))]
        {
            false
        }
    }

    /// Sets the minimum severity that reaches the destination.
    #[inline]
    pub fn set_threshold(&self, threshold: Severity) {
        #[cfg(feature = "debug")]
        self.threshold.store(threshold.as_raw(), Ordering::Relaxed);
        #[cfg(not(feature = "debug"))]
        let _ = threshold;
    }

    /// Returns the current threshold.
    #[inline]
    pub fn threshold(&self) -> Severity {
        #[cfg(feature = "debug")]
        {
            Severity::from_raw(self.threshold.load(Ordering::Relaxed)).unwrap_or(DEFAULT_THRESHOLD)
        }
        #[cfg(not(feature = "debug"))]
        {
            DEFAULT_THRESHOLD
        }
    }

    /// Snapshot of the switch and the threshold.
    pub fn config(&self) -> LoggerConfig {
        LoggerConfig {
            enabled: self.is_enabled(),
            threshold: self.threshold(),
        }
    }

    /// Replaces the switch and the threshold. The destination is untouched.
    pub fn apply_config(&self, config: LoggerConfig) {
        self.set_threshold(config.threshold);
        self.set_enabled(config.enabled);
    }

    /// Reports whether a message at `severity` would be dispatched.
    #[inline]
    pub fn should_log(&self, severity: Severity) -> bool {
        self.is_enabled() && severity >= self.threshold()
    }

    /// Installs `handler` as the destination; `None` leaves the current one in place.
    pub fn set_handler(&self, handler: Option<SharedHandler>) {
        #[cfg(feature = "debug")]
        if let Some(handler) = handler {
            *self.handler.write().unwrap_or_else(PoisonError::into_inner) = Some(handler);
        }
        #[cfg(not(feature = "debug"))]
        let _ = handler;
    }

    /// Installs `handler` as the destination.
    pub fn install<H>(&self, handler: H)
    where
        H: LogHandler + 'static,
    {
        #[cfg(feature = "debug")]
        self.set_handler(Some(Arc::new(handler)));
        #[cfg(not(feature = "debug"))]
        let _ = handler;
    }

    /// Installs a two-argument callback; `None` is ignored.
    pub fn set_callback(&self, callback: Option<LoggingCallback>) {
        #[cfg(feature = "debug")]
        if let Some(callback) = callback {
            self.install(CallbackHandler(callback));
        }
        #[cfg(not(feature = "debug"))]
        let _ = callback;
    }

    /// Installs a three-argument callback; `None` is ignored.
    pub fn set_callback_ex(&self, callback: Option<LoggingCallbackEx>) {
        #[cfg(feature = "debug")]
        if let Some(callback) = callback {
            self.install(CallbackExHandler(callback));
        }
        #[cfg(not(feature = "debug"))]
        let _ = callback;
    }

    /// Drops any installed handler so the built-in destination applies again.
    pub fn restore_default_handler(&self) {
        #[cfg(feature = "debug")]
        {
            *self.handler.write().unwrap_or_else(PoisonError::into_inner) = None;
        }
    }

    /// Reports whether a host-supplied handler is installed.
    pub fn has_custom_handler(&self) -> bool {
        #[cfg(feature = "debug")]
        {
            self.handler
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .is_some()
        }
        #[cfg(not(feature = "debug"))]
        {
            false
        }
    }

    /// Logs preformatted arguments without a domain.
    #[inline]
    pub fn log_args(&self, severity: Severity, args: fmt::Arguments<'_>) {
        #[cfg(feature = "debug")]
        if self.should_log(severity) {
            self.emit(severity, None, |buffer| buffer.write_arguments(args));
        }
        #[cfg(not(feature = "debug"))]
        let _ = (severity, args);
    }

    /// Logs preformatted arguments tagged with `domain`.
    #[inline]
    pub fn log_domain_args(&self, severity: Severity, domain: Domain, args: fmt::Arguments<'_>) {
        #[cfg(feature = "debug")]
        if self.should_log(severity) {
            self.emit(severity, Some(domain), |buffer| buffer.write_arguments(args));
        }
        #[cfg(not(feature = "debug"))]
        let _ = (severity, domain, args);
    }

    /// Logs a `printf`-style template without a domain.
    ///
    /// See [`write_printf`](crate::write_printf) for the accepted conversions.
    #[inline]
    pub fn logf(&self, severity: Severity, template: &str, args: &[Arg<'_>]) {
        #[cfg(feature = "debug")]
        if self.should_log(severity) {
            self.emit(severity, None, |buffer| {
                let _ = write_printf(buffer, template, args);
            });
        }
        #[cfg(not(feature = "debug"))]
        let _ = (severity, template, args);
    }

    /// Logs a `printf`-style template tagged with `domain`.
    #[inline]
    pub fn logf_domain(&self, severity: Severity, domain: Domain, template: &str, args: &[Arg<'_>]) {
        #[cfg(feature = "debug")]
        if self.should_log(severity) {
            self.emit(severity, Some(domain), |buffer| {
                let _ = write_printf(buffer, template, args);
            });
        }
        #[cfg(not(feature = "debug"))]
        let _ = (severity, domain, template, args);
    }

    #[cfg(feature = "debug")]
    fn emit<F>(&self, severity: Severity, domain: Option<Domain>, render: F)
    where
        F: FnOnce(&mut MessageBuffer),
    {
        let mut buffer = MessageBuffer::new();
        render(&mut buffer);
        self.dispatch(&Record::new(severity, domain, buffer.as_str()));
    }

    /// Sends a finished record to the destination, bypassing the gate.
    #[cfg(feature = "debug")]
    pub fn dispatch(&self, record: &Record<'_>) {
        let handler = self
            .handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match handler {
            Some(handler) => handler.handle(record),
            None => Self::dispatch_default(record),
        }
    }

    #[cfg(feature = "default-callback")]
    fn dispatch_default(record: &Record<'_>) {
        DEFAULT_SINK.handle(record);
    }

    #[cfg(all(feature = "debug", not(feature = "default-callback")))]
    fn dispatch_default(record: &Record<'_>) {
        let _ = record;
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("enabled", &self.is_enabled())
            .field("threshold", &self.threshold())
            .field("custom_handler", &self.has_custom_handler())
            .finish()
    }
}
