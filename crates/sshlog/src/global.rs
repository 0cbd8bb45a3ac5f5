//! crates/sshlog/src/global.rs
//! Process-wide logger and the free-function API over it.

use std::fmt;

use crate::config::{ConfigError, LoggerConfig};
use crate::format::printf::Arg;
use crate::handler::{LoggingCallback, LoggingCallbackEx, SharedHandler};
use crate::levels::{Domain, Severity};
use crate::logger::Logger;

static GLOBAL: Logger = Logger::new();

/// Returns the process-wide logger used by the free functions and macros.
#[inline]
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Turns the process-wide master switch on.
pub fn enable_debugging() {
    GLOBAL.enable();
}

/// Turns the process-wide master switch off.
pub fn disable_debugging() {
    GLOBAL.disable();
}

/// Reports the process-wide master switch.
///
/// Always `false` when the crate is built without the `debug` feature.
pub fn is_debugging_enabled() -> bool {
    GLOBAL.is_enabled()
}

/// Reports whether a message at `severity` would currently be dispatched.
pub fn log_enabled(severity: Severity) -> bool {
    GLOBAL.should_log(severity)
}

/// Installs a severity-only callback; `None` keeps the current destination.
pub fn set_logging_callback(callback: Option<LoggingCallback>) {
    GLOBAL.set_callback(callback);
}

/// Installs a severity-and-domain callback; `None` keeps the current destination.
pub fn set_logging_callback_ex(callback: Option<LoggingCallbackEx>) {
    GLOBAL.set_callback_ex(callback);
}

/// Installs a shared handler; `None` keeps the current destination.
pub fn set_handler(handler: Option<SharedHandler>) {
    GLOBAL.set_handler(handler);
}

/// Sets the process-wide threshold.
pub fn set_log_level(threshold: Severity) {
    GLOBAL.set_threshold(threshold);
}

/// Returns the process-wide threshold.
pub fn log_level() -> Severity {
    GLOBAL.threshold()
}

/// Logs preformatted arguments through the process-wide logger.
///
/// Most callers want the [`log!`](crate::log!) macro, which skips argument
/// evaluation entirely when the message would be suppressed.
#[inline]
pub fn log(severity: Severity, args: fmt::Arguments<'_>) {
    GLOBAL.log_args(severity, args);
}

/// Logs preformatted, domain-tagged arguments through the process-wide logger.
#[inline]
pub fn log_domain(severity: Severity, domain: Domain, args: fmt::Arguments<'_>) {
    GLOBAL.log_domain_args(severity, domain, args);
}

/// Logs a `printf`-style template through the process-wide logger.
///
/// The template is trusted input; see [`write_printf`](crate::write_printf).
#[inline]
pub fn logf(severity: Severity, template: &str, args: &[Arg<'_>]) {
    GLOBAL.logf(severity, template, args);
}

/// Logs a domain-tagged `printf`-style template through the process-wide logger.
#[inline]
pub fn logf_domain(severity: Severity, domain: Domain, template: &str, args: &[Arg<'_>]) {
    GLOBAL.logf_domain(severity, domain, template, args);
}

/// Applies the [`LOG_ENV_VAR`](crate::LOG_ENV_VAR) directives to the process-wide logger.
///
/// An unset variable leaves the logger untouched.
///
/// # Errors
///
/// Returns [`ConfigError`] when the variable holds an unknown directive or is
/// not valid Unicode. The logger is not modified in that case.
pub fn init_from_env() -> Result<(), ConfigError> {
    if let Some(config) = LoggerConfig::from_env()? {
        GLOBAL.apply_config(config);
    }
    Ok(())
}
