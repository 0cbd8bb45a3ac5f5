//! crates/sshlog/src/macros.rs
//! Logging macros over the process-wide logger.
//!
//! Every macro checks the gate before its arguments are evaluated, and
//! expands to nothing observable when the crate is built without `debug`.

/// Log a message at an explicit severity.
///
/// # Example
/// ```
/// use sshlog::Severity;
///
/// sshlog::log!(Severity::Error, "disk {}", "full");
/// ```
#[macro_export]
macro_rules! log {
    ($severity:expr, $($arg:tt)+) => {{
        if $crate::__private::ENABLED {
            let logger = $crate::__private::global();
            let severity: $crate::__private::Severity = $severity;
            if logger.should_log(severity) {
                logger.log_args(severity, ::core::format_args!($($arg)+));
            }
        }
    }};
}

/// Log a domain-tagged message at an explicit severity.
///
/// # Example
/// ```
/// use sshlog::{Domain, Severity};
///
/// sshlog::log_domain!(Severity::Error, Domain::UserAuth, "bad key for {}", "alice");
/// ```
#[macro_export]
macro_rules! log_domain {
    ($severity:expr, $domain:expr, $($arg:tt)+) => {{
        if $crate::__private::ENABLED {
            let logger = $crate::__private::global();
            let severity: $crate::__private::Severity = $severity;
            if logger.should_log(severity) {
                let domain: $crate::__private::Domain = $domain;
                logger.log_domain_args(severity, domain, ::core::format_args!($($arg)+));
            }
        }
    }};
}

/// Log a `printf`-style template.
///
/// Arguments are converted with `Arg::from`, so integers, floats, strings,
/// characters, and booleans can be passed directly. The template must come
/// from the host, never from a peer.
///
/// # Example
/// ```
/// use sshlog::{Domain, Severity};
///
/// sshlog::logf!(Severity::Info, "window %u bytes", 4096u32);
/// sshlog::logf!(domain = Domain::Channel; Severity::Info, "id=%d", 7);
/// ```
#[macro_export]
macro_rules! logf {
    (domain = $domain:expr; $severity:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        if $crate::__private::ENABLED {
            let logger = $crate::__private::global();
            let severity: $crate::__private::Severity = $severity;
            if logger.should_log(severity) {
                logger.logf_domain(
                    severity,
                    $domain,
                    $template,
                    &[$($crate::__private::Arg::from($arg)),*],
                );
            }
        }
    }};
    ($severity:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        if $crate::__private::ENABLED {
            let logger = $crate::__private::global();
            let severity: $crate::__private::Severity = $severity;
            if logger.should_log(severity) {
                logger.logf(severity, $template, &[$($crate::__private::Arg::from($arg)),*]);
            }
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ssh_level {
    ($severity:ident, domain = $domain:expr; $($arg:tt)+) => {
        $crate::log_domain!($crate::__private::Severity::$severity, $domain, $($arg)+)
    };
    ($severity:ident, $($arg:tt)+) => {
        $crate::log!($crate::__private::Severity::$severity, $($arg)+)
    };
}

/// Log at [`Severity::Trace`](crate::Severity::Trace).
///
/// # Example
/// ```
/// sshlog::ssh_trace!("read {} bytes", 32);
/// ```
#[macro_export]
macro_rules! ssh_trace {
    ($($arg:tt)+) => {
        $crate::__ssh_level!(Trace, $($arg)+)
    };
}

/// Log at [`Severity::Debug`](crate::Severity::Debug).
///
/// # Example
/// ```
/// use sshlog::Domain;
///
/// sshlog::ssh_debug!(domain = Domain::Kex; "offered {} algorithms", 9);
/// ```
#[macro_export]
macro_rules! ssh_debug {
    ($($arg:tt)+) => {
        $crate::__ssh_level!(Debug, $($arg)+)
    };
}

/// Log at [`Severity::Info`](crate::Severity::Info).
#[macro_export]
macro_rules! ssh_info {
    ($($arg:tt)+) => {
        $crate::__ssh_level!(Info, $($arg)+)
    };
}

/// Log at [`Severity::Warn`](crate::Severity::Warn).
#[macro_export]
macro_rules! ssh_warn {
    ($($arg:tt)+) => {
        $crate::__ssh_level!(Warn, $($arg)+)
    };
}

/// Log at [`Severity::Error`](crate::Severity::Error).
///
/// # Example
/// ```
/// use sshlog::Domain;
///
/// sshlog::ssh_error!(domain = Domain::UserAuth; "bad key");
/// ```
#[macro_export]
macro_rules! ssh_error {
    ($($arg:tt)+) => {
        $crate::__ssh_level!(Error, $($arg)+)
    };
}

/// Log at [`Severity::Fatal`](crate::Severity::Fatal).
#[macro_export]
macro_rules! ssh_fatal {
    ($($arg:tt)+) => {
        $crate::__ssh_level!(Fatal, $($arg)+)
    };
}
