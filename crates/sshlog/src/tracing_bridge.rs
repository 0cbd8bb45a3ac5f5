//! crates/sshlog/src/tracing_bridge.rs
//! Bridge from the tracing crate into an sshlog [`Logger`].
//!
//! [`SshLogLayer`] lets code that already uses `tracing::info!` and friends
//! feed the same destination as the native entry points. Events go through
//! the logger's gate, so the master switch and threshold still apply.
//!
//! # Mapping
//!
//! - Levels: `TRACE`, `DEBUG`, `INFO`, `WARN`, and `ERROR` map to the
//!   severities of the same name.
//! - Targets: the last `::` segment that names a [`Domain`] tags the record
//!   (`"myapp::kex"` becomes [`Domain::Kex`]); other targets log without a
//!   domain.
//!
//! # Usage
//!
//! ```rust,ignore
//! sshlog::enable_debugging();
//! sshlog::init_tracing()?;
//!
//! tracing::warn!(target: "server::userauth", user = "alice", "rejected key");
//! ```

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::format::MessageBuffer;
use crate::global::global;
use crate::levels::{Domain, Severity};
use crate::logger::Logger;

#[derive(Clone)]
enum Target {
    Global(&'static Logger),
    Shared(Arc<Logger>),
}

/// A tracing layer that forwards events into a [`Logger`].
#[derive(Clone)]
pub struct SshLogLayer {
    target: Target,
}

impl SshLogLayer {
    /// Creates a layer feeding the process-wide logger.
    #[must_use]
    pub fn global() -> Self {
        Self {
            target: Target::Global(global()),
        }
    }

    /// Creates a layer feeding a shared logger.
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self {
            target: Target::Shared(logger),
        }
    }

    fn logger(&self) -> &Logger {
        match &self.target {
            Target::Global(logger) => logger,
            Target::Shared(logger) => logger,
        }
    }

    /// Map a tracing level to a severity.
    const fn severity_for(level: &Level) -> Severity {
        match *level {
            Level::TRACE => Severity::Trace,
            Level::DEBUG => Severity::Debug,
            Level::INFO => Severity::Info,
            Level::WARN => Severity::Warn,
            Level::ERROR => Severity::Error,
        }
    }

    /// Map a tracing target to a domain, preferring the innermost segment.
    fn domain_for(target: &str) -> Option<Domain> {
        target
            .rsplit("::")
            .find_map(|segment| segment.parse::<Domain>().ok())
    }
}

impl fmt::Debug for SshLogLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            Target::Global(_) => "global",
            Target::Shared(_) => "shared",
        };
        f.debug_struct("SshLogLayer").field("logger", &target).finish()
    }
}

impl<S> Layer<S> for SshLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = Self::severity_for(metadata.level());
        let logger = self.logger();
        if !logger.should_log(severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let args = format_args!("{}{}", visitor.message, visitor.fields);

        match Self::domain_for(metadata.target()) {
            Some(domain) => logger.log_domain_args(severity, domain, args),
            None => logger.log_args(severity, args),
        }
    }
}

/// Renders the `message` field followed by ` name=value` pairs.
#[derive(Default)]
struct MessageVisitor {
    message: MessageBuffer,
    fields: MessageBuffer,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message.write_arguments(format_args!("{value:?}"));
        } else {
            self.fields
                .write_arguments(format_args!(" {}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            let _ = self.message.write_str(value);
        } else {
            self.fields
                .write_arguments(format_args!(" {}={value}", field.name()));
        }
    }
}

/// Installs a global tracing subscriber that forwards into the process-wide logger.
///
/// # Errors
///
/// Returns [`TryInitError`] when another global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(SshLogLayer::global())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggerConfig;
    use crate::record::Record;
    use std::sync::Mutex;
    use tracing_subscriber::layer::SubscriberExt;

    type Seen = Arc<Mutex<Vec<(Severity, Option<Domain>, String)>>>;

    fn capturing(config: LoggerConfig) -> (Arc<Logger>, Seen) {
        let seen: Seen = Arc::default();
        let sink = Arc::clone(&seen);
        let logger = Logger::with_handler(config, move |record: &Record<'_>| {
            sink.lock().unwrap().push((
                record.severity(),
                record.domain(),
                record.message().to_owned(),
            ));
        });
        (Arc::new(logger), seen)
    }

    #[test]
    fn test_severity_for() {
        assert_eq!(SshLogLayer::severity_for(&Level::TRACE), Severity::Trace);
        assert_eq!(SshLogLayer::severity_for(&Level::DEBUG), Severity::Debug);
        assert_eq!(SshLogLayer::severity_for(&Level::INFO), Severity::Info);
        assert_eq!(SshLogLayer::severity_for(&Level::WARN), Severity::Warn);
        assert_eq!(SshLogLayer::severity_for(&Level::ERROR), Severity::Error);
    }

    #[test]
    fn test_domain_for() {
        assert_eq!(SshLogLayer::domain_for("server::kex"), Some(Domain::Kex));
        assert_eq!(SshLogLayer::domain_for("server::user_auth"), Some(Domain::UserAuth));
        assert_eq!(SshLogLayer::domain_for("sftp"), Some(Domain::Sftp));
        assert_eq!(SshLogLayer::domain_for("app::channel::window"), Some(Domain::Channel));
        assert_eq!(SshLogLayer::domain_for("unknown"), None);
        assert_eq!(SshLogLayer::domain_for("app::kexinit"), None);
    }

    #[test]
    fn events_reach_the_logger() {
        let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Trace));
        let subscriber = tracing_subscriber::registry().with(SshLogLayer::new(Arc::clone(&logger)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "server::userauth", "rejected {}", "alice");
            tracing::info!(target: "server", "ready");
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[0],
            (Severity::Warn, Some(Domain::UserAuth), "rejected alice".to_owned())
        );
        assert_eq!(seen[1], (Severity::Info, None, "ready".to_owned()));
    }

    #[test]
    fn extra_fields_follow_message() {
        let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Trace));
        let subscriber = tracing_subscriber::registry().with(SshLogLayer::new(Arc::clone(&logger)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "app::kex", peer = "10.0.0.1", code = 3, "no match");
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].1, Some(Domain::Kex));
        assert_eq!(seen[0].2, "no match peer=10.0.0.1 code=3");
    }

    #[test]
    fn gate_applies_to_bridged_events() {
        let (logger, seen) = capturing(LoggerConfig::enabled_at(Severity::Warn));
        let subscriber = tracing_subscriber::registry().with(SshLogLayer::new(Arc::clone(&logger)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("dropped");
            tracing::error!("kept");
            logger.disable();
            tracing::error!("dropped too");
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].2, "kept");
    }

    #[test]
    fn debug_names_target() {
        let (logger, _seen) = capturing(LoggerConfig::default());
        assert!(format!("{:?}", SshLogLayer::new(logger)).contains("shared"));
        assert!(format!("{:?}", SshLogLayer::global()).contains("global"));
    }
}
