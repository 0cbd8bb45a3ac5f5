//! crates/sshlog/src/handler.rs
//! Destination trait and adapters for C-style callbacks.

use std::sync::Arc;

use crate::levels::{Domain, Severity};
use crate::record::Record;

/// Legacy two-argument callback.
pub type LoggingCallback = fn(Severity, &str);

/// Legacy three-argument callback. Plain records arrive as [`Domain::General`].
pub type LoggingCallbackEx = fn(Severity, Domain, &str);

/// Shared handle to an installed destination.
pub type SharedHandler = Arc<dyn LogHandler>;

/// A destination for rendered messages.
///
/// Handlers run synchronously on the logging thread and must not fail; any
/// I/O problem is theirs to absorb.
pub trait LogHandler: Send + Sync {
    /// Receives one rendered message.
    fn handle(&self, record: &Record<'_>);
}

impl<F> LogHandler for F
where
    F: Fn(&Record<'_>) + Send + Sync,
{
    fn handle(&self, record: &Record<'_>) {
        self(record);
    }
}

/// Adapts a [`LoggingCallback`] to [`LogHandler`]. The domain is dropped.
#[derive(Clone, Copy, Debug)]
pub struct CallbackHandler(pub LoggingCallback);

impl LogHandler for CallbackHandler {
    fn handle(&self, record: &Record<'_>) {
        (self.0)(record.severity(), record.message());
    }
}

/// Adapts a [`LoggingCallbackEx`] to [`LogHandler`].
#[derive(Clone, Copy, Debug)]
pub struct CallbackExHandler(pub LoggingCallbackEx);

impl LogHandler for CallbackExHandler {
    fn handle(&self, record: &Record<'_>) {
        (self.0)(
            record.severity(),
            record.domain().unwrap_or_default(),
            record.message(),
        );
    }
}
