//! crates/sshlog/src/record.rs
//! The finished message handed to a destination.

use crate::levels::{Domain, Severity};

/// One rendered diagnostic.
///
/// The message borrows the call-local buffer and does not outlive the
/// handler invocation. `domain` is `None` for messages logged through the
/// plain entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    severity: Severity,
    domain: Option<Domain>,
    message: &'a str,
}

impl<'a> Record<'a> {
    /// Creates a record.
    pub const fn new(severity: Severity, domain: Option<Domain>, message: &'a str) -> Self {
        Self {
            severity,
            domain,
            message,
        }
    }

    /// Severity the message was logged at.
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Subsystem tag, if the domain-qualified entry point was used.
    pub const fn domain(&self) -> Option<Domain> {
        self.domain
    }

    /// The rendered text.
    pub const fn message(&self) -> &'a str {
        self.message
    }
}
