//! crates/sshlog/src/levels.rs
//! Severity and domain enumerations with their human-readable labels.

use ::core::fmt;
use ::core::str::FromStr;

use thiserror::Error;

/// Label returned for raw values outside the known set.
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Ordered diagnostic importance.
///
/// Declaration order defines filtering: a message passes the gate when its
/// severity compares greater than or equal to the configured threshold. The
/// facility tags (`Agent`, `Scp`, `Sftp`, `User`) sit between `Debug` and
/// `Info` so the default threshold still admits them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Severity {
    /// Most verbose tier; excluded by the default threshold.
    Trace = 1,
    /// Developer diagnostics.
    Debug = 2,
    /// Agent forwarding facility.
    Agent = 3,
    /// SCP facility.
    Scp = 4,
    /// SFTP facility.
    Sftp = 5,
    /// Host application messages.
    User = 6,
    /// Informational messages.
    Info = 7,
    /// Recoverable problems.
    Warn = 8,
    /// Failed operations.
    Error = 9,
    /// Unrecoverable failures.
    Fatal = 10,
}

impl Severity {
    /// Every severity, lowest first.
    pub const ALL: [Self; 10] = [
        Self::Trace,
        Self::Debug,
        Self::Agent,
        Self::Scp,
        Self::Sftp,
        Self::User,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Returns the label printed by the console renderer.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Agent => "AGENT",
            Self::Scp => "SCP",
            Self::Sftp => "SFTP",
            Self::User => "USER",
            Self::Info => "INFO",
            Self::Warn => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Returns the raw discriminant.
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Converts a raw discriminant back into a severity.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Trace),
            2 => Some(Self::Debug),
            3 => Some(Self::Agent),
            4 => Some(Self::Scp),
            5 => Some(Self::Sftp),
            6 => Some(Self::User),
            7 => Some(Self::Info),
            8 => Some(Self::Warn),
            9 => Some(Self::Error),
            10 => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Returns the label for a raw discriminant, or [`UNKNOWN_LABEL`].
    ///
    /// Hosts that store severities as integers (for example across an FFI
    /// boundary) can label them without validating first.
    ///
    /// ```
    /// use sshlog::Severity;
    ///
    /// assert_eq!(Severity::label_for_raw(9), "ERROR");
    /// assert_eq!(Severity::label_for_raw(200), "UNKNOWN");
    /// ```
    pub const fn label_for_raw(raw: u8) -> &'static str {
        match Self::from_raw(raw) {
            Some(severity) => severity.label(),
            None => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing a [`Severity`] from an unrecognised string fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised log level '{0}'")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let severity = match trimmed.to_ascii_lowercase().as_str() {
            "all" | "trace" => Self::Trace,
            "debug" => Self::Debug,
            "agent" => Self::Agent,
            "scp" => Self::Scp,
            "sftp" => Self::Sftp,
            "user" => Self::User,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            "fatal" => Self::Fatal,
            _ => return Err(ParseSeverityError(trimmed.to_owned())),
        };
        Ok(severity)
    }
}

/// Subsystem that produced a message.
///
/// Domains only label output; they never take part in threshold comparisons.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Domain {
    /// Uncategorised messages.
    #[default]
    General = 0,
    /// Library initialisation.
    Init,
    /// Context and session setup.
    Setup,
    /// Client-side connection establishment.
    Connect,
    /// Server-side connection acceptance.
    Accept,
    /// Transport I/O callbacks.
    Cbio,
    /// Key exchange.
    Kex,
    /// User authentication.
    UserAuth,
    /// SFTP subsystem.
    Sftp,
    /// SCP subsystem.
    Scp,
    /// Key generation.
    Keygen,
    /// Terminal handling.
    Term,
    /// Channel multiplexing.
    Channel,
    /// Agent forwarding.
    Agent,
}

impl Domain {
    /// Every domain in discriminant order.
    pub const ALL: [Self; 14] = [
        Self::General,
        Self::Init,
        Self::Setup,
        Self::Connect,
        Self::Accept,
        Self::Cbio,
        Self::Kex,
        Self::UserAuth,
        Self::Sftp,
        Self::Scp,
        Self::Keygen,
        Self::Term,
        Self::Channel,
        Self::Agent,
    ];

    /// Returns the label printed by the console renderer.
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::Init => "INIT",
            Self::Setup => "SETUP",
            Self::Connect => "CONNECT",
            Self::Accept => "ACCEPT",
            Self::Cbio => "CBIO",
            Self::Kex => "KEX",
            Self::UserAuth => "USERAUTH",
            Self::Sftp => "SFTP",
            Self::Scp => "SCP",
            Self::Keygen => "KEYGEN",
            Self::Term => "TERM",
            Self::Channel => "CHANNEL",
            Self::Agent => "AGENT",
        }
    }

    /// Returns the raw discriminant.
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Converts a raw discriminant back into a domain.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        if (raw as usize) < Self::ALL.len() {
            Some(Self::ALL[raw as usize])
        } else {
            None
        }
    }

    /// Returns the label for a raw discriminant, or [`UNKNOWN_LABEL`].
    pub const fn label_for_raw(raw: u8) -> &'static str {
        match Self::from_raw(raw) {
            Some(domain) => domain.label(),
            None => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing a [`Domain`] from an unrecognised string fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised log domain '{0}'")]
pub struct ParseDomainError(pub String);

impl FromStr for Domain {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|domain| domain.label().eq_ignore_ascii_case(trimmed))
            .or_else(|| {
                // Accept the snake_case spelling too.
                trimmed
                    .eq_ignore_ascii_case("user_auth")
                    .then_some(Self::UserAuth)
            })
            .ok_or_else(|| ParseDomainError(trimmed.to_owned()))
    }
}
