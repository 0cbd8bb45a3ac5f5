//! crates/sshlog/src/config.rs
//! Logging configuration values, build-time defaults, and directive parsing.

use std::env;

use thiserror::Error;

use super::levels::{ParseSeverityError, Severity};

/// Environment variable consulted by [`LoggerConfig::from_env`].
pub const LOG_ENV_VAR: &str = "SSHLOG";

/// Threshold applied until the host selects another one.
///
/// This is the least restrictive level that still excludes [`Severity::Trace`].
pub const DEFAULT_THRESHOLD: Severity = Severity::Debug;

/// Rendered message capacity, terminator included.
///
/// Defaults to 120 and may be overridden at build time through the
/// `SSHLOG_LOG_WIDTH` environment variable. Values that are not decimal or
/// are smaller than 2 fall back to the default.
pub const DEFAULT_LOG_WIDTH: usize = match option_env!("SSHLOG_LOG_WIDTH") {
    Some(width) => parse_width(width),
    None => FALLBACK_LOG_WIDTH,
};

const FALLBACK_LOG_WIDTH: usize = 120;

const fn parse_width(raw: &str) -> usize {
    let bytes = raw.as_bytes();
    if bytes.is_empty() {
        return FALLBACK_LOG_WIDTH;
    }

    let mut value: usize = 0;
    let mut index = 0;
    while index < bytes.len() {
        let byte = bytes[index];
        if !byte.is_ascii_digit() {
            return FALLBACK_LOG_WIDTH;
        }
        value = match value.checked_mul(10) {
            Some(scaled) => match scaled.checked_add((byte - b'0') as usize) {
                Some(next) => next,
                None => return FALLBACK_LOG_WIDTH,
            },
            None => return FALLBACK_LOG_WIDTH,
        };
        index += 1;
    }

    if value < 2 { FALLBACK_LOG_WIDTH } else { value }
}

/// Errors produced while parsing logging directives.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// The directive list contained an empty token.
    #[error("empty logging directive")]
    EmptyDirective,
    /// The directive named neither a switch nor a level.
    #[error("unknown logging directive '{directive}'")]
    UnknownDirective {
        /// The offending directive.
        directive: String,
        /// Why the directive was not understood as a level.
        #[source]
        source: ParseSeverityError,
    },
    /// The environment variable held non-UTF-8 data.
    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(&'static str),
}

/// Runtime state of the master switch and the threshold.
///
/// The default is disabled with [`DEFAULT_THRESHOLD`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Master switch.
    pub enabled: bool,
    /// Minimum severity that reaches the destination.
    pub threshold: Severity,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl LoggerConfig {
    /// Creates an enabled configuration with the given threshold.
    pub const fn enabled_at(threshold: Severity) -> Self {
        Self {
            enabled: true,
            threshold,
        }
    }

    /// Applies a single directive.
    ///
    /// `on`/`enable` and `off`/`disable` flip the master switch. Any level
    /// name (`trace`, `all`, `debug`, `warn`, ...) sets the threshold and
    /// enables logging.
    pub fn apply_directive(&mut self, token: &str) -> Result<(), ConfigError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyDirective);
        }

        match token.to_ascii_lowercase().as_str() {
            "on" | "enable" | "enabled" => self.enabled = true,
            "off" | "disable" | "disabled" | "none" => self.enabled = false,
            _ => {
                let threshold =
                    token
                        .parse::<Severity>()
                        .map_err(|source| ConfigError::UnknownDirective {
                            directive: token.to_owned(),
                            source,
                        })?;
                self.threshold = threshold;
                self.enabled = true;
            }
        }
        Ok(())
    }

    /// Applies a comma-separated directive list such as `"on,warn"`.
    ///
    /// Directives apply left to right; later entries override earlier ones.
    pub fn apply_directives(&mut self, list: &str) -> Result<(), ConfigError> {
        for token in list.split(',') {
            self.apply_directive(token)?;
        }
        Ok(())
    }

    /// Builds a configuration from a directive list, starting from the default.
    pub fn parse_directives(list: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_directives(list)?;
        Ok(config)
    }

    /// Reads [`LOG_ENV_VAR`].
    ///
    /// Returns `Ok(None)` when the variable is unset.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        match env::var(LOG_ENV_VAR) {
            Ok(value) => Self::parse_directives(&value).map(Some),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(LOG_ENV_VAR)),
        }
    }
}
