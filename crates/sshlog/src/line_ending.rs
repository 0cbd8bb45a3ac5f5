//! crates/sshlog/src/line_ending.rs
//! Line terminator appended by the console renderer.

/// Controls which terminator a [`ConsoleSink`](crate::ConsoleSink) writes after each line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineEnding {
    /// Carriage return plus line feed, the historical console format.
    #[default]
    CrLf,
    /// Bare line feed.
    Lf,
}

impl LineEnding {
    /// Returns the terminator bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sshlog::LineEnding;
    ///
    /// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
    /// assert_eq!(LineEnding::Lf.as_str(), "\n");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

impl From<bool> for LineEnding {
    /// Maps `true` to [`LineEnding::CrLf`] and `false` to [`LineEnding::Lf`].
    fn from(crlf: bool) -> Self {
        if crlf { Self::CrLf } else { Self::Lf }
    }
}
