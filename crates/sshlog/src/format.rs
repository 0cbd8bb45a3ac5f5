//! crates/sshlog/src/format.rs
//! Fixed-capacity message rendering with guaranteed truncation.

use ::core::fmt::{self, Write};

use crate::config::DEFAULT_LOG_WIDTH;

pub mod printf;

/// Stack buffer holding one rendered message.
///
/// `N` counts the terminator, so at most `N - 1` bytes of text are kept and
/// the byte following the text is always `0`. Writes past the end are
/// discarded and mark the buffer as truncated; they never fail the caller
/// and never split a UTF-8 sequence.
///
/// ```
/// use std::fmt::Write;
/// use sshlog::MessageBuffer;
///
/// let mut buffer = MessageBuffer::<8>::new();
/// let _ = write!(buffer, "disk {}", "full");
/// assert_eq!(buffer.as_str(), "disk fu");
/// assert!(buffer.is_truncated());
/// assert_eq!(buffer.as_bytes_with_nul(), b"disk fu\0");
/// ```
#[derive(Clone)]
pub struct MessageBuffer<const N: usize = DEFAULT_LOG_WIDTH> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> MessageBuffer<N> {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(N > 0, "message buffers need room for a terminator") };
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Renders `args` into a fresh buffer.
    #[must_use]
    pub fn from_args(args: fmt::Arguments<'_>) -> Self {
        let mut buffer = Self::new();
        buffer.write_arguments(args);
        buffer
    }

    /// Maximum number of text bytes, excluding the terminator.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Number of text bytes currently held.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Reports whether the buffer holds no text.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reports whether any write was cut short.
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Discards the current contents.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
        self.bytes[0] = 0;
    }

    /// Appends formatted arguments, stopping silently at capacity.
    pub fn write_arguments(&mut self, args: fmt::Arguments<'_>) {
        // A full buffer reports fmt::Error to stop formatting early.
        let _ = self.write_fmt(args);
    }

    /// Returns the rendered text.
    pub fn as_str(&self) -> &str {
        // Only whole scalars are ever copied in, so this cannot fail.
        ::core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Returns the rendered text as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Returns the rendered text followed by its NUL terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }

    fn remaining(&self) -> usize {
        N - 1 - self.len
    }
}

impl<const N: usize> Default for MessageBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Write for MessageBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Err(fmt::Error);
        }

        let remaining = self.remaining();
        let mut take = s.len().min(remaining);
        while !s.is_char_boundary(take) {
            take -= 1;
        }

        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        self.bytes[self.len] = 0;

        if take < s.len() {
            self.truncated = true;
            return Err(fmt::Error);
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for MessageBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuffer")
            .field("text", &self.as_str())
            .field("capacity", &self.capacity())
            .field("truncated", &self.truncated)
            .finish()
    }
}

impl<const N: usize> fmt::Display for MessageBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> AsRef<str> for MessageBuffer<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
