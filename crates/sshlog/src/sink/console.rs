//! crates/sshlog/src/sink/console.rs
//! Timestamped, labelled line renderer over any writer.

use std::fmt::{self, Write as _};
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use super::timestamp::{TIMESTAMP_WIDTH, local_timestamp};
use crate::config::DEFAULT_LOG_WIDTH;
use crate::format::MessageBuffer;
use crate::handler::LogHandler;
use crate::line_ending::LineEnding;
use crate::record::Record;

// Longest prefix is "[WARNING](USERAUTH) "; the rest covers the terminator.
const LINE_WIDTH: usize = TIMESTAMP_WIDTH + DEFAULT_LOG_WIDTH + 32;

type LineBuffer = MessageBuffer<LINE_WIDTH>;

/// Writes one console line for `record`.
///
/// The layout is `<timestamp>[<LEVEL>] <message><eol>` for plain records and
/// `<timestamp>[<LEVEL>](<DOMAIN>) <message><eol>` for domain-qualified ones.
/// `timestamp` already carries its trailing space; `None` omits the field.
/// Lines that fit the internal buffer reach `out` in a single write.
///
/// ```
/// use sshlog::{Domain, LineEnding, Record, Severity, render_line};
///
/// let mut out = Vec::new();
/// let record = Record::new(Severity::Error, Some(Domain::UserAuth), "bad key");
/// render_line(&mut out, None, &record, LineEnding::CrLf)?;
/// assert_eq!(out, b"[ERROR](USERAUTH) bad key\r\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_line<W>(
    out: &mut W,
    timestamp: Option<&str>,
    record: &Record<'_>,
    line_ending: LineEnding,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let mut line = LineBuffer::new();
    let _ = write_prefix(&mut line, timestamp, record);
    let _ = line.write_str(record.message());
    let _ = line.write_str(line_ending.as_str());

    if !line.is_truncated() {
        return out.write_all(line.as_bytes());
    }

    // Oversized record built outside the logger: stream it in pieces.
    line.clear();
    let _ = write_prefix(&mut line, timestamp, record);
    out.write_all(line.as_bytes())?;
    out.write_all(record.message().as_bytes())?;
    out.write_all(line_ending.as_str().as_bytes())
}

fn write_prefix(line: &mut LineBuffer, timestamp: Option<&str>, record: &Record<'_>) -> fmt::Result {
    line.write_str(timestamp.unwrap_or_default())?;
    write!(line, "[{}]", record.severity().label())?;
    if let Some(domain) = record.domain() {
        write!(line, "({})", domain.label())?;
    }
    line.write_char(' ')
}

/// The built-in destination: renders each record as one console line.
///
/// The sink owns its writer behind a mutex so concurrent log calls produce
/// whole lines. Write and flush failures are swallowed; logging never
/// disturbs the caller.
///
/// # Examples
///
/// Collect output in memory without timestamps:
///
/// ```
/// use sshlog::{ConsoleSink, LineEnding, LogHandler, Record, Severity};
///
/// let sink = ConsoleSink::new(Vec::new())
///     .without_timestamps()
///     .with_line_ending(LineEnding::Lf);
/// sink.handle(&Record::new(Severity::Warn, None, "hi"));
///
/// assert_eq!(sink.into_inner(), b"[WARNING] hi\n".to_vec());
/// ```
pub struct ConsoleSink<W = Stdout> {
    writer: Mutex<W>,
    line_ending: LineEnding,
    timestamps: bool,
}

impl ConsoleSink<Stdout> {
    /// Creates a sink on the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for ConsoleSink<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W> ConsoleSink<W> {
    /// Creates a sink with CRLF terminators and timestamps (when compiled in).
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_ending: LineEnding::CrLf,
            timestamps: true,
        }
    }

    /// Selects the line terminator.
    #[must_use]
    pub const fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Omits the timestamp field.
    #[must_use]
    pub const fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Returns the configured terminator.
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Mutably borrows the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        self.writer.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> LogHandler for ConsoleSink<W>
where
    W: Write + Send,
{
    fn handle(&self, record: &Record<'_>) {
        let timestamp = if self.timestamps {
            local_timestamp()
        } else {
            None
        };

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = render_line(
            &mut *writer,
            timestamp.as_ref().map(MessageBuffer::as_str),
            record,
            self.line_ending,
        );
        let _ = writer.flush();
    }
}

impl<W> fmt::Debug for ConsoleSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("line_ending", &self.line_ending)
            .field("timestamps", &self.timestamps)
            .finish_non_exhaustive()
    }
}
