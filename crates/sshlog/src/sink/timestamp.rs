//! crates/sshlog/src/sink/timestamp.rs
//! Local wall-clock prefix for console lines.

#[cfg(feature = "timestamp")]
use ::core::fmt::Write;

#[cfg(feature = "timestamp")]
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use crate::format::MessageBuffer;

/// Capacity of a rendered timestamp, terminator included.
pub const TIMESTAMP_WIDTH: usize = 24;

/// A rendered `YYYY-MM-DD HH:MM:SS ` prefix.
pub type Timestamp = MessageBuffer<TIMESTAMP_WIDTH>;

/// Console timestamp layout; the trailing space separates it from the label.
#[cfg(feature = "timestamp")]
const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero] "
);

/// Renders the current local time.
///
/// Returns `None` when the local UTC offset cannot be determined (the `time`
/// crate refuses on some platforms once the process is multi-threaded) or
/// when the `timestamp` feature is disabled. Callers omit the field.
#[cfg(feature = "timestamp")]
pub fn local_timestamp() -> Option<Timestamp> {
    let now = OffsetDateTime::now_local().ok()?;
    format_timestamp(now)
}

/// Renders the current local time.
///
/// Always `None`: the crate was built without the `timestamp` feature.
#[cfg(not(feature = "timestamp"))]
pub fn local_timestamp() -> Option<Timestamp> {
    None
}

#[cfg(feature = "timestamp")]
fn format_timestamp(moment: OffsetDateTime) -> Option<Timestamp> {
    let mut bytes = [0u8; TIMESTAMP_WIDTH];
    let mut cursor: &mut [u8] = &mut bytes;
    let written = moment.format_into(&mut cursor, TIMESTAMP_FORMAT).ok()?;
    let text = ::core::str::from_utf8(&bytes[..written]).ok()?;

    let mut timestamp = Timestamp::new();
    timestamp.write_str(text).ok()?;
    Some(timestamp)
}

#[cfg(all(test, feature = "timestamp"))]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn formats_iso_date_and_time_with_trailing_space() {
        let moment = datetime!(2024-03-07 09:05:02 UTC);
        let timestamp = format_timestamp(moment).expect("fits in buffer");
        assert_eq!(timestamp.as_str(), "2024-03-07 09:05:02 ");
    }

    #[test]
    fn local_timestamp_has_fixed_shape_when_available() {
        if let Some(timestamp) = local_timestamp() {
            let text = timestamp.as_str();
            assert_eq!(text.len(), 20);
            assert!(text.ends_with(' '));
            assert_eq!(&text[4..5], "-");
            assert_eq!(&text[10..11], " ");
            assert_eq!(&text[13..14], ":");
        }
    }
}

#[cfg(all(test, not(feature = "timestamp")))]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_omitted() {
        assert!(local_timestamp().is_none());
    }
}
