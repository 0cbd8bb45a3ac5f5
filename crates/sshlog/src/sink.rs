//! crates/sshlog/src/sink.rs
//! The built-in console renderer.

mod console;
mod timestamp;

pub use console::{ConsoleSink, render_line};
pub use timestamp::{TIMESTAMP_WIDTH, Timestamp, local_timestamp};
