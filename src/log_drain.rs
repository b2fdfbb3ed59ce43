//! Log drain: turns [`LogStream`] entries into text.
//!
//! Runs outside the keying path, so it may block on its output. The host
//! binary points it at stderr.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

/// Format one entry.
///
/// Format: `[timestamp_ms] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, out: &mut dyn Write) -> core::fmt::Result {
    writeln!(
        out,
        "[{:8}] {}: {}",
        entry.timestamp_ms,
        entry.level.as_str(),
        entry.message()
    )
}

/// Drain every pending entry into `out`.
///
/// Reports (and resets) the drop counter once the ring is empty.
/// Returns the number of entries written.
pub fn drain_log<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut count = 0;

    while let Some(entry) = stream.drain() {
        let _ = format_log_entry(&entry, out);
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] log dropped {} messages", dropped);
        stream.reset_dropped();
    }

    count
}
