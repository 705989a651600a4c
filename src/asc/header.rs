//! The header block that opens every trace.

use chrono::{DateTime, Utc};

/// Calendar format of the `date` line, e.g. `Mon Jan 01 01:30:05.250 pm 2024`.
pub const DATE_FORMAT: &str = "%a %b %d %I:%M:%S%.3f %P %Y";

/// Declares hexadecimal ids and timestamps counted from the start of the trace.
pub const BASE_LINE: &str = "base hex  timestamps absolute";

/// Declares that the trace carries no logger-internal events.
pub const EVENTS_LINE: &str = "no internal events logged";

/// Format the header block for a trace whose first frame arrived at `epoch`.
///
/// The block is three lines joined by `\n`, without a trailing newline. The
/// date is rendered in UTC. The two literal lines are read back by CAN
/// analysis tools to decide the id base and the timestamp reference, so they
/// must not change.
pub fn format_header(epoch: DateTime<Utc>) -> String {
    format!(
        "date {}\n{BASE_LINE}\n{EVENTS_LINE}",
        epoch.format(DATE_FORMAT)
    )
}
