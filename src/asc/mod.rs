//! ASC trace text rendering.
//!
//! An ASC trace is a header block followed by one line per frame:
//!
//! ```text
//! date Mon Jan 01 01:30:05.250 pm 2024
//! base hex  timestamps absolute
//! no internal events logged
//! 0.0000 1 0123 Rx d 2 AB CD
//! 1.2500 1 07FF Rx r 0
//! ```
//!
//! Everything here is pure: the header is a function of the epoch and each
//! line a function of `(relative_seconds, frame)`. State and I/O live in
//! [`crate::TraceLogger`].

mod header;
mod line;

pub use header::{BASE_LINE, DATE_FORMAT, EVENTS_LINE, format_header};
pub use line::{
    CLASSIC_TIMESTAMP_PRECISION, DIRECTION, FD_TIMESTAMP_PRECISION, FrameFormatter, LineFormat,
    format_frame,
};
