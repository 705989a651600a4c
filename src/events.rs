//! Frame events and offline replay.
//!
//! Live capture pushes frames straight into a [`FrameHandler`]. Recorded
//! captures can be pushed through [`replay`] instead, in their recorded order,
//! which turns any stored event stream into an ASC trace. With the `serde`
//! feature, [`JsonLinesEvents`] reads events stored one JSON object per line:
//!
//! ```text
//! {"frame":{"channel":1,"id":291,"dlc":2,"data":[171,205],"monotonic_ns":0},"walltime":"2024-01-01T13:30:05Z"}
//! ```

use chrono::{DateTime, Utc};

use crate::can::CanFrame;
use crate::logger::FrameHandler;

/// A frame together with the wall-clock time it was captured at.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameEvent {
    /// The received frame
    pub frame: CanFrame,
    /// Wall-clock capture time
    pub walltime: DateTime<Utc>,
}

impl FrameEvent {
    /// Pair a frame with its capture time.
    pub fn new(frame: CanFrame, walltime: DateTime<Utc>) -> Self {
        Self { frame, walltime }
    }
}

/// Push `events` into `handler` in iteration order.
///
/// Events are not re-sorted. Returns the number of events delivered.
pub fn replay<I, H>(events: I, handler: &mut H) -> usize
where
    I: IntoIterator<Item = FrameEvent>,
    H: FrameHandler + ?Sized,
{
    let mut delivered = 0;
    for event in events {
        handler.on_frame(&event.frame, event.walltime);
        delivered += 1;
    }
    delivered
}

#[cfg(feature = "serde")]
pub use json_lines::{JsonLinesEvents, replay_json_lines};

#[cfg(feature = "serde")]
mod json_lines {
    use std::io::BufRead;

    use super::FrameEvent;
    use crate::logger::FrameHandler;
    use crate::{Error, Result};

    /// Iterator over frame events stored as JSON lines.
    ///
    /// Blank lines are skipped. Malformed lines yield
    /// [`Error::EventParseError`] with their 1-based line number.
    pub struct JsonLinesEvents<R> {
        reader: R,
        line: String,
        line_number: usize,
    }

    impl<R: BufRead> JsonLinesEvents<R> {
        /// Read events from `reader`.
        pub fn new(reader: R) -> Self {
            Self {
                reader,
                line: String::new(),
                line_number: 0,
            }
        }
    }

    impl<R: BufRead> Iterator for JsonLinesEvents<R> {
        type Item = Result<FrameEvent>;

        fn next(&mut self) -> Option<Self::Item> {
            loop {
                self.line.clear();
                match self.reader.read_line(&mut self.line) {
                    Ok(0) => return None,
                    Ok(_) => {}
                    Err(e) => return Some(Err(Error::IOError(e))),
                }
                self.line_number += 1;

                let text = self.line.trim();
                if text.is_empty() {
                    continue;
                }
                return Some(serde_json::from_str(text).map_err(|e| Error::EventParseError {
                    line: self.line_number,
                    message: e.to_string(),
                }));
            }
        }
    }

    /// Replay a JSON-lines event stream into `handler`.
    ///
    /// Stops at the first unreadable event; events before it have already
    /// been delivered. Returns the number of events delivered.
    pub fn replay_json_lines<R, H>(reader: R, handler: &mut H) -> Result<usize>
    where
        R: BufRead,
        H: FrameHandler + ?Sized,
    {
        let mut delivered = 0;
        for event in JsonLinesEvents::new(reader) {
            let event = event?;
            handler.on_frame(&event.frame, event.walltime);
            delivered += 1;
        }
        Ok(delivered)
    }
}
