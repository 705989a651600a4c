//! The trace logger: turns a stream of received frames into an ASC file.
//!
//! A [`TraceLogger`] owns its sink and the [`LogEpoch`] of the trace. The
//! transport pushes frames through [`TraceLogger::on_frame`] one at a time, in
//! delivery order. The first frame fixes the epoch and triggers the header;
//! every frame then becomes one line timestamped relative to the first.
//!
//! # Example
//!
//! ```no_run
//! use can_asc_trace::{CanFrame, TraceLogger};
//! use chrono::Utc;
//!
//! let mut logger = TraceLogger::create_or_abort("/tmp/can0.asc");
//! logger.on_frame(&CanFrame::new_data(0x123, &[0xAB, 0xCD]).at(5_000), Utc::now());
//! logger.on_frame(&CanFrame::new_remote(0x7FF, 0).at(250_005_000), Utc::now());
//! // Dropping the logger flushes and closes the file.
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::asc::{FrameFormatter, format_header};
use crate::can::CanFrame;
use crate::config::LoggerConfig;
use crate::sink::{FileSink, TraceSink};
use crate::{Error, Result};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Time reference of a trace, captured from its first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEpoch {
    walltime: DateTime<Utc>,
    monotonic_ns: u64,
}

impl LogEpoch {
    /// Create an epoch from the first frame's wall-clock and monotonic times.
    pub fn new(walltime: DateTime<Utc>, monotonic_ns: u64) -> Self {
        Self {
            walltime,
            monotonic_ns,
        }
    }

    /// Wall-clock time of the first frame, printed in the header.
    pub fn walltime(&self) -> DateTime<Utc> {
        self.walltime
    }

    /// Monotonic timestamp of the first frame.
    pub fn monotonic_ns(&self) -> u64 {
        self.monotonic_ns
    }

    /// Seconds between the first frame and `frame`, on the monotonic clock.
    ///
    /// Out-of-order input yields a negative offset rather than being hidden.
    pub fn relative_seconds(&self, frame: &CanFrame) -> f64 {
        let delta_ns = frame.monotonic_ns as i128 - self.monotonic_ns as i128;
        delta_ns as f64 / NANOS_PER_SECOND
    }
}

/// Receiver of frame events pushed by a transport.
pub trait FrameHandler {
    /// Handle one frame captured at `walltime`.
    fn on_frame(&mut self, frame: &CanFrame, walltime: DateTime<Utc>);
}

/// Counters for a trace logger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Frames delivered to the logger.
    pub frames_received: usize,
    /// Frames whose line reached the sink.
    pub frames_logged: usize,
    /// Remote-request frames received.
    pub remote_frames: usize,
    /// CAN FD frames received.
    pub fd_frames: usize,
    /// Frames with an over-wide id or a DLC that disagrees with the payload.
    pub malformed_frames: usize,
    /// Failed header or line writes.
    pub write_failures: usize,
}

/// Writes received CAN frames to an ASC trace.
///
/// The logger is `Unstarted` until the first frame and `Started` afterwards.
/// Dropping it flushes and closes the sink.
pub struct TraceLogger<S: TraceSink = FileSink> {
    sink: S,
    formatter: FrameFormatter,
    flush_each_line: bool,
    epoch: Option<LogEpoch>,
    header_pending: bool,
    line: String,
    stats: TraceStats,
    closed: bool,
}

impl TraceLogger<FileSink> {
    /// Open a trace file at `path` with the default configuration.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_with_config(path, &LoggerConfig::default())
    }

    /// Open a trace file at `path` with the given configuration.
    pub fn create_with_config(path: impl AsRef<Path>, config: &LoggerConfig) -> Result<Self> {
        let path = path.as_ref();
        let sink = FileSink::with_capacity(path, config.buffer_capacity)?;
        info!("Writing CAN trace to {}", path.display());
        Ok(Self::with_sink(sink, config))
    }

    /// Open a trace file at `path`, aborting the process if it cannot be opened.
    ///
    /// The failure is reported through the `log` facade before aborting.
    /// There is no degraded mode that runs without the trace.
    pub fn create_or_abort(path: impl AsRef<Path>) -> Self {
        Self::create_with_config_or_abort(path, &LoggerConfig::default())
    }

    /// Like [`Self::create_or_abort`] with an explicit configuration.
    pub fn create_with_config_or_abort(path: impl AsRef<Path>, config: &LoggerConfig) -> Self {
        let path = path.as_ref();
        match Self::create_with_config(path, config) {
            Ok(logger) => logger,
            Err(e) => {
                error!("Cannot open CAN trace {}: {}", path.display(), e);
                std::process::abort();
            }
        }
    }
}

impl<S: TraceSink> TraceLogger<S> {
    /// Create a logger writing to an already opened sink.
    pub fn with_sink(sink: S, config: &LoggerConfig) -> Self {
        Self {
            sink,
            formatter: config.formatter(),
            flush_each_line: config.flush_each_line,
            epoch: None,
            header_pending: false,
            line: String::with_capacity(128),
            stats: TraceStats::default(),
            closed: false,
        }
    }

    /// Log one received frame captured at `walltime`.
    ///
    /// The first call fixes the epoch and writes the header. Write failures
    /// are reported through the `log` facade and counted; they never reach
    /// the caller, and the next frame is attempted as usual. If the header
    /// itself could not be written, this frame is dropped and counted as a
    /// failure, and the header is retried with the next frame.
    pub fn on_frame(&mut self, frame: &CanFrame, walltime: DateTime<Utc>) {
        let epoch = match self.epoch {
            Some(epoch) => epoch,
            None => {
                let epoch = LogEpoch::new(walltime, frame.monotonic_ns);
                debug!("CAN trace started at {}", epoch.walltime());
                self.epoch = Some(epoch);
                self.header_pending = true;
                epoch
            }
        };

        self.stats.frames_received += 1;
        if frame.remote {
            self.stats.remote_frames += 1;
        }
        if frame.is_fd() {
            self.stats.fd_frames += 1;
        }
        if frame.is_malformed() {
            self.stats.malformed_frames += 1;
            debug!(
                "Logging malformed CAN frame as received: id {:#x} (extended: {}), dlc {}, {} data bytes",
                frame.id,
                frame.extended,
                frame.dlc,
                frame.data.len()
            );
        }

        if self.header_pending {
            let header = format_header(epoch.walltime());
            match self.sink.write_line(&header) {
                Ok(()) => self.header_pending = false,
                Err(e) => {
                    self.report_write_failure(frame, &e);
                    return;
                }
            }
        }

        self.line.clear();
        self.formatter
            .write_line(&mut self.line, epoch.relative_seconds(frame), frame);

        match self.write_current_line() {
            Ok(()) => self.stats.frames_logged += 1,
            Err(e) => self.report_write_failure(frame, &e),
        }
    }

    fn write_current_line(&mut self) -> Result<()> {
        self.sink.write_line(&self.line)?;
        if self.flush_each_line {
            self.sink.flush()?;
        }
        Ok(())
    }

    fn report_write_failure(&mut self, frame: &CanFrame, err: &Error) {
        self.stats.write_failures += 1;
        warn!(
            "Dropped CAN trace line for id {:#x} ({} failures so far): {}",
            frame.id, self.stats.write_failures, err
        );
    }

    /// The epoch, once the first frame was seen.
    pub fn epoch(&self) -> Option<&LogEpoch> {
        self.epoch.as_ref()
    }

    /// Returns true once the first frame was seen.
    pub fn is_started(&self) -> bool {
        self.epoch.is_some()
    }

    /// Counters collected so far.
    pub fn stats(&self) -> &TraceStats {
        &self.stats
    }

    /// The underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Push buffered lines to storage.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    /// Flush and close the sink, returning the final counters.
    ///
    /// Dropping the logger does the same but can only log a close failure.
    pub fn finish(mut self) -> Result<TraceStats> {
        self.closed = true;
        self.sink.close()?;
        info!("CAN trace closed: {:?}", self.stats);
        Ok(self.stats.clone())
    }
}

impl<S: TraceSink> FrameHandler for TraceLogger<S> {
    fn on_frame(&mut self, frame: &CanFrame, walltime: DateTime<Utc>) {
        TraceLogger::on_frame(self, frame, walltime);
    }
}

impl<S: TraceSink> Drop for TraceLogger<S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        match self.sink.close() {
            Ok(()) => info!("CAN trace closed: {:?}", self.stats),
            Err(e) => error!("Failed to close CAN trace: {}", e),
        }
    }
}
