#![forbid(unsafe_code)]

//! # can-asc-trace
//!
//! A Rust library that writes received CAN frames to ASCII trace files in the
//! "ASC" layout understood by common CAN analysis tools.
//!
//! Frames arrive one at a time from a message bus (the transport is not part
//! of this crate). The first frame fixes the trace epoch: its wall-clock time
//! goes into the header and its monotonic timestamp becomes time zero for every
//! following line.
//!
//! ## Features
//!
//! - **Formatting**: pure header and line rendering in [`asc`]
//! - **Logging**: [`TraceLogger`] owns the output file and epoch state
//! - **Sinks**: buffered files or in-memory buffers behind [`TraceSink`]
//! - **Replay**: push recorded [`FrameEvent`]s through the same logger
//! - **CAN FD**: an alternative `CANFD` line layout with BRS/ESI flags
//!
//! ## Quick Start
//!
//! ```no_run
//! use can_asc_trace::{CanFrame, TraceLogger};
//! use chrono::Utc;
//!
//! // Aborts the process if the trace file cannot be created.
//! let mut logger = TraceLogger::create_or_abort("/tmp/can0.asc");
//!
//! logger.on_frame(&CanFrame::new_data(0x123, &[0xAB, 0xCD]).at(0), Utc::now());
//! logger.on_frame(&CanFrame::new_remote(0x7FF, 0).at(1_250_000_000), Utc::now());
//! ```
//!
//! produces
//!
//! ```text
//! date Mon Jan 01 01:30:05.250 pm 2024
//! base hex  timestamps absolute
//! no internal events logged
//! 0.0000 1 0123 Rx d 2 AB CD
//! 1.2500 1 07FF Rx r 0
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`asc`] | Header and frame line rendering |
//! | [`can`] | Received frame types and CAN FD helpers |
//! | [`sink`] | Output sinks |
//! | [`config`] | Logger configuration |
//! | [`events`] | Frame events and replay |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Error Handling
//!
//! Opening the trace is the only fallible step a caller sees. Write failures
//! after that are reported through the [`log`](https://crates.io/crates/log)
//! facade and counted in [`TraceStats`]; [`TraceLogger::on_frame`] never fails.

pub mod asc;
pub mod can;
pub mod config;
pub mod error;
pub mod events;
pub mod sink;

mod logger;

// Re-export commonly used types at the crate root
pub use asc::{FrameFormatter, LineFormat, format_frame, format_header};
pub use can::{CanFrame, FdFlags};
pub use config::LoggerConfig;
pub use error::{Error, Result};
pub use events::{FrameEvent, replay};
pub use logger::{FrameHandler, LogEpoch, TraceLogger, TraceStats};
pub use sink::{FileSink, MemorySink, TraceSink, WriterSink};

#[cfg(feature = "serde")]
pub use events::{JsonLinesEvents, replay_json_lines};
