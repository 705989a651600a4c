//! Error types for trace logging operations.
//!
//! This module defines the [`Error`] enum which represents all possible failures
//! that can occur when opening a trace sink, writing trace lines, loading
//! configuration or reading recorded frame events.
//!
//! # Example
//!
//! ```no_run
//! use can_asc_trace::{Error, Result, TraceLogger};
//!
//! fn open_trace(path: &str) -> Result<()> {
//!     match TraceLogger::create(path) {
//!         Ok(_logger) => Ok(()),
//!         Err(Error::IOError(e)) => {
//!             eprintln!("Cannot open trace file: {}", e);
//!             Err(Error::IOError(e))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use core::fmt;

/// Errors that can occur while producing an ASC trace.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred while opening, writing or flushing the sink.
    IOError(std::io::Error),

    /// A configuration file could not be parsed.
    ConfigError(String),

    /// A recorded frame event could not be decoded.
    EventParseError {
        /// 1-based line number in the event stream
        line: usize,
        /// Decoder message
        message: String,
    },

    /// A write was attempted after the sink was closed.
    SinkClosed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IOError(e) => write!(f, "I/O error: {e}"),
            Error::ConfigError(s) => write!(f, "Invalid configuration: {s}"),
            Error::EventParseError { line, message } => {
                write!(f, "Invalid frame event on line {line}: {message}")
            }
            Error::SinkClosed => write!(f, "Trace sink is already closed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

/// A specialized Result type for trace operations.
pub type Result<T> = core::result::Result<T, Error>;
