//! Output sinks for trace text.
//!
//! This module provides the [`TraceSink`] trait that abstracts away where trace
//! lines end up, allowing the logger to write to a buffered file (the normal
//! case) or to an in-memory buffer (useful for tests and for shipping traces
//! over other channels). Each sink is opened by its constructor.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Default `BufWriter` capacity of [`FileSink`].
pub const DEFAULT_BUFFER_CAPACITY: usize = 1_048_576;

/// Append-only destination for trace lines.
pub trait TraceSink {
    /// Append `line` followed by a newline.
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Push buffered bytes to the underlying storage.
    fn flush(&mut self) -> Result<()>;

    /// Flush and release the underlying storage.
    ///
    /// Closing twice is a no-op. Writes after closing fail with
    /// [`Error::SinkClosed`].
    fn close(&mut self) -> Result<()>;
}

impl<S: TraceSink + ?Sized> TraceSink for Box<S> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// A sink that collects trace text in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: String,
    closed: bool,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sink with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            closed: false,
        }
    }

    /// The trace text written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Iterate over the written lines.
    pub fn lines(&self) -> core::str::Lines<'_> {
        self.buffer.lines()
    }

    /// Consume the sink and return the trace text.
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Returns true once [`TraceSink::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl TraceSink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        if self.closed {
            return Err(Error::SinkClosed);
        }
        self.buffer.push_str(line);
        self.buffer.push('\n');
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// A buffered sink over any [`Write`] destination.
///
/// Each line reaches the write buffer together with its newline in a single
/// `write_all`, so a failed flush leaves either the whole line or none of it
/// buffered.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: Option<BufWriter<W>>,
    scratch: Vec<u8>,
}

impl<W: Write> WriterSink<W> {
    /// Wrap `writer` with a buffer of `capacity` bytes.
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        Self {
            inner: Some(BufWriter::with_capacity(capacity, writer)),
            scratch: Vec::with_capacity(128),
        }
    }

    /// Flush the buffer and hand back the writer. `None` once closed.
    fn take_writer(&mut self) -> Result<Option<W>> {
        match self.inner.take() {
            Some(inner) => {
                let writer = inner.into_inner().map_err(|e| Error::IOError(e.into_error()))?;
                Ok(Some(writer))
            }
            None => Ok(None),
        }
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let inner = self.inner.as_mut().ok_or(Error::SinkClosed)?;
        self.scratch.clear();
        self.scratch.extend_from_slice(line.as_bytes());
        self.scratch.push(b'\n');
        inner.write_all(&self.scratch)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(inner) = self.inner.as_mut() {
            inner.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.take_writer().map(drop)
    }
}

/// A buffered sink writing to a file.
///
/// The file is created (or truncated) when the sink is opened, and flushed
/// and synced to disk when it is closed.
#[derive(Debug)]
pub struct FileSink {
    sink: WriterSink<File>,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` for writing with a 1 MB buffer.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_capacity(path, DEFAULT_BUFFER_CAPACITY)
    }

    /// Open `path` for writing with the specified buffer capacity.
    pub fn with_capacity(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            sink: WriterSink::with_capacity(file, capacity),
            path,
        })
    }

    /// Path of the trace file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceSink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.sink.write_line(line)
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<()> {
        if let Some(file) = self.sink.take_writer()? {
            file.sync_data()?;
        }
        Ok(())
    }
}
