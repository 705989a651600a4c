//! Logger configuration.
//!
//! All fields have defaults, so a configuration file only needs to name the
//! settings it changes:
//!
//! ```json
//! { "flush_each_line": true, "line_format": "can_fd" }
//! ```

use crate::asc::{FrameFormatter, LineFormat};
use crate::sink::DEFAULT_BUFFER_CAPACITY;

/// Settings for a [`crate::TraceLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LoggerConfig {
    /// Capacity of the file write buffer in bytes
    pub buffer_capacity: usize,
    /// Flush the sink after every frame line.
    ///
    /// Off by default: a hard kill may then lose the last buffered lines.
    pub flush_each_line: bool,
    /// Layout of each frame line
    pub line_format: LineFormat,
    /// Minimum width of the timestamp column (0 = unpadded)
    pub timestamp_width: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            flush_each_line: false,
            line_format: LineFormat::Classic,
            timestamp_width: 0,
        }
    }
}

impl LoggerConfig {
    /// The frame formatter described by this configuration.
    pub fn formatter(&self) -> FrameFormatter {
        FrameFormatter::new(self.line_format).with_timestamp_width(self.timestamp_width)
    }

    /// Parse a configuration from JSON.
    ///
    /// Requires the `serde` feature.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            crate::Error::ConfigError(format!("JSON deserialization failed: {}", e))
        })
    }

    /// Load a configuration from a JSON file.
    ///
    /// Requires the `serde` feature.
    #[cfg(feature = "serde")]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path).map_err(crate::Error::IOError)?;
        Self::from_json(&json)
    }

    /// Save the configuration as pretty-printed JSON.
    ///
    /// Requires the `serde` feature.
    #[cfg(feature = "serde")]
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            crate::Error::ConfigError(format!("JSON serialization failed: {}", e))
        })?;
        std::fs::write(path, json).map_err(crate::Error::IOError)?;
        Ok(())
    }
}
