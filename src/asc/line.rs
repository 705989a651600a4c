//! One trace line per received frame.

use core::fmt::{self, Write};

use crate::can::{CanFrame, len_to_dlc};

/// Fractional digits of the classic line timestamp.
pub const CLASSIC_TIMESTAMP_PRECISION: usize = 4;

/// Fractional digits of the CAN FD line timestamp.
pub const FD_TIMESTAMP_PRECISION: usize = 6;

/// Every logged frame was received.
pub const DIRECTION: &str = "Rx";

// Flag bits of the CAN FD line, as read back by ASC consumers.
const ASC_F_RTR: u32 = 0x0000_0010;
const ASC_F_FDF: u32 = 0x0000_1000;
const ASC_F_BRS: u32 = 0x0000_2000;
const ASC_F_ESI: u32 = 0x0000_4000;

// Message duration and bit count columns, fixed in the converter output.
const FD_TIMING_COLUMNS: &str = "   130000  130 ";
const FD_TRAILER: &str = " 0 0 0 0 0";
const FD_ID_PADDING: &str = "                                  ";

/// Layout of each frame line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LineFormat {
    /// `<t> <ch> <id> Rx <d|r> <dlc> [<byte> ...]`
    #[default]
    Classic,
    /// The `CANFD` event layout with BRS/ESI, DLC, length and flag columns.
    CanFd,
}

/// Renders frames into trace lines.
///
/// The formatter holds only layout settings and never changes after
/// construction, so rendering is a pure function of `(relative_seconds, frame)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameFormatter {
    format: LineFormat,
    timestamp_width: usize,
}

impl FrameFormatter {
    /// Create a formatter for the given line layout.
    pub const fn new(format: LineFormat) -> Self {
        Self {
            format,
            timestamp_width: 0,
        }
    }

    /// Right-align the timestamp column in a field of `width` characters.
    pub const fn with_timestamp_width(mut self, width: usize) -> Self {
        self.timestamp_width = width;
        self
    }

    /// The line layout in use.
    pub const fn line_format(&self) -> LineFormat {
        self.format
    }

    /// Render one frame line, without line terminator.
    pub fn format_line(&self, relative_seconds: f64, frame: &CanFrame) -> String {
        let mut line = String::with_capacity(64);
        self.write_line(&mut line, relative_seconds, frame);
        line
    }

    /// Append one frame line to `out`, without line terminator.
    pub fn write_line(&self, out: &mut String, relative_seconds: f64, frame: &CanFrame) {
        // Writing into a String cannot fail.
        let _ = match self.format {
            LineFormat::Classic => write_classic(out, relative_seconds, frame, self.timestamp_width),
            LineFormat::CanFd => write_can_fd(out, relative_seconds, frame, self.timestamp_width),
        };
    }
}

/// Render a frame in the classic layout with an unpadded timestamp.
///
/// ```
/// use can_asc_trace::{CanFrame, format_frame};
///
/// let frame = CanFrame::new_data(0x123, &[0xAB, 0xCD]);
/// assert_eq!(format_frame(0.0, &frame), "0.0000 1 0123 Rx d 2 AB CD");
/// ```
pub fn format_frame(relative_seconds: f64, frame: &CanFrame) -> String {
    FrameFormatter::new(LineFormat::Classic).format_line(relative_seconds, frame)
}

fn write_classic<W: Write>(
    out: &mut W,
    relative_seconds: f64,
    frame: &CanFrame,
    width: usize,
) -> fmt::Result {
    write!(
        out,
        "{relative_seconds:>width$.prec$} {} ",
        frame.channel,
        prec = CLASSIC_TIMESTAMP_PRECISION
    )?;

    // Ids are printed in full even when they overflow the declared width.
    if frame.extended {
        write!(out, "{:08X}", frame.id)?;
    } else {
        write!(out, "{:04X}", frame.id)?;
    }

    let kind = if frame.remote { 'r' } else { 'd' };
    write!(out, " {DIRECTION} {kind} {}", frame.dlc)?;

    if !frame.remote {
        for byte in &frame.data {
            write!(out, " {byte:02X}")?;
        }
    }
    Ok(())
}

fn write_can_fd<W: Write>(
    out: &mut W,
    relative_seconds: f64,
    frame: &CanFrame,
    width: usize,
) -> fmt::Result {
    let flags = frame.fd_flags.unwrap_or_default();

    let mut asc_flags = 0;
    if frame.is_fd() {
        asc_flags |= ASC_F_FDF;
    }
    if flags.brs() {
        asc_flags |= ASC_F_BRS;
    }
    if flags.esi() {
        asc_flags |= ASC_F_ESI;
    }
    if frame.remote {
        asc_flags |= ASC_F_RTR;
    }

    write!(
        out,
        "{relative_seconds:>width$.prec$} CANFD {:>3} {DIRECTION} ",
        frame.channel,
        prec = FD_TIMESTAMP_PRECISION
    )?;

    let suffix = if frame.extended { "x" } else { "" };
    let id = format!("{:X}{suffix}", frame.id);
    write!(out, "{id:>11}{FD_ID_PADDING}")?;

    // Remote frames keep the requested DLC; data frames print the code of
    // the bytes actually received.
    let (dlc, payload): (u8, &[u8]) = if frame.remote {
        (frame.dlc, &[])
    } else {
        (len_to_dlc(frame.data.len()), &frame.data)
    };
    write!(
        out,
        "{} {} {dlc:x} ",
        flags.brs() as u8,
        flags.esi() as u8
    )?;

    write!(out, "{:>2}", payload.len())?;
    for byte in payload {
        write!(out, " {byte:02X}")?;
    }

    write!(out, "{FD_TIMING_COLUMNS}{asc_flags:>8x}{FD_TRAILER}")
}
