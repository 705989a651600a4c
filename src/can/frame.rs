//! The received CAN frame as delivered by the transport.

use super::fd::{FdFlags, MAX_CLASSIC_DATA_LEN, dlc_to_len, len_to_dlc};

/// Largest identifier representable in the 11-bit standard format.
pub const STANDARD_ID_MAX: u32 = 0x7FF;

/// Largest identifier representable in the 29-bit extended format.
pub const EXTENDED_ID_MAX: u32 = 0x1FFF_FFFF;

/// A single CAN frame event.
///
/// The frame is kept exactly as it was received: the identifier is never
/// masked to its declared width and the DLC is never reconciled with the
/// payload length. The trace is meant to show upstream bugs, not hide them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanFrame {
    /// 1-based logger channel the frame was received on
    pub channel: u8,
    /// Arbitration identifier (11-bit standard or 29-bit extended)
    pub id: u32,
    /// Whether the identifier uses the 29-bit extended format
    #[cfg_attr(feature = "serde", serde(default))]
    pub extended: bool,
    /// Whether this is a remote-request frame
    #[cfg_attr(feature = "serde", serde(default))]
    pub remote: bool,
    /// Data length code as declared on the wire
    pub dlc: u8,
    /// Payload bytes (ignored for remote frames)
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Vec<u8>,
    /// CAN FD flags, `None` for classic CAN frames
    #[cfg_attr(feature = "serde", serde(default))]
    pub fd_flags: Option<FdFlags>,
    /// Monotonic send timestamp in nanoseconds
    pub monotonic_ns: u64,
}

impl CanFrame {
    /// Create a classic standard-format data frame on channel 1.
    ///
    /// The DLC is taken from the payload length.
    pub fn new_data(id: u32, data: &[u8]) -> Self {
        Self {
            channel: 1,
            id,
            extended: false,
            remote: false,
            dlc: data.len().min(u8::MAX as usize) as u8,
            data: data.to_vec(),
            fd_flags: None,
            monotonic_ns: 0,
        }
    }

    /// Create a standard-format remote-request frame on channel 1.
    pub fn new_remote(id: u32, dlc: u8) -> Self {
        Self {
            channel: 1,
            id,
            extended: false,
            remote: true,
            dlc,
            data: Vec::new(),
            fd_flags: None,
            monotonic_ns: 0,
        }
    }

    /// Create a CAN FD data frame on channel 1.
    ///
    /// The DLC is the CAN FD code for the payload length.
    pub fn new_fd(id: u32, data: &[u8], flags: FdFlags) -> Self {
        Self {
            channel: 1,
            id,
            extended: false,
            remote: false,
            dlc: len_to_dlc(data.len()),
            data: data.to_vec(),
            fd_flags: Some(flags),
            monotonic_ns: 0,
        }
    }

    /// Mark the identifier as 29-bit extended format.
    pub fn extended(mut self) -> Self {
        self.extended = true;
        self
    }

    /// Set the logger channel.
    pub fn on_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Set the monotonic send timestamp in nanoseconds.
    pub fn at(mut self, monotonic_ns: u64) -> Self {
        self.monotonic_ns = monotonic_ns;
        self
    }

    /// Override the declared data length code.
    pub fn with_dlc(mut self, dlc: u8) -> Self {
        self.dlc = dlc;
        self
    }

    /// Convert an [`embedded_can::Frame`] received on `channel`.
    #[cfg(feature = "can")]
    pub fn from_embedded<F: embedded_can::Frame>(frame: &F, channel: u8, monotonic_ns: u64) -> Self {
        let (id, extended) = match frame.id() {
            embedded_can::Id::Standard(id) => (id.as_raw() as u32, false),
            embedded_can::Id::Extended(id) => (id.as_raw(), true),
        };
        Self {
            channel,
            id,
            extended,
            remote: frame.is_remote_frame(),
            dlc: frame.dlc().min(u8::MAX as usize) as u8,
            data: frame.data().to_vec(),
            fd_flags: None,
            monotonic_ns,
        }
    }

    /// Returns true for CAN FD frames.
    #[inline]
    pub fn is_fd(&self) -> bool {
        self.fd_flags.is_some()
    }

    /// Returns true if the identifier does not fit its declared format.
    pub fn id_exceeds_format(&self) -> bool {
        let max = if self.extended {
            EXTENDED_ID_MAX
        } else {
            STANDARD_ID_MAX
        };
        self.id > max
    }

    /// Returns true if the declared DLC disagrees with the payload.
    ///
    /// Remote frames carry no payload, so only their DLC range is checked.
    pub fn dlc_mismatch(&self) -> bool {
        match (self.remote, self.fd_flags) {
            (true, _) => self.dlc as usize > MAX_CLASSIC_DATA_LEN,
            (false, Some(_)) => dlc_to_len(self.dlc) != self.data.len(),
            (false, None) => self.dlc as usize != self.data.len(),
        }
    }

    /// Returns true if the frame is malformed in any way the trace can show.
    pub fn is_malformed(&self) -> bool {
        self.id_exceeds_format() || self.dlc_mismatch()
    }
}
