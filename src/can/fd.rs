//! CAN FD payload lengths and per-frame flags.
//!
//! A CAN FD frame carries up to 64 bytes, but its 4-bit DLC only encodes
//! sixteen lengths. Codes 0 to 8 are the byte count itself. Codes 9 to 15
//! stand for 12, 16, 20, 24, 32, 48 and 64 bytes. A payload of any other
//! length cannot come off the wire, so the trace flags it as malformed.

/// Payload limit of a classic CAN frame.
pub const MAX_CLASSIC_DATA_LEN: usize = 8;

/// Payload limit of a CAN FD frame.
pub const MAX_FD_DATA_LEN: usize = 64;

/// Payload length encoded by a CAN FD DLC code.
///
/// Codes above 15 are treated as 15.
#[inline]
pub const fn dlc_to_len(dlc: u8) -> usize {
    match dlc {
        0..=8 => dlc as usize,
        9 => 12,
        10 => 16,
        11 => 20,
        12 => 24,
        13 => 32,
        14 => 48,
        _ => MAX_FD_DATA_LEN,
    }
}

/// Smallest CAN FD DLC code whose length holds `len` bytes.
///
/// This is the code printed in the `CANFD` line layout. Lengths past 64
/// give 15.
#[inline]
pub const fn len_to_dlc(len: usize) -> u8 {
    match len {
        0..=8 => len as u8,
        9..=12 => 9,
        13..=16 => 10,
        17..=20 => 11,
        21..=24 => 12,
        25..=32 => 13,
        33..=48 => 14,
        _ => 15,
    }
}

/// Bit of the transport's flags byte set when the bit rate was switched.
const FLAG_BRS: u8 = 0x01;
/// Bit of the transport's flags byte set when the sender was error passive.
const FLAG_ESI: u8 = 0x02;

/// BRS and ESI bits of a received CAN FD frame.
///
/// With the `serde` feature the flags travel as the transport's raw flags
/// byte, so recorded captures can store them as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u8", into = "u8")
)]
pub struct FdFlags {
    brs: bool,
    esi: bool,
}

impl FdFlags {
    /// Flags with the given BRS and ESI bits.
    #[inline]
    pub const fn new(brs: bool, esi: bool) -> Self {
        Self { brs, esi }
    }

    /// Decode the transport's flags byte. Unknown bits are ignored.
    #[inline]
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            brs: byte & FLAG_BRS != 0,
            esi: byte & FLAG_ESI != 0,
        }
    }

    /// Encode as the transport's flags byte.
    #[inline]
    pub const fn to_byte(self) -> u8 {
        let mut byte = 0;
        if self.brs {
            byte |= FLAG_BRS;
        }
        if self.esi {
            byte |= FLAG_ESI;
        }
        byte
    }

    /// The data phase ran at the faster bit rate.
    #[inline]
    pub const fn brs(&self) -> bool {
        self.brs
    }

    /// The sender was error passive.
    #[inline]
    pub const fn esi(&self) -> bool {
        self.esi
    }
}

impl From<u8> for FdFlags {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

impl From<FdFlags> for u8 {
    fn from(flags: FdFlags) -> Self {
        flags.to_byte()
    }
}
