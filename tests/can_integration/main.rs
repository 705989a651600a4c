//! CAN integration test module
//!
//! End-to-end tests from driver-side frames to ASC text:
//! - `embedded_frames`: frames produced through the `embedded_can::Frame` trait
//!   (feature `can`)
//! - `replay_integration`: recorded JSON-lines captures replayed into a trace
//!   file (feature `serde`)

#[cfg(feature = "can")]
mod embedded_frames;
#[cfg(feature = "serde")]
mod replay_integration;

#[cfg(feature = "can")]
use embedded_can::{ExtendedId, Frame, Id, StandardId};

/// A simple CAN frame implementation for testing
#[cfg(feature = "can")]
#[derive(Debug, Clone)]
pub struct MockCanFrame {
    id: Id,
    data: [u8; 8],
    dlc: usize,
    remote: bool,
}

#[cfg(feature = "can")]
impl MockCanFrame {
    pub fn new_standard(id: u16, data: &[u8]) -> Self {
        Frame::new(StandardId::new(id).unwrap(), data).unwrap()
    }

    pub fn new_extended(id: u32, data: &[u8]) -> Self {
        Frame::new(ExtendedId::new(id).unwrap(), data).unwrap()
    }
}

#[cfg(feature = "can")]
impl Frame for MockCanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        let mut frame_data = [0u8; 8];
        frame_data[..data.len()].copy_from_slice(data);
        Some(Self {
            id: id.into(),
            data: frame_data,
            dlc: data.len(),
            remote: false,
        })
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }
        Some(Self {
            id: id.into(),
            data: [0u8; 8],
            dlc,
            remote: true,
        })
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    fn data(&self) -> &[u8] {
        if self.remote {
            &[]
        } else {
            &self.data[..self.dlc]
        }
    }
}
