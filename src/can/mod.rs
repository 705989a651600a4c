//! CAN frame types consumed by the trace logger.
//!
//! Frames arrive already decoded from the transport. This module only
//! describes them; it never talks to CAN hardware. With the `can` feature,
//! any [`embedded-can`](https://crates.io/crates/embedded-can) frame can be
//! converted with [`CanFrame::from_embedded`].

mod fd;
mod frame;

pub use fd::{FdFlags, MAX_CLASSIC_DATA_LEN, MAX_FD_DATA_LEN, dlc_to_len, len_to_dlc};
pub use frame::{CanFrame, EXTENDED_ID_MAX, STANDARD_ID_MAX};
