//! EDID decoding for the device settings display stack.
//!
//! [`verify`] is the cheap pre-flight check over a raw buffer, [`parse`]
//! decodes it into an [`EdidData`]. Both are pure functions over the caller's
//! slice, so they can run concurrently on independent buffers.
//!
//! The [`Edid`]/[`EdidBuilder`] and [`cta::CtaExtensionBuilder`] types go the
//! other way, synthesizing EDID blocks.

pub mod cta;
pub mod descriptors;
mod edid;
mod edid_builder;
mod edid_data;
mod error;
pub mod manufacturer;
mod parse;
mod reader;
pub mod timings;
mod verify;

pub use edid::*;
pub use edid_builder::*;
pub use edid_data::*;
pub use error::*;
pub use parse::{parse, parse_into};
pub use reader::ReadError;
pub use verify::{block_sum, checksum_byte, verify, verify_block_checksum};

/// Size of the base block and of every extension block
pub const EDID_BLOCK_LEN: usize = 128;

/// Upper bound the HAL places on an EDID buffer
pub const MAX_EDID_BYTES_LEN: usize = 1024;

/// The EDID header sequence
pub const EDID_HEADER: [u8; 8] = [0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00];
