//! FlySky iBUS servo frame decoding.
//!
//! This crate provides a chip-agnostic decoder for the iBUS servo stream
//! emitted by FlySky/Turnigy receivers. It is designed to be fed one byte
//! at a time from any UART implementation.
//!
//! # Wire Format
//!
//! Each frame is 32 bytes on the wire:
//!
//! ```text
//! 0x20 0x40 <ch1 lo> <ch1 hi> ... <ch14 lo> <ch14 hi> <sum lo> <sum hi>
//! ```
//!
//! - `0x20 0x40` - frame sync marker; may appear anywhere in the stream and
//!   unconditionally restarts frame assembly (self-resynchronizing)
//! - 14 channel slots as little-endian 16-bit values, nominally servo pulse
//!   widths in microseconds (~1000-2000, center 1500)
//! - trailing little-endian 16-bit checksum equal to `0xFFFF` minus the sum
//!   of every preceding frame byte (sync marker included)
//!
//! Channel values are staged while a frame is being assembled and only
//! published once the checksum validates; a corrupted frame publishes
//! nothing.
//!
//! # Example
//!
//! ```ignore
//! use ibus_proto::IbusDecoder;
//!
//! let mut decoder = IbusDecoder::new();
//!
//! // Feed bytes from UART
//! for byte in uart_bytes {
//!     match decoder.push_byte(byte) {
//!         Ok(Some(frame)) => {
//!             // Slots use the legacy 1-based wire indexing
//!             let steering = frame.channel(1);
//!         }
//!         Ok(None) => {}            // mid-frame, keep feeding
//!         Err(_) => {}              // checksum mismatch, frame dropped
//!     }
//! }
//! ```
//!
//! # UART Configuration
//!
//! iBUS runs at 115200 baud, 8N1. Receivers emit one frame every 7 ms.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod decoder;
pub mod frame;

// Re-export main types at crate root
pub use decoder::{
    IbusDecoder, IbusError, CHANNEL_COUNT, CHECKSUM_SEED, FRAME_LENGTH, SYNC_FIRST, SYNC_SECOND,
};
pub use frame::IbusFrame;

/// iBUS serial baud rate.
pub const IBUS_BAUDRATE: u32 = 115_200;
