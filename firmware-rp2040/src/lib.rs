//! Dual-motor RC vehicle firmware for RP2040.
//!
//! Drives a two-motor differential (or independent) vehicle from either of
//! two exclusive RC input sources:
//!
//! 1. Direct pulse-width capture, one GPIO per receiver channel
//! 2. A FlySky iBUS serial stream on UART0 (115200 baud, 8N1)
//!
//! The first validated iBUS frame permanently takes over from pulse
//! capture for the rest of the run. All decoding, mixing and output logic
//! lives in the chip-agnostic [`drive_core`] crate; this crate wires it to
//! the RP2040 peripherals.
//!
//! # Hardware Configuration
//!
//! | Function   | GPIO | Description                          |
//! |------------|------|--------------------------------------|
//! | UART0 TX   | 0    | Serial transmit (unused)             |
//! | UART0 RX   | 1    | iBUS receiver input                  |
//! | Capture 1  | 2    | RC channel 1 pulse input (pull-up)   |
//! | Capture 2  | 3    | RC channel 2 pulse input (pull-up)   |
//! | PWM A      | 4    | Motor A duty (PWM slice 2, output A) |
//! | PWM B      | 6    | Motor B duty (PWM slice 3, output A) |
//! | Forward A  | 10   | Motor A forward line                 |
//! | Reverse A  | 11   | Motor A reverse line                 |
//! | Forward B  | 12   | Motor B forward line                 |
//! | Reverse B  | 13   | Motor B reverse line                 |
//! | LED        | 25   | On-board LED (armed-channel pattern) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime. The shared
//! [`DrivePipeline`](drive_core::DrivePipeline) lives in a
//! critical-section mutex ([`SharedPipeline`]); each task delivers its
//! event under the lock, so every update cycle runs atomically and
//! diagnostic snapshots are always consistent:
//!
//! - **iBUS Task**: reads UART0 one byte at a time into the decoder
//! - **Pulse Tasks** (x2): await alternating GPIO edges, timestamped in
//!   microseconds; each exits once the serial source takes over
//! - **Tick Task**: 250 ms cadence for the status LED pattern
//! - **Diagnostics Task** (`diagnostics` builds): periodic snapshot dump
//!
//! # Fail-safe
//!
//! The hardware watchdog runs with a 250 ms window and is fed only when a
//! full update cycle commits. Loss of all input events resets the chip
//! into the stopped state (duty 0, direction lines inactive). With no
//! receiver attached the firmware therefore resets about four times a
//! second; that is the intended fail-safe posture, not a fault. Use the
//! `diagnostics` feature on the bench, which leaves the watchdog disabled
//! so the target can be halted under a probe.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`diagnostics`**: Periodic state dump over defmt, watchdog disabled
//! - **`independent-mix`**: Each channel drives its motor directly

#![no_std]

// The panic strategies define conflicting panic handlers
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - pick one panic handler");

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

// Re-export core types for convenience
pub use drive_core::{
    ActiveSource, ChannelInput, DriveConfig, DriveHal, DrivePipeline, DriveSnapshot, DutyCurve,
    IbusError, MixMode, Motor, MotorOutput, Polarity, RcChannel,
};

pub mod hbridge;

pub use hbridge::{pwm_config, HbridgeDrive, MotorLines, OutputPolarities};

/// The shared pipeline, locked for the duration of each event.
///
/// Every task mutates the pipeline through this mutex, which gives the
/// single-core interrupt-mask atomicity the update cycle relies on.
pub type SharedPipeline = Mutex<CriticalSectionRawMutex, RefCell<DrivePipeline<HbridgeDrive>>>;
