//! Platform-agnostic core of a dual-motor RC vehicle.
//!
//! This crate turns radio-control input into motor commands without any
//! chip-specific dependencies. It can be used both in embedded `no_std`
//! environments and on host for testing.
//!
//! # Overview
//!
//! Two exclusive input sources feed the same channel state:
//!
//! - per-channel pulse capture from an RC receiver (edge timestamps), or
//! - a FlySky iBUS serial stream carrying all channels in one frame.
//!
//! The first validated iBUS frame permanently takes over from pulse capture
//! for the rest of the run. Every completed measurement runs one full
//! update cycle: validate, mix, commit duty and direction to the hardware,
//! reset the watchdog. The cycle runs to completion inside the event that
//! triggered it, so outputs are never observable half-updated.
//!
//! The crate is organized into several modules:
//!
//! - [`channel`]: per-channel state and the arming/fail-safe gate
//! - [`capture`]: rise/fall edge pairing into pulse widths
//! - [`mixer`]: differential or independent motor mixing
//! - [`output`]: signed command to duty magnitude and direction flags
//! - [`hal`]: the hardware seam ([`DriveHal`]) core logic drives
//! - [`pipeline`]: event dispatch and the update cycle ([`DrivePipeline`])
//! - [`config`]: compile-time tunables as a plain struct ([`DriveConfig`])
//! - [`telemetry`]: consistent diagnostic snapshots ([`DriveSnapshot`])
//!
//! # Fail-safe model
//!
//! A channel only arms after a pulse inside the neutral band, so a garbled
//! signal at power-up cannot command motion, and after a dropout the stick
//! must pass through neutral before control resumes. Out-of-range pulses
//! force the command to neutral and disarm. If no update cycle completes
//! within the watchdog window the hardware resets into the stopped state.
//!
//! # Example
//!
//! ```
//! use drive_core::{DriveConfig, DriveHal, DrivePipeline, Motor, RcChannel};
//!
//! struct NullHal;
//! impl DriveHal for NullHal {
//!     fn set_duty(&mut self, _: Motor, _: u16) {}
//!     fn set_direction(&mut self, _: Motor, _: bool, _: bool) {}
//!     fn watchdog_reset(&mut self) {}
//!     fn status_led_toggle(&mut self) {}
//! }
//!
//! let mut pipeline = DrivePipeline::new(NullHal, DriveConfig::default());
//! // Rising edge at t=0, falling edge 1500 us later: a neutral pulse
//! pipeline.on_edge(RcChannel::Ch1, 0);
//! pipeline.on_edge(RcChannel::Ch1, 1500);
//! assert!(pipeline.snapshot().channels[0].armed);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod capture;
pub mod channel;
pub mod config;
pub mod hal;
pub mod mixer;
pub mod output;
pub mod pipeline;
pub mod telemetry;

// Re-export main types at crate root
pub use capture::PulseCapture;
pub use channel::{
    validate_pulse, ChannelInput, RcChannel, NEUTRAL_HIGH_US, NEUTRAL_LOW_US, NEUTRAL_US,
    PULSE_MAX_US, PULSE_MIN_US,
};
pub use config::DriveConfig;
pub use hal::{DriveHal, Polarity};
pub use mixer::{mix, MixMode};
pub use output::{DutyCurve, Motor, MotorOutput, DUTY_SPAN, FULL_SCALE, OUTPUT_DEADBAND};
pub use pipeline::{ActiveSource, DrivePipeline};
pub use telemetry::DriveSnapshot;

// Re-export the serial decoder so firmware crates only depend on this one
pub use ibus_proto::{IbusDecoder, IbusError, IbusFrame};
