//! Per-channel input state and the arming/fail-safe gate.
//!
//! Both decoders (pulse capture and iBUS) deliver pulse widths in
//! microseconds and feed them through the same two-stage gate:
//!
//! 1. Widths outside the absolute valid range mean "no valid signal":
//!    the command is forced to neutral and the channel disarms.
//! 2. While unarmed, only widths inside the neutral band are accepted.
//!    The first neutral pulse arms the channel; anything else is rejected.
//!
//! The gate guarantees the vehicle cannot move on a garbled first signal
//! and cannot silently resume motion after a dropout without the stick
//! passing through neutral.

/// Shortest accepted pulse width in microseconds.
pub const PULSE_MIN_US: u16 = 800;

/// Longest accepted pulse width in microseconds.
pub const PULSE_MAX_US: u16 = 2200;

/// Lower edge of the neutral deadband.
pub const NEUTRAL_LOW_US: u16 = 1450;

/// Upper edge of the neutral deadband.
pub const NEUTRAL_HIGH_US: u16 = 1550;

/// Neutral center; commands are widths relative to this.
pub const NEUTRAL_US: u16 = 1500;

/// Logical RC input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RcChannel {
    Ch1,
    Ch2,
}

impl RcChannel {
    /// Zero-based index for channel arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            RcChannel::Ch1 => 0,
            RcChannel::Ch2 => 1,
        }
    }
}

/// Validate a pulse width against a channel's armed state.
///
/// Returns the normalized command (width above neutral, 0 if the pulse was
/// not accepted) and the new armed state.
#[inline]
#[must_use]
pub fn validate_pulse(width: u16, armed: bool) -> (i16, bool) {
    if width < PULSE_MIN_US || width > PULSE_MAX_US {
        // Invalid signal
        return (0, false);
    }
    if !armed && (width < NEUTRAL_LOW_US || width > NEUTRAL_HIGH_US) {
        // Neutral required before control resumes
        return (0, false);
    }
    (width as i16 - NEUTRAL_US as i16, true)
}

/// State of one logical RC channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelInput {
    /// Last accepted pulse width in microseconds, 0 while unarmed.
    pub raw: u16,
    /// Normalized command in microseconds above neutral (about -700..=700).
    pub value: i16,
    /// True once a neutral pulse has been seen since the last invalidation.
    pub armed: bool,
}

impl ChannelInput {
    /// A channel that has never seen a valid pulse.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: 0,
            value: 0,
            armed: false,
        }
    }

    /// Run a measured pulse width through the gate and update the channel.
    pub fn apply_pulse(&mut self, width: u16) {
        let (value, armed) = validate_pulse(width, self.armed);
        self.value = value;
        self.armed = armed;
        self.raw = if armed { width } else { 0 };
    }
}
