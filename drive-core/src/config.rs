//! Compile-time tunables as an explicit configuration struct.
//!
//! Everything that was a build flag in earlier firmware revisions lives
//! here as plain data, so behavior stays unit-testable without rebuilding.
//! Firmware selects a configuration once at startup.

use crate::mixer::MixMode;

/// Drive pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveConfig {
    /// How the two channel commands combine into motor commands.
    pub mix_mode: MixMode,
    /// Minimum non-zero PWM duty cycle, percent of the usable range.
    pub min_duty_pct: u8,
    /// Maximum PWM duty cycle, percent. Must be greater than
    /// `min_duty_pct`; values below 100 leave headroom in the PWM period.
    pub max_duty_pct: u8,
    /// Right-shift applied to captured edge deltas to normalize the
    /// timestamp clock to microseconds (0 for a 1 MHz source, 1 for 2 MHz).
    pub capture_shift: u8,
    /// iBUS slot (1..=14) feeding channel 1.
    pub ibus_slot_ch1: u8,
    /// iBUS slot (1..=14) feeding channel 2.
    pub ibus_slot_ch2: u8,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            mix_mode: MixMode::Differential,
            min_duty_pct: 10,
            max_duty_pct: 100,
            capture_shift: 0,
            ibus_slot_ch1: 3,
            ibus_slot_ch2: 4,
        }
    }
}
