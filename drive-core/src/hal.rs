//! Hardware seam between the pipeline and the chip.
//!
//! Core logic only ever talks to [`DriveHal`]; everything register-level
//! (PWM compare units, direction GPIOs, the watchdog peripheral) lives
//! behind it. This keeps the whole pipeline runnable on host with a mock.

use crate::output::Motor;

/// Active level of an output line.
///
/// Polarity is applied at the hardware boundary; pipeline logic always
/// reasons in terms of "active", never in wire levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Translate a logical "active" state into the wire level.
    #[inline]
    #[must_use]
    pub const fn line_level(self, active: bool) -> bool {
        match self {
            Polarity::ActiveHigh => active,
            Polarity::ActiveLow => !active,
        }
    }
}

/// Output surface the update cycle commits to.
///
/// All operations are single register writes on real hardware, so the
/// trait is infallible; range checking happens before commit in the duty
/// curve. The update cycle calls `set_duty` and `set_direction` for both
/// motors and then `watchdog_reset`, all within one triggering event.
pub trait DriveHal {
    /// Set the PWM compare value for one motor.
    fn set_duty(&mut self, motor: Motor, duty: u16);

    /// Drive one motor's forward/reverse lines.
    fn set_direction(&mut self, motor: Motor, forward: bool, reverse: bool);

    /// Feed the watchdog; called once per completed update cycle.
    fn watchdog_reset(&mut self);

    /// Toggle the status LED.
    fn status_led_toggle(&mut self);
}
