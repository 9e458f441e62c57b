//! PWM and direction-line output driver behind the [`DriveHal`] seam.
//!
//! Each motor gets one PWM slice output for duty and two GPIOs for the
//! forward/reverse H-bridge inputs. Line polarity is applied here, at the
//! hardware boundary; the pipeline only ever commands logical states.

use drive_core::{DriveHal, DutyCurve, Motor, Polarity};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::watchdog::Watchdog;
use fixed::traits::ToFixed;

/// PWM clock divider. 125 MHz / 8 at the default period top of 500 puts
/// the PWM frequency around 31 kHz, above the audible range.
const PWM_DIVIDER: u8 = 8;

/// Active levels for every output line.
///
/// Defaults to active-high everywhere; flip individual lines to match
/// inverting H-bridge inputs or a sinking LED.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputPolarities {
    /// PWM outputs (both motors share one polarity).
    pub pwm: Polarity,
    pub forward_a: Polarity,
    pub reverse_a: Polarity,
    pub forward_b: Polarity,
    pub reverse_b: Polarity,
    pub led: Polarity,
}

/// One motor's output lines, as wired in `main`.
pub struct MotorLines {
    /// PWM slice output carrying the duty cycle.
    pub pwm: Pwm<'static>,
    /// Forward H-bridge input.
    pub forward: Output<'static>,
    /// Reverse H-bridge input.
    pub reverse: Output<'static>,
}

/// Build the PWM slice configuration for a duty curve.
///
/// The compare value starts at zero, so a freshly configured slice drives
/// the stopped state.
#[must_use]
pub fn pwm_config(curve: &DutyCurve, polarity: Polarity) -> PwmConfig {
    let mut config = PwmConfig::default();
    config.top = curve.period_top();
    config.compare_a = 0;
    config.divider = PWM_DIVIDER.to_fixed();
    config.invert_a = matches!(polarity, Polarity::ActiveLow);
    config
}

fn level(high: bool) -> Level {
    if high {
        Level::High
    } else {
        Level::Low
    }
}

/// A direction GPIO with its active level.
struct DirectionLine {
    pin: Output<'static>,
    polarity: Polarity,
}

impl DirectionLine {
    /// Wrap a pin and drive it to the inactive level.
    fn new(mut pin: Output<'static>, polarity: Polarity) -> Self {
        pin.set_level(level(polarity.line_level(false)));
        Self { pin, polarity }
    }

    fn drive(&mut self, active: bool) {
        self.pin.set_level(level(self.polarity.line_level(active)));
    }
}

/// RP2040 implementation of [`DriveHal`].
///
/// Owns both PWM slices, the four direction lines, the status LED and the
/// watchdog. Duty updates rewrite the slice compare value only; period
/// and divider are fixed at construction from the duty curve.
pub struct HbridgeDrive {
    pwm_a: Pwm<'static>,
    pwm_b: Pwm<'static>,
    config_a: PwmConfig,
    config_b: PwmConfig,
    forward_a: DirectionLine,
    reverse_a: DirectionLine,
    forward_b: DirectionLine,
    reverse_b: DirectionLine,
    led: Output<'static>,
    watchdog: Watchdog,
}

impl HbridgeDrive {
    /// Take ownership of all output hardware, driving every line to its
    /// inactive level.
    ///
    /// The PWM slices are expected to be configured with
    /// [`pwm_config`] for the same `curve` and `polarities`.
    pub fn new(
        motor_a: MotorLines,
        motor_b: MotorLines,
        mut led: Output<'static>,
        watchdog: Watchdog,
        curve: &DutyCurve,
        polarities: OutputPolarities,
    ) -> Self {
        led.set_level(level(polarities.led.line_level(false)));
        Self {
            pwm_a: motor_a.pwm,
            pwm_b: motor_b.pwm,
            config_a: pwm_config(curve, polarities.pwm),
            config_b: pwm_config(curve, polarities.pwm),
            forward_a: DirectionLine::new(motor_a.forward, polarities.forward_a),
            reverse_a: DirectionLine::new(motor_a.reverse, polarities.reverse_a),
            forward_b: DirectionLine::new(motor_b.forward, polarities.forward_b),
            reverse_b: DirectionLine::new(motor_b.reverse, polarities.reverse_b),
            led,
            watchdog,
        }
    }
}

impl DriveHal for HbridgeDrive {
    fn set_duty(&mut self, motor: Motor, duty: u16) {
        match motor {
            Motor::A => {
                self.config_a.compare_a = duty;
                self.pwm_a.set_config(&self.config_a);
            }
            Motor::B => {
                self.config_b.compare_a = duty;
                self.pwm_b.set_config(&self.config_b);
            }
        }
    }

    fn set_direction(&mut self, motor: Motor, forward: bool, reverse: bool) {
        match motor {
            Motor::A => {
                self.forward_a.drive(forward);
                self.reverse_a.drive(reverse);
            }
            Motor::B => {
                self.forward_b.drive(forward);
                self.reverse_b.drive(reverse);
            }
        }
    }

    fn watchdog_reset(&mut self) {
        self.watchdog.feed();
    }

    fn status_led_toggle(&mut self) {
        self.led.toggle();
    }
}
