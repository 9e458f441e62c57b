//! Signed motor commands to PWM duty and direction flags.
//!
//! Commands within the deadband stop the motor. Past the deadband, duty
//! rises one count per microsecond of command from the configured minimum
//! non-zero duty, clamping at the configured maximum. The duty-per-percent
//! scale makes the usable segment span exactly [`DUTY_SPAN`] counts, so the
//! clamp point is continuous with the linear segment.

/// Motor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    A,
    B,
}

/// Commands with magnitude at or below this produce no motion.
pub const OUTPUT_DEADBAND: i16 = 50;

/// Commands with magnitude above this clamp to the maximum duty.
pub const FULL_SCALE: i16 = 500;

/// Duty counts covered by the linear segment of the curve.
pub const DUTY_SPAN: u16 = (FULL_SCALE - OUTPUT_DEADBAND) as u16;

/// One motor's committed output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorOutput {
    /// PWM compare value; 0 is off.
    pub duty: u16,
    /// Forward line active.
    pub forward: bool,
    /// Reverse line active. Never set together with `forward`.
    pub reverse: bool,
}

impl MotorOutput {
    /// The reset state: no duty, both direction lines inactive.
    pub const STOPPED: Self = Self {
        duty: 0,
        forward: false,
        reverse: false,
    };
}

/// Precomputed duty curve for a PWM period.
///
/// Configured from duty-cycle percentages: `min_pct` is the smallest
/// non-zero duty worth commanding (below which the motor just whines) and
/// `max_pct` the largest, as a fraction of the PWM period. The period top
/// is scaled so that `max_pct` of it equals the maximum duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCurve {
    min_duty: u16,
    max_duty: u16,
    top: u16,
}

impl DutyCurve {
    /// Build a curve from duty percentages. `max_pct` must be greater than
    /// `min_pct` and at most 100.
    #[must_use]
    pub const fn from_percentages(min_pct: u8, max_pct: u8) -> Self {
        let span = (max_pct - min_pct) as u32;
        Self {
            min_duty: (DUTY_SPAN as u32 * min_pct as u32 / span) as u16,
            max_duty: (DUTY_SPAN as u32 * max_pct as u32 / span) as u16,
            top: (DUTY_SPAN as u32 * 100 / span) as u16,
        }
    }

    /// PWM period top count for this curve.
    #[must_use]
    pub const fn period_top(&self) -> u16 {
        self.top
    }

    /// Smallest non-zero duty the curve produces.
    #[must_use]
    pub const fn min_duty(&self) -> u16 {
        self.min_duty
    }

    /// Largest duty the curve produces.
    #[must_use]
    pub const fn max_duty(&self) -> u16 {
        self.max_duty
    }

    /// Map a signed command to duty magnitude and direction flags.
    #[must_use]
    pub fn apply(&self, command: i16) -> MotorOutput {
        let forward = command > OUTPUT_DEADBAND;
        let reverse = command < -OUTPUT_DEADBAND;
        let magnitude = command.unsigned_abs();
        let duty = if magnitude <= OUTPUT_DEADBAND as u16 {
            0
        } else if magnitude > FULL_SCALE as u16 {
            self.max_duty
        } else {
            self.min_duty + (magnitude - OUTPUT_DEADBAND as u16 - 1)
        };
        MotorOutput {
            duty,
            forward,
            reverse,
        }
    }
}

impl Default for DutyCurve {
    fn default() -> Self {
        Self::from_percentages(10, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve_constants() {
        let curve = DutyCurve::default();
        assert_eq!(curve.min_duty(), 50);
        assert_eq!(curve.max_duty(), 500);
        assert_eq!(curve.period_top(), 500);
    }

    #[test]
    fn test_deadband_stops_motor() {
        let curve = DutyCurve::default();
        for command in [0, 25, 50, -25, -50] {
            assert_eq!(curve.apply(command), MotorOutput::STOPPED);
        }
    }

    #[test]
    fn test_first_count_past_deadband_gives_min_duty() {
        let curve = DutyCurve::default();
        let out = curve.apply(51);
        assert_eq!(out.duty, curve.min_duty());
        assert!(out.forward);
        assert!(!out.reverse);
    }

    #[test]
    fn test_reverse_clamps_at_max_duty() {
        let curve = DutyCurve::default();
        let out = curve.apply(-600);
        assert_eq!(out.duty, curve.max_duty());
        assert!(out.reverse);
        assert!(!out.forward);
    }

    #[test]
    fn test_linear_segment_meets_clamp() {
        let curve = DutyCurve::default();
        assert_eq!(curve.apply(500).duty, curve.max_duty() - 1);
        assert_eq!(curve.apply(501).duty, curve.max_duty());
        assert_eq!(curve.apply(i16::MAX).duty, curve.max_duty());
        assert_eq!(curve.apply(i16::MIN).duty, curve.max_duty());
    }

    #[test]
    fn test_duty_is_symmetric_in_command() {
        let curve = DutyCurve::default();
        for magnitude in [60, 150, 300, 499] {
            assert_eq!(curve.apply(magnitude).duty, curve.apply(-magnitude).duty);
        }
    }

    #[test]
    fn test_restricted_percentages_leave_period_headroom() {
        // 10..80% band: max duty sits at 80% of the period top
        let curve = DutyCurve::from_percentages(10, 80);
        assert_eq!(curve.max_duty(), curve.min_duty() + DUTY_SPAN);
        assert_eq!(
            curve.max_duty() as u32 * 100 / curve.period_top() as u32,
            80
        );
    }
}
