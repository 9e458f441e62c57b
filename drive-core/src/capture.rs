//! Pulse width measurement from alternating edge timestamps.

/// Pairs rising and falling edge timestamps into pulse widths.
///
/// The state machine alternates edge polarity the way a capture unit
/// toggles its edge-select bit: the first edge records the rise time, the
/// second yields the width. Timestamps are free-running 16-bit ticks;
/// the subtraction is wrap-safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseCapture {
    rise: u16,
    awaiting_fall: bool,
}

impl PulseCapture {
    /// New capture unit waiting for a rising edge.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rise: 0,
            awaiting_fall: false,
        }
    }

    /// Record an edge timestamp.
    ///
    /// Returns the measured pulse width in timer ticks when the edge
    /// completes a rise/fall pair, `None` on the rising edge.
    pub fn edge(&mut self, timestamp: u16) -> Option<u16> {
        if self.awaiting_fall {
            self.awaiting_fall = false;
            Some(timestamp.wrapping_sub(self.rise))
        } else {
            self.rise = timestamp;
            self.awaiting_fall = true;
            None
        }
    }

    /// True after a rising edge, while the falling edge is pending.
    #[must_use]
    pub const fn awaiting_fall(&self) -> bool {
        self.awaiting_fall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rise_then_fall_yields_width() {
        let mut capture = PulseCapture::new();
        assert_eq!(capture.edge(1000), None);
        assert!(capture.awaiting_fall());
        assert_eq!(capture.edge(2500), Some(1500));
        assert!(!capture.awaiting_fall());
    }

    #[test]
    fn test_width_survives_timer_wraparound() {
        let mut capture = PulseCapture::new();
        assert_eq!(capture.edge(u16::MAX - 99), None);
        assert_eq!(capture.edge(1400), Some(1500));
    }

    #[test]
    fn test_alternation_continues_across_pulses() {
        let mut capture = PulseCapture::new();
        capture.edge(0);
        assert_eq!(capture.edge(1500), Some(1500));
        capture.edge(20_000);
        assert_eq!(capture.edge(21_800), Some(1800));
    }
}
