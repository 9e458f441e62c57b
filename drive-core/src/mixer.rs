//! Channel-to-motor mixing.

/// How the two channel commands combine into two motor commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MixMode {
    /// Channel 1 is throttle, channel 2 is steering:
    /// motor A gets `ch1 + ch2`, motor B gets `ch1 - ch2`.
    #[default]
    Differential,
    /// Each channel drives its motor directly.
    Independent,
}

/// Mix the two normalized channel commands into motor A and B commands.
///
/// No saturation is applied here; the duty curve clamps. Validated
/// commands stay within about ±700, so the differential sums cannot
/// overflow.
#[inline]
#[must_use]
pub fn mix(mode: MixMode, ch1: i16, ch2: i16) -> (i16, i16) {
    match mode {
        MixMode::Differential => (ch1 + ch2, ch1 - ch2),
        MixMode::Independent => (ch1, ch2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differential_mix() {
        assert_eq!(mix(MixMode::Differential, 200, -50), (150, 250));
        assert_eq!(mix(MixMode::Differential, 0, 0), (0, 0));
        assert_eq!(mix(MixMode::Differential, 700, 700), (1400, 0));
    }

    #[test]
    fn test_independent_mix_passes_through() {
        assert_eq!(mix(MixMode::Independent, 200, -50), (200, -50));
    }

    #[test]
    fn test_default_mode_is_differential() {
        assert_eq!(MixMode::default(), MixMode::Differential);
    }
}
