//! Validated iBUS frame contents.

use crate::decoder::CHANNEL_COUNT;

/// A complete, checksum-validated iBUS frame.
///
/// Slots keep the legacy 1-based wire indexing (1..=14). Values are
/// nominally servo pulse widths in microseconds; how they are interpreted
/// is up to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IbusFrame {
    slots: [u16; CHANNEL_COUNT],
}

impl IbusFrame {
    /// Create a frame from already-validated slot values.
    #[must_use]
    pub const fn new(slots: [u16; CHANNEL_COUNT]) -> Self {
        Self { slots }
    }

    /// Read a channel slot by its 1-based wire index.
    ///
    /// Returns `None` for slot 0 or slots beyond the 14-channel layout.
    #[must_use]
    pub fn channel(&self, slot: u8) -> Option<u16> {
        if slot == 0 {
            return None;
        }
        self.slots.get(usize::from(slot) - 1).copied()
    }

    /// All channel slots in wire order.
    #[must_use]
    pub const fn slots(&self) -> &[u16; CHANNEL_COUNT] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_indexing_is_one_based() {
        let mut slots = [1500; CHANNEL_COUNT];
        slots[0] = 1000;
        slots[13] = 2000;
        let frame = IbusFrame::new(slots);

        assert_eq!(frame.channel(1), Some(1000));
        assert_eq!(frame.channel(14), Some(2000));
    }

    #[test]
    fn test_out_of_range_slots_read_as_none() {
        let frame = IbusFrame::new([1500; CHANNEL_COUNT]);
        assert_eq!(frame.channel(0), None);
        assert_eq!(frame.channel(15), None);
        assert_eq!(frame.channel(u8::MAX), None);
    }
}
