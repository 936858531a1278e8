//! Bump switch patterns and interrupt vector decoding.
//!
//! The six chassis bump switches share one input port but do not occupy
//! contiguous line positions. The interrupt controller reports the
//! highest-priority pending line as `2 * (position + 1)`; the maneuver
//! table is keyed on the logical switch decoded from that value, not on
//! the raw port mask.

pub const NUM_SWITCHES: usize = 6;

/// Hardware line positions of the six switches within the input port,
/// nose-left to nose-right.
const LINE_POSITIONS: [u8; NUM_SWITCHES] = [0, 2, 3, 5, 6, 7];

/// Logical bump switch id, nose-left (`B0`) to nose-right (`B5`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BumpSwitch {
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
}

impl BumpSwitch {
    pub const ALL: [BumpSwitch; NUM_SWITCHES] = [
        BumpSwitch::B0,
        BumpSwitch::B1,
        BumpSwitch::B2,
        BumpSwitch::B3,
        BumpSwitch::B4,
        BumpSwitch::B5,
    ];

    pub fn from_index(ind: usize) -> Option<BumpSwitch> {
        Self::ALL.get(ind).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    fn line_position(self) -> u8 {
        LINE_POSITIONS[self.index()]
    }
}

/// Instantaneous positive-logic state of the six switches (bit set =
/// pressed). Bits follow logical switch order, not line position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchPattern(u8);

impl SwitchPattern {
    pub const EMPTY: SwitchPattern = SwitchPattern(0);

    const MASK: u8 = (1 << NUM_SWITCHES) - 1;

    /// Builds a pattern from raw line levels. The lines are active low,
    /// so a low level reads as pressed.
    pub fn from_levels(levels: [bool; NUM_SWITCHES]) -> SwitchPattern {
        let mut bits = 0;
        for (ind, &level) in levels.iter().enumerate() {
            if !level {
                bits |= 1 << ind;
            }
        }
        SwitchPattern(bits)
    }

    pub fn from_bits(bits: u8) -> SwitchPattern {
        SwitchPattern(bits & Self::MASK)
    }

    pub fn single(switch: BumpSwitch) -> SwitchPattern {
        SwitchPattern(1 << switch.index())
    }

    pub fn contains(self, switch: BumpSwitch) -> bool {
        self.0 & (1 << switch.index()) != 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

/// The interrupt controller's "highest-priority pending source" value:
/// `2 * (position + 1)` for line `position`, zero when idle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchVector(pub u8);

impl SwitchVector {
    pub const IDLE: SwitchVector = SwitchVector(0);

    pub fn for_switch(switch: BumpSwitch) -> SwitchVector {
        SwitchVector((switch.line_position() + 1) * 2)
    }

    /// Maps the vector value back to a logical switch. Idle and codes for
    /// unused line positions decode to `None`.
    pub fn decode(self) -> Option<BumpSwitch> {
        if self.0 == 0 || self.0 % 2 != 0 {
            return None;
        }
        let position = self.0 / 2 - 1;
        LINE_POSITIONS
            .iter()
            .position(|&p| p == position)
            .and_then(BumpSwitch::from_index)
    }
}

/// One sensed collision: which switch the edge latch reported (if any)
/// and the raw pattern sampled at that instant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BumpEvent {
    pub switch: Option<BumpSwitch>,
    pub pattern: SwitchPattern,
}

impl BumpEvent {
    pub fn new(switch: Option<BumpSwitch>, pattern: SwitchPattern) -> BumpEvent {
        BumpEvent { switch, pattern }
    }

    pub fn single(switch: BumpSwitch) -> BumpEvent {
        BumpEvent {
            switch: Some(switch),
            pattern: SwitchPattern::single(switch),
        }
    }

    pub fn idle() -> BumpEvent {
        BumpEvent {
            switch: None,
            pattern: SwitchPattern::EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_codes_follow_line_positions() {
        let codes = [0x02, 0x06, 0x08, 0x0C, 0x0E, 0x10];
        for (switch, &code) in BumpSwitch::ALL.iter().zip(codes.iter()) {
            assert_eq!(SwitchVector::for_switch(*switch).0, code);
            assert_eq!(SwitchVector(code).decode(), Some(*switch));
        }
    }

    #[test]
    fn unknown_vector_codes_decode_to_none() {
        // idle, odd, unused line positions, out of range
        for code in [0x00, 0x03, 0x04, 0x0A, 0x12, 0xFF] {
            assert_eq!(SwitchVector(code).decode(), None);
        }
    }

    #[test]
    fn pattern_inverts_active_low_levels() {
        // B1 and B4 lines low (pressed), everything else released
        let pattern = SwitchPattern::from_levels([true, false, true, true, false, true]);
        assert_eq!(pattern.count(), 2);
        assert!(pattern.contains(BumpSwitch::B1));
        assert!(pattern.contains(BumpSwitch::B4));
        assert!(!pattern.contains(BumpSwitch::B0));

        let all_released = SwitchPattern::from_levels([true; NUM_SWITCHES]);
        assert!(all_released.is_empty());
    }

    #[test]
    fn single_pattern_holds_one_bit() {
        for switch in BumpSwitch::ALL {
            let pattern = SwitchPattern::single(switch);
            assert_eq!(pattern.count(), 1);
            assert!(pattern.contains(switch));
        }
    }

    #[test]
    fn from_bits_masks_dont_care_bits() {
        // physically the port carries two always-set don't-care bits
        assert_eq!(SwitchPattern::from_bits(0xFF).bits(), 0x3F);
    }
}
