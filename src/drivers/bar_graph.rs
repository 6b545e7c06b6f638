use crate::config::{EIGHT_BIT_STEPS, FOUR_BIT_STEPS, LOW_NIBBLE};
use crate::drivers::led_port::OutputPort;

/// Number of segments used by the bar graph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayWidth {
    /// All eight port bits
    EightBit,
    /// Low nibble only, the high nibble belongs to the cylon
    FourBit,
}

impl DisplayWidth {
    /// Port bits written by the bar graph at this width
    #[inline]
    pub fn mask(self) -> u8 {
        match self {
            DisplayWidth::EightBit => 0xFF,
            DisplayWidth::FourBit => LOW_NIBBLE,
        }
    }

    fn steps(self) -> &'static [u16] {
        match self {
            DisplayWidth::EightBit => &EIGHT_BIT_STEPS,
            DisplayWidth::FourBit => &FOUR_BIT_STEPS,
        }
    }
}

/// Number of lit segments for `reading`.
///
/// Each step is an inclusive upper bound; the first step at or above the
/// reading decides the count. Readings above the last step light every
/// segment, so 896..=1022 in 8-bit mode share the seven-segment bucket
/// with no unhandled range.
pub fn segments(reading: u16, width: DisplayWidth) -> u8 {
    let steps = width.steps();
    steps
        .iter()
        .position(|&upper| reading <= upper)
        .unwrap_or(steps.len()) as u8
}

/// Thermometer pattern with `lit` consecutive low bits set
#[inline]
pub fn thermometer(lit: u8) -> u8 {
    if lit >= 8 {
        0xFF
    } else {
        (1u8 << lit) - 1
    }
}

/// Bar-graph pattern for `reading`, already confined to the width's mask
#[inline]
pub fn pattern(reading: u16, width: DisplayWidth) -> u8 {
    thermometer(segments(reading, width)) & width.mask()
}

/// Writes readings as a thermometer bar onto an output port
pub struct BarGraph;

impl BarGraph {
    /// Render `reading` into the bits owned at `width`, keeping the rest.
    pub fn render<P: OutputPort>(port: &mut P, reading: u16, width: DisplayWidth) {
        port.modify(width.mask(), pattern(reading, width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::led_port::MemoryPort;

    #[test]
    fn eight_bit_scenarios() {
        assert_eq!(pattern(100, DisplayWidth::EightBit), 0b0000_0000);
        assert_eq!(pattern(500, DisplayWidth::EightBit), 0b0000_0111);
        assert_eq!(pattern(1023, DisplayWidth::EightBit), 0b1111_1111);
    }

    #[test]
    fn eight_bit_bucket_edges() {
        let cases = [
            (128, 0),
            (129, 1),
            (256, 1),
            (257, 2),
            (384, 2),
            (385, 3),
            (512, 3),
            (513, 4),
            (639, 4),
            (640, 5),
            (767, 5),
            (768, 6),
            (895, 6),
            (896, 7),
            (1022, 7),
            (1023, 8),
        ];
        for (reading, lit) in cases {
            assert_eq!(segments(reading, DisplayWidth::EightBit), lit, "reading {}", reading);
        }
    }

    #[test]
    fn eight_bit_is_monotonic() {
        let mut previous = 0;
        for reading in 0..=1023u16 {
            let lit = pattern(reading, DisplayWidth::EightBit).count_ones();
            assert!(lit >= previous, "dropped at {}", reading);
            previous = lit;
        }
        assert_eq!(previous, 8);
    }

    #[test]
    fn upper_gap_is_folded_into_seven_segments() {
        for reading in 896..1023u16 {
            assert_eq!(pattern(reading, DisplayWidth::EightBit), 0b0111_1111);
        }
    }

    #[test]
    fn four_bit_bucket_edges() {
        let cases = [(0, 0), (256, 0), (257, 1), (512, 1), (513, 2), (767, 2), (768, 3), (1022, 3), (1023, 4)];
        for (reading, lit) in cases {
            assert_eq!(segments(reading, DisplayWidth::FourBit), lit, "reading {}", reading);
        }
    }

    #[test]
    fn four_bit_render_preserves_high_nibble() {
        let mut port = MemoryPort(0b1010_1111);
        BarGraph::render(&mut port, 600, DisplayWidth::FourBit);
        assert_eq!(port.0, 0b1010_0011);

        for reading in 0..=1023u16 {
            let mut port = MemoryPort(0b0100_0000);
            BarGraph::render(&mut port, reading, DisplayWidth::FourBit);
            assert_eq!(port.0 & 0xF0, 0b0100_0000);
            let lit = segments(reading, DisplayWidth::FourBit);
            assert_eq!(port.0 & 0x0F, thermometer(lit));
        }
    }

    #[test]
    fn eight_bit_render_owns_whole_port() {
        let mut port = MemoryPort(0b1000_0000);
        BarGraph::render(&mut port, 300, DisplayWidth::EightBit);
        assert_eq!(port.0, 0b0000_0011);
    }

    #[test]
    fn thermometer_limits() {
        assert_eq!(thermometer(0), 0);
        assert_eq!(thermometer(3), 0b111);
        assert_eq!(thermometer(8), 0xFF);
        assert_eq!(thermometer(12), 0xFF);
    }
}
