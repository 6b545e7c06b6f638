use embedded_hal::digital::v2::InputPin;

use crate::drivers::bar_graph::DisplayWidth;
use crate::drivers::cylon::CylonWidth;

/// Board operating mode, picked by the two pulled-up mode inputs.
///
/// | A    | B    | mode       |
/// |------|------|------------|
/// | high | low  | `BarGraph` |
/// | high | high | `Cylon`    |
/// | low  | -    | `Split`    |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// 8-bit bar graph on the whole port, cylon paused
    BarGraph,
    /// 8-bit cylon on the whole port, bar graph paused
    Cylon,
    /// 4-bit bar graph on the low nibble, 4-bit cylon on the high nibble
    Split,
}

impl Mode {
    /// Bar-graph width in this mode, `None` when the bar graph is idle
    pub fn display_width(self) -> Option<DisplayWidth> {
        match self {
            Mode::BarGraph => Some(DisplayWidth::EightBit),
            Mode::Cylon => None,
            Mode::Split => Some(DisplayWidth::FourBit),
        }
    }

    /// Cylon width in this mode, `None` when the cylon is idle
    pub fn cylon_width(self) -> Option<CylonWidth> {
        match self {
            Mode::BarGraph => None,
            Mode::Cylon => Some(CylonWidth::EightBit),
            Mode::Split => Some(CylonWidth::FourBit),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::BarGraph => "bar-graph",
            Mode::Cylon => "cylon",
            Mode::Split => "split",
        }
    }
}

/// Reads the mode inputs. Both pins idle high through their pull-ups.
pub struct ModeSelector<A, B> {
    pin_a: A,
    pin_b: B,
}

impl<A, B, E> ModeSelector<A, B>
where
    A: InputPin<Error = E>,
    B: InputPin<Error = E>,
{
    pub fn new(pin_a: A, pin_b: B) -> Self {
        Self { pin_a, pin_b }
    }

    /// Sample the inputs. Pin B is only read while pin A is high.
    pub fn read(&self) -> Result<Mode, E> {
        if self.pin_a.is_low()? {
            return Ok(Mode::Split);
        }

        if self.pin_b.is_high()? {
            Ok(Mode::Cylon)
        } else {
            Ok(Mode::BarGraph)
        }
    }

    pub fn release(self) -> (A, B) {
        (self.pin_a, self.pin_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

    fn selector(a: &[PinTransaction], b: &[PinTransaction]) -> ModeSelector<PinMock, PinMock> {
        ModeSelector::new(PinMock::new(a), PinMock::new(b))
    }

    fn finish(selector: ModeSelector<PinMock, PinMock>) {
        let (mut a, mut b) = selector.release();
        a.done();
        b.done();
    }

    #[test]
    fn a_high_b_low_is_bar_graph() {
        let s = selector(
            &[PinTransaction::get(PinState::High)],
            &[PinTransaction::get(PinState::Low)],
        );
        assert_eq!(s.read().unwrap(), Mode::BarGraph);
        finish(s);
    }

    #[test]
    fn both_high_is_cylon() {
        let s = selector(
            &[PinTransaction::get(PinState::High)],
            &[PinTransaction::get(PinState::High)],
        );
        assert_eq!(s.read().unwrap(), Mode::Cylon);
        finish(s);
    }

    #[test]
    fn a_low_is_split_without_reading_b() {
        let s = selector(&[PinTransaction::get(PinState::Low)], &[]);
        assert_eq!(s.read().unwrap(), Mode::Split);
        finish(s);
    }

    #[test]
    fn widths_per_mode() {
        assert_eq!(Mode::BarGraph.display_width(), Some(DisplayWidth::EightBit));
        assert_eq!(Mode::BarGraph.cylon_width(), None);
        assert_eq!(Mode::Cylon.display_width(), None);
        assert_eq!(Mode::Cylon.cylon_width(), Some(CylonWidth::EightBit));
        assert_eq!(Mode::Split.display_width(), Some(DisplayWidth::FourBit));
        assert_eq!(Mode::Split.cylon_width(), Some(CylonWidth::FourBit));
    }

    #[test]
    fn owned_bits_never_overlap() {
        for mode in [Mode::BarGraph, Mode::Cylon, Mode::Split] {
            let display = mode.display_width().map_or(0, DisplayWidth::mask);
            let cylon = mode.cylon_width().map_or(0, CylonWidth::mask);
            assert_eq!(display & cylon, 0, "{:?}", mode);
        }
    }
}
