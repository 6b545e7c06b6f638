use crate::config::HIGH_NIBBLE;
use crate::drivers::led_port::OutputPort;

/// Span of port bits the eye travels over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CylonWidth {
    /// Bits 0 through 7
    EightBit,
    /// Bits 4 through 7, next to the 4-bit bar graph
    FourBit,
}

impl CylonWidth {
    /// Lowest index, inclusive
    #[inline]
    pub fn lower(self) -> u8 {
        match self {
            CylonWidth::EightBit => 0,
            CylonWidth::FourBit => 4,
        }
    }

    /// Highest index, inclusive
    #[inline]
    pub fn upper(self) -> u8 {
        7
    }

    #[inline]
    pub fn mask(self) -> u8 {
        match self {
            CylonWidth::EightBit => 0xFF,
            CylonWidth::FourBit => HIGH_NIBBLE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    MovingDown,
    MovingUp,
}

/// A single lit bit bouncing between the ends of its width
pub struct Cylon {
    index: u8,
    direction: Direction,
}

impl Cylon {
    /// Eye parked at bit 0, heading down, so the first step turns it around.
    pub const fn new() -> Self {
        Self {
            index: 0,
            direction: Direction::MovingDown,
        }
    }

    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one position within `width` and return the new index.
    ///
    /// An index left outside `width` by a previous width is clamped
    /// first. Both bounds are inclusive: the eye turns around on the end
    /// bit and never steps past it.
    pub fn step(&mut self, width: CylonWidth) -> u8 {
        let (lower, upper) = (width.lower(), width.upper());
        self.index = self.index.clamp(lower, upper);

        match self.direction {
            Direction::MovingDown => {
                if self.index > lower {
                    self.index -= 1;
                }
                if self.index <= lower {
                    self.direction = Direction::MovingUp;
                }
            }
            Direction::MovingUp => {
                if self.index < upper {
                    self.index += 1;
                }
                if self.index >= upper {
                    self.direction = Direction::MovingDown;
                }
            }
        }

        self.index
    }

    /// Step and show the eye on the bits owned at `width`.
    pub fn advance<P: OutputPort>(&mut self, port: &mut P, width: CylonWidth) -> u8 {
        let index = self.step(width);
        port.modify(width.mask(), 1 << index);
        index
    }
}

impl Default for Cylon {
    fn default() -> Self {
        Self::new()
    }
}
