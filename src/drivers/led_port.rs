/// An 8-bit output port shared between the bar graph and the cylon.
///
/// Writers never overwrite the whole port blindly: each one owns a mask
/// for the current mode and goes through [`OutputPort::modify`], which
/// leaves every bit outside that mask as it was.
pub trait OutputPort {
    /// Current value latched on the port
    fn read(&self) -> u8;

    /// Latch a new value on the port
    fn write(&mut self, value: u8);

    /// Replace the bits selected by `mask` with the matching bits of `value`.
    #[inline]
    fn modify(&mut self, mask: u8, value: u8) {
        let current = self.read();
        self.write((current & !mask) | (value & mask));
    }
}

impl<P: OutputPort + ?Sized> OutputPort for &mut P {
    fn read(&self) -> u8 {
        (**self).read()
    }

    fn write(&mut self, value: u8) {
        (**self).write(value)
    }
}

/// Port stand-in for host tests
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPort(pub u8);

#[cfg(test)]
impl OutputPort for MemoryPort {
    fn read(&self) -> u8 {
        self.0
    }

    fn write(&mut self, value: u8) {
        self.0 = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modify_only_touches_masked_bits() {
        let mut port = MemoryPort(0b1010_0101);
        port.modify(0x0F, 0b1111_0011);
        assert_eq!(port.0, 0b1010_0011);
    }

    #[test]
    fn modify_with_full_mask_overwrites() {
        let mut port = MemoryPort(0xAA);
        port.modify(0xFF, 0x55);
        assert_eq!(port.0, 0x55);
    }

    #[test]
    fn modify_with_empty_mask_is_noop() {
        let mut port = MemoryPort(0x3C);
        port.modify(0x00, 0xFF);
        assert_eq!(port.0, 0x3C);
    }
}
