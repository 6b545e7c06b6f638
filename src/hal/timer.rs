use avr_device::atmega128a::TC0;

// TIMSK / TIFR bits for Timer0
const TOIE0: u8 = 1 << 0;
const TOV0: u8 = 1 << 0;

const CS0_MASK: u8 = 0x07;

/// Timer0 clock select. Timer0 on the ATmega128 has its own divider
/// table, different from Timers 1-3.
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div32 = 3,
    Div64 = 4,
    Div128 = 5,
    Div256 = 6,
    Div1024 = 7,
}

/// 8-bit Timer0 in normal (overflow) mode
pub struct Timer0 {
    tc0: TC0,
}

impl Timer0 {
    pub fn new(tc0: TC0) -> Self {
        unsafe {
            // Normal mode, stopped, synchronous clock
            tc0.assr.write(|w| w.bits(0));
            tc0.tccr0.write(|w| w.bits(0));
            tc0.tcnt0.write(|w| w.bits(0));
        }
        Self { tc0 }
    }

    pub fn start(&mut self, prescaler: Prescaler) {
        self.tc0.tccr0.modify(|r, w| unsafe {
            w.bits((r.bits() & !CS0_MASK) | (prescaler as u8 & CS0_MASK))
        });
    }

    #[inline]
    pub fn set_counter(&mut self, value: u8) {
        self.tc0.tcnt0.write(|w| w.bits(value));
    }

    #[inline]
    pub fn counter(&self) -> u8 {
        self.tc0.tcnt0.read().bits()
    }

    pub fn enable_overflow_interrupt(&mut self) {
        self.tc0.timsk.modify(|r, w| unsafe { w.bits(r.bits() | TOIE0) });
    }

    pub fn disable_overflow_interrupt(&mut self) {
        self.tc0.timsk.modify(|r, w| unsafe { w.bits(r.bits() & !TOIE0) });
    }

    /// Overflow flag, for polling while the interrupt is disabled
    pub fn overflowed(&self) -> bool {
        self.tc0.tifr.read().bits() & TOV0 != 0
    }

    pub fn clear_overflow(&mut self) {
        // Flag is cleared by writing a one
        self.tc0.tifr.write(|w| unsafe { w.bits(TOV0) });
    }
}
