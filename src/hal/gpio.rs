use avr_device::atmega128a::{PORTB, PORTD};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::InputPin;

use crate::drivers::OutputPort;

pub trait PinMode {}
/// High-impedance input, the reset state
pub struct Input;
/// Input with the internal pull-up enabled
pub struct PullUp;
impl PinMode for Input {}
impl PinMode for PullUp {}

#[derive(Debug)]
pub struct Pin<PORT, const PIN: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8, MODE> Pin<PORT, P, MODE> {
    const fn new() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

macro_rules! impl_port {
    ($PORT:ident, $pin:ident, $ddr:ident, $port:ident) => {
        impl<const P: u8, MODE: PinMode> Pin<$PORT, P, MODE> {
            pub fn into_pull_up_input(self) -> Pin<$PORT, P, PullUp> {
                // Clear DDRx bit, set PORTx bit
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin::new()
            }

            /// Pin is an input (DDRx clear) with its pull-up on (PORTx set)
            pub fn is_pulled_up(&self) -> bool {
                let regs = unsafe { &*$PORT::ptr() };
                regs.$ddr.read().bits() & (1 << P) == 0
                    && regs.$port.read().bits() & (1 << P) != 0
            }

            #[inline]
            fn read_level(&self) -> bool {
                unsafe { (*$PORT::ptr()).$pin.read().bits() & (1 << P) != 0 }
            }
        }

        impl<const P: u8> InputPin for Pin<$PORT, P, PullUp> {
            type Error = Infallible;

            #[inline]
            fn is_high(&self) -> Result<bool, Infallible> {
                Ok(self.read_level())
            }

            #[inline]
            fn is_low(&self) -> Result<bool, Infallible> {
                Ok(!self.read_level())
            }
        }
    };
}

impl_port!(PORTB, pinb, ddrb, portb);

/// All eight PORTD bits as outputs, shared by the bar graph and the cylon
pub struct LedPort {
    port: PORTD,
}

impl LedPort {
    pub fn new(port: PORTD) -> Self {
        unsafe {
            port.ddrd.write(|w| w.bits(0xFF));
            port.portd.write(|w| w.bits(0x00));
        }
        Self { port }
    }
}

impl OutputPort for LedPort {
    #[inline]
    fn read(&self) -> u8 {
        self.port.portd.read().bits()
    }

    #[inline]
    fn write(&mut self, value: u8) {
        self.port.portd.write(|w| unsafe { w.bits(value) });
    }
}

// Demo board pin assignments
pub mod board {
    use super::*;
    use crate::config::{MODE_PIN_A, MODE_PIN_B};

    /// Bundle select: low picks split mode
    pub type ModeA = Pin<PORTB, { MODE_PIN_A }, PullUp>;
    /// Qualifier: high picks cylon, low picks bar graph
    pub type ModeB = Pin<PORTB, { MODE_PIN_B }, PullUp>;

    /// Take PORTB and configure both mode inputs with pull-ups.
    pub fn mode_pins(_port: PORTB) -> (ModeA, ModeB) {
        let a = Pin::<PORTB, { MODE_PIN_A }, Input>::new().into_pull_up_input();
        let b = Pin::<PORTB, { MODE_PIN_B }, Input>::new().into_pull_up_input();
        (a, b)
    }
}
