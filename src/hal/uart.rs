#![allow(clippy::missing_safety_doc)]

use avr_device::atmega128a::USART0;
use avr_device::interrupt::Mutex;
use core::cell::RefCell;

use crate::config::{CPU_FREQ_HZ, UART_BAUD};
use crate::drivers::{ByteSink, TxRing};

pub use crate::drivers::TxBufferFull;

const UBRR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

// UCSR0B bits
const UDRIE: u8 = 1 << 5;
const TXEN: u8 = 1 << 3;
// UCSR0C: 8 data bits, no parity, 1 stop bit
const UCSZ_8N1: u8 = 0b11 << 1;

// Drained by USART0_UDRE
static TX_BUFFER: Mutex<RefCell<TxRing>> = Mutex::new(RefCell::new(TxRing::new()));

/// Transmit-only USART0. Bytes are queued and sent from the data register
/// empty interrupt, so writers never wait on the line.
pub struct Uart {
    _usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0) -> Self {
        unsafe {
            usart.ubrr0h.write(|w| w.bits((UBRR >> 8) as u8));
            usart.ubrr0l.write(|w| w.bits(UBRR as u8));
            usart.ucsr0c.write(|w| w.bits(UCSZ_8N1));
            usart.ucsr0b.write(|w| w.bits(TXEN));
        }

        Self { _usart: usart }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), TxBufferFull> {
        avr_device::interrupt::free(|cs| {
            TX_BUFFER.borrow(cs).borrow_mut().write(byte)?;
            // Kick the transmitter; UDRE fires as soon as UDR0 is free
            unsafe {
                (*USART0::ptr()).ucsr0b.modify(|r, w| w.bits(r.bits() | UDRIE));
            }
            Ok(())
        })
    }

    /// Spin until the ring has been handed to the transmitter.
    /// Interrupts must be enabled, otherwise this never returns.
    pub fn flush(&mut self) {
        while !avr_device::interrupt::free(|cs| TX_BUFFER.borrow(cs).borrow().is_empty()) {
            avr_device::asm::nop();
        }
    }
}

impl ByteSink for Uart {
    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<(), TxBufferFull> {
        Uart::write_byte(self, byte)
    }

    #[inline]
    fn flush(&mut self) {
        Uart::flush(self);
    }
}

#[avr_device::interrupt(atmega128a)]
#[allow(non_snake_case)]
fn USART0_UDRE() {
    avr_device::interrupt::free(|cs| {
        let usart = unsafe { &*USART0::ptr() };
        match TX_BUFFER.borrow(cs).borrow_mut().read() {
            Some(byte) => usart.udr0.write(|w| w.bits(byte)),
            // Buffer empty - disable TX interrupt
            None => usart.ucsr0b.modify(|r, w| unsafe { w.bits(r.bits() & !UDRIE) }),
        }
    });
}
