use avr_device::atmega128a::ADC;

// ADCSRA bits
const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
const ADFR: u8 = 1 << 5;
const ADIF: u8 = 1 << 4;
const ADIE: u8 = 1 << 3;

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcChannel {
    Adc0 = 0,
    Adc1 = 1,
    Adc2 = 2,
    Adc3 = 3,
    Adc4 = 4,
    Adc5 = 5,
    Adc6 = 6,
    Adc7 = 7,
}

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcReference {
    Aref = 0,            // External AREF
    Avcc = 1,            // AVCC with external cap at AREF
    Internal2_56V = 3,   // Internal 2.56V with external cap at AREF
}

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcPrescaler {
    Div2 = 0,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

pub struct Adc {
    adc: ADC,
}

impl Adc {
    /// Enable the converter with AVCC reference, /128 clock and channel 0.
    pub fn new(adc: ADC) -> Self {
        unsafe {
            adc.adcsra.write(|w| w.bits(ADEN | AdcPrescaler::Div128 as u8));
            adc.admux.write(|w| w.bits((AdcReference::Avcc as u8) << 6));
        }
        Self { adc }
    }

    pub fn set_reference(&mut self, reference: AdcReference) {
        self.adc.admux.modify(|r, w| unsafe {
            w.bits((r.bits() & 0x3F) | ((reference as u8) << 6))
        });
    }

    pub fn set_prescaler(&mut self, prescaler: AdcPrescaler) {
        self.adc.adcsra.modify(|r, w| unsafe {
            w.bits((r.bits() & 0xF8) | (prescaler as u8))
        });
    }

    pub fn select_channel(&mut self, channel: AdcChannel) {
        self.adc.admux.modify(|r, w| unsafe {
            w.bits((r.bits() & 0xE0) | (channel as u8))
        });
    }

    /// Start one conversion on `channel`. Not for use once free running.
    pub fn start_conversion(&mut self, channel: AdcChannel) {
        self.select_channel(channel);
        self.adc.adcsra.modify(|r, w| unsafe { w.bits(r.bits() | ADSC) });
    }

    /// ADSC reads back as one until the conversion started above completes
    #[inline]
    pub fn is_converting(&self) -> bool {
        self.adc.adcsra.read().bits() & ADSC != 0
    }

    /// Start converting back to back, raising the ADC interrupt after each
    /// conversion.
    pub fn start_free_running(&mut self) {
        self.adc.adcsra.modify(|r, w| unsafe {
            w.bits(r.bits() | ADEN | ADFR | ADIE | ADSC | ADIF)
        });
    }

    /// Latest 10-bit conversion result
    #[inline]
    pub fn result(&self) -> u16 {
        self.adc.adc.read().bits()
    }
}
