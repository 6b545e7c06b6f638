//! Application layer for the cylon meter
//!
//! [`Application`] is the one state structure shared by the ADC ISR, the
//! Timer0 ISR and the main loop. It knows nothing about registers: the
//! output port and the mode pins come in through traits, and the ISRs
//! feed it raw conversions and overflow events.

use embedded_hal::digital::v2::InputPin;

use crate::drivers::{
    AnalogSampler, BarGraph, Cylon, Mode, ModeSelector, OutputPort, TimerPeriod, TimingBucket,
};

/// Snapshot handed back to the main loop after each consumed sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    pub reading: u16,
    pub mode: Mode,
    pub bucket: Option<TimingBucket>,
    pub cylon_index: u8,
}

pub struct Application<P, A, B> {
    port: P,
    selector: ModeSelector<A, B>,
    sampler: AnalogSampler,
    period: TimerPeriod,
    overflow_count: u8,
    cylon: Cylon,
}

impl<P, A, B, E> Application<P, A, B>
where
    P: OutputPort,
    A: InputPin<Error = E>,
    B: InputPin<Error = E>,
{
    pub fn new(port: P, selector: ModeSelector<A, B>) -> Self {
        Self {
            port,
            selector,
            sampler: AnalogSampler::new(),
            period: TimerPeriod::STARTUP,
            overflow_count: 0,
            cylon: Cylon::new(),
        }
    }

    /// ADC conversion complete
    #[inline]
    pub fn on_conversion(&mut self, raw: u16) {
        self.period = self.sampler.on_conversion(raw);
    }

    /// Value the Timer0 ISR loads into the counter on every overflow
    #[inline]
    pub fn reload(&self) -> u8 {
        self.period.reload
    }

    #[inline]
    pub fn period(&self) -> TimerPeriod {
        self.period
    }

    /// Timer0 overflow. Counts overflows and, once the target is reached,
    /// moves the cylon for the current mode.
    ///
    /// Returns the new cylon index, or `None` if the cylon did not move.
    pub fn on_overflow(&mut self) -> Result<Option<u8>, E> {
        self.overflow_count = self.overflow_count.saturating_add(1);
        if self.overflow_count < self.period.overflow_target {
            return Ok(None);
        }
        self.overflow_count = 0;

        let mode = self.selector.read()?;
        Ok(mode
            .cylon_width()
            .map(|width| self.cylon.advance(&mut self.port, width)))
    }

    /// One pass of the main loop. Renders the bar graph if a new sample is
    /// waiting and the current mode shows one.
    ///
    /// Returns `None` when no sample was pending.
    pub fn poll(&mut self) -> Result<Option<Status>, E> {
        let reading = match self.sampler.take() {
            Some(reading) => reading,
            None => return Ok(None),
        };

        let mode = self.selector.read()?;
        if let Some(width) = mode.display_width() {
            BarGraph::render(&mut self.port, reading, width);
        }

        Ok(Some(Status {
            reading,
            mode,
            bucket: self.sampler.bucket(),
            cylon_index: self.cylon.index(),
        }))
    }

    #[inline]
    pub fn is_sample_ready(&self) -> bool {
        self.sampler.is_ready()
    }

    #[inline]
    pub fn overflow_count(&self) -> u8 {
        self.overflow_count
    }

    #[inline]
    pub fn cylon(&self) -> &Cylon {
        &self.cylon
    }

    #[inline]
    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn release(self) -> (P, ModeSelector<A, B>) {
        (self.port, self.selector)
    }
}
