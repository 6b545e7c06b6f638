//! Latching of ADC results and the cylon speed classification

use crate::config::{
    ADC_MAX, CPU_FREQ_HZ, FAST_OVERFLOWS, FAST_RELOAD, FAST_THRESHOLD, SLOW_OVERFLOWS,
    SLOW_RELOAD, STARTUP_RELOAD, TIMER0_PRESCALE,
};

/// Cylon speed selected by the latest reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimingBucket {
    Fast,
    Slow,
}

impl TimingBucket {
    /// Bucket for a raw reading. The threshold itself is slow.
    #[inline]
    pub fn classify(reading: u16) -> Self {
        if reading < FAST_THRESHOLD {
            TimingBucket::Fast
        } else {
            TimingBucket::Slow
        }
    }

    /// Value written to TCNT0 after every overflow
    #[inline]
    pub fn reload(self) -> u8 {
        match self {
            TimingBucket::Fast => FAST_RELOAD,
            TimingBucket::Slow => SLOW_RELOAD,
        }
    }

    /// Overflows that make up one cylon step
    #[inline]
    pub fn overflow_target(self) -> u8 {
        match self {
            TimingBucket::Fast => FAST_OVERFLOWS,
            TimingBucket::Slow => SLOW_OVERFLOWS,
        }
    }

    /// Nominal time between cylon steps in milliseconds
    pub fn period_ms(self) -> u16 {
        let ticks_per_overflow = 256 - self.reload() as u32;
        let ticks = ticks_per_overflow * self.overflow_target() as u32;
        (ticks * 1000 / (CPU_FREQ_HZ / TIMER0_PRESCALE)) as u16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimingBucket::Fast => "fast",
            TimingBucket::Slow => "slow",
        }
    }
}

/// Reload value and overflow target consumed by the Timer0 ISR
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerPeriod {
    pub reload: u8,
    pub overflow_target: u8,
}

impl TimerPeriod {
    /// Period in effect until the first conversion completes. The target
    /// of zero makes the first overflow step the cylon immediately.
    pub const STARTUP: Self = Self {
        reload: STARTUP_RELOAD,
        overflow_target: 0,
    };
}

impl From<TimingBucket> for TimerPeriod {
    fn from(bucket: TimingBucket) -> Self {
        Self {
            reload: bucket.reload(),
            overflow_target: bucket.overflow_target(),
        }
    }
}

/// State written by the ADC conversion-complete ISR
pub struct AnalogSampler {
    reading: u16,
    ready: bool,
    bucket: Option<TimingBucket>,
}

impl AnalogSampler {
    pub const fn new() -> Self {
        Self {
            reading: 0,
            ready: false,
            bucket: None,
        }
    }

    /// Latch a finished conversion. Returns the period the timer should use.
    pub fn on_conversion(&mut self, raw: u16) -> TimerPeriod {
        let reading = raw & ADC_MAX;
        let bucket = TimingBucket::classify(reading);

        self.reading = reading;
        self.ready = true;
        self.bucket = Some(bucket);

        bucket.into()
    }

    /// Hand the latest reading to the main loop, clearing the ready flag.
    /// Returns `None` when nothing arrived since the last call.
    pub fn take(&mut self) -> Option<u16> {
        if self.ready {
            self.ready = false;
            Some(self.reading)
        } else {
            None
        }
    }

    #[inline]
    pub fn reading(&self) -> u16 {
        self.reading
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Bucket of the latest reading, `None` before the first conversion
    #[inline]
    pub fn bucket(&self) -> Option<TimingBucket> {
        self.bucket
    }
}

impl Default for AnalogSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        assert_eq!(TimingBucket::classify(0), TimingBucket::Fast);
        assert_eq!(TimingBucket::classify(510), TimingBucket::Fast);
        assert_eq!(TimingBucket::classify(511), TimingBucket::Slow);
        assert_eq!(TimingBucket::classify(1023), TimingBucket::Slow);
    }

    #[test]
    fn conversion_selects_timer_period() {
        let mut sampler = AnalogSampler::new();

        assert_eq!(
            sampler.on_conversion(510),
            TimerPeriod {
                reload: 39,
                overflow_target: 9
            }
        );
        assert_eq!(
            sampler.on_conversion(511),
            TimerPeriod {
                reload: 142,
                overflow_target: 55
            }
        );
        assert_eq!(
            sampler.on_conversion(1023),
            TimerPeriod {
                reload: 142,
                overflow_target: 55
            }
        );
    }

    #[test]
    fn take_clears_ready_flag() {
        let mut sampler = AnalogSampler::new();
        assert_eq!(sampler.take(), None);

        sampler.on_conversion(700);
        assert!(sampler.is_ready());
        assert_eq!(sampler.take(), Some(700));
        assert!(!sampler.is_ready());
        assert_eq!(sampler.take(), None);
    }

    #[test]
    fn newer_sample_overwrites_unconsumed_one() {
        let mut sampler = AnalogSampler::new();
        sampler.on_conversion(100);
        sampler.on_conversion(900);
        assert_eq!(sampler.take(), Some(900));
        assert_eq!(sampler.take(), None);
    }

    #[test]
    fn reading_is_masked_to_ten_bits() {
        let mut sampler = AnalogSampler::new();
        sampler.on_conversion(0xFC00 | 300);
        assert_eq!(sampler.reading(), 300);
        assert_eq!(sampler.bucket(), Some(TimingBucket::Fast));
    }

    #[test]
    fn nominal_periods() {
        // 217 ticks * 9 at 15625 Hz
        assert_eq!(TimingBucket::Fast.period_ms(), 124);
        // 114 ticks * 55 at 15625 Hz
        assert_eq!(TimingBucket::Slow.period_ms(), 401);
    }
}
