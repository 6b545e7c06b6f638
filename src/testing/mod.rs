//! On-target self tests, reported over the serial console
//!
//! These drive the peripherals through the HAL and must run before the
//! interrupts that own them are enabled. Each test puts back the state it
//! changes. The report is flushed line by line, so interrupts (for UDRE)
//! have to be on while the suite runs.

use crate::config::ADC_MAX;
use crate::drivers::{OutputPort, SerialConsole};
use crate::hal::board::{ModeA, ModeB};
use crate::hal::{Adc, AdcChannel, LedPort, Prescaler, Timer0, Uart};

/// Spin iterations before a wait is declared timed out
const SPIN_LIMIT: u32 = 100_000;

/// Peripherals the suite exercises, borrowed from startup
pub struct Hardware<'a> {
    pub adc: &'a mut Adc,
    pub timer: &'a mut Timer0,
    pub leds: &'a mut LedPort,
    pub mode_a: &'a ModeA,
    pub mode_b: &'a ModeB,
}

pub trait TestCase {
    fn run(&self, hw: &mut Hardware) -> TestResult;
    fn name(&self) -> &'static str;
}

#[derive(PartialEq)]
pub enum TestResult {
    Pass,
    Fail(TestError),
}

#[derive(Clone, Copy, PartialEq)]
pub enum TestError {
    AssertionFailed(&'static str),
    Timeout,
    HardwareFault,
}

impl TestError {
    fn describe(self) -> &'static str {
        match self {
            TestError::AssertionFailed(what) => what,
            TestError::Timeout => "timeout",
            TestError::HardwareFault => "hardware fault",
        }
    }
}

pub struct TestRunner<'a> {
    console: &'a mut SerialConsole<Uart>,
    total_tests: u16,
    passed_tests: u16,
}

impl<'a> TestRunner<'a> {
    pub fn new(console: &'a mut SerialConsole<Uart>) -> Self {
        Self {
            console,
            total_tests: 0,
            passed_tests: 0,
        }
    }

    pub fn run_suite(&mut self, name: &'static str, hw: &mut Hardware, tests: &[&dyn TestCase]) {
        ufmt::uwrite!(self.console, "=== Test Suite: {} ===", name).ok();
        self.end_line();

        for test in tests {
            self.total_tests += 1;
            ufmt::uwrite!(self.console, "Running {}: ", test.name()).ok();

            match test.run(hw) {
                TestResult::Pass => {
                    self.passed_tests += 1;
                    self.console.write_str("PASS");
                }
                TestResult::Fail(err) => {
                    ufmt::uwrite!(self.console, "FAIL - {}", err.describe()).ok();
                }
            }
            self.end_line();
        }

        ufmt::uwrite!(
            self.console,
            "Passed: {}/{}",
            self.passed_tests,
            self.total_tests
        )
        .ok();
        self.end_line();
    }

    pub fn all_passed(&self) -> bool {
        self.passed_tests == self.total_tests
    }

    // Every report line goes out whole before the next test runs
    fn end_line(&mut self) {
        self.console.end_line();
        self.console.flush();
    }
}

macro_rules! check {
    ($cond:expr) => {
        if !$cond {
            return TestResult::Fail(TestError::AssertionFailed(concat!(
                "check failed: `",
                stringify!($cond),
                "`"
            )));
        }
    };
}

macro_rules! check_timeout {
    ($cond:expr) => {
        let mut spins = SPIN_LIMIT;
        while !$cond {
            if spins == 0 {
                return TestResult::Fail(TestError::Timeout);
            }
            spins -= 1;
            avr_device::asm::nop();
        }
    };
}

/// One polled conversion on ADC0 completes with a 10-bit result
pub struct AdcConversionTest;
impl TestCase for AdcConversionTest {
    fn name(&self) -> &'static str {
        "ADC conversion"
    }

    fn run(&self, hw: &mut Hardware) -> TestResult {
        hw.adc.start_conversion(AdcChannel::Adc0);
        check_timeout!(!hw.adc.is_converting());

        check!(hw.adc.result() <= ADC_MAX);
        TestResult::Pass
    }
}

/// Timer0 at clock / 1024 overflows from a preloaded count
pub struct TimerOverflowTest;
impl TestCase for TimerOverflowTest {
    fn name(&self) -> &'static str {
        "Timer0 overflow"
    }

    fn run(&self, hw: &mut Hardware) -> TestResult {
        let saved = hw.timer.counter();
        hw.timer.clear_overflow();
        hw.timer.set_counter(250);
        hw.timer.start(Prescaler::Div1024);

        check_timeout!(hw.timer.overflowed());

        hw.timer.clear_overflow();
        hw.timer.set_counter(saved);
        TestResult::Pass
    }
}

/// Every PORTD output latch reads back what was written
pub struct PortReadbackTest;
impl TestCase for PortReadbackTest {
    fn name(&self) -> &'static str {
        "LED port readback"
    }

    fn run(&self, hw: &mut Hardware) -> TestResult {
        let saved = hw.leds.read();
        let mut result = TestResult::Pass;

        for pattern in [0x55u8, 0xAA, 0x0F, 0xF0] {
            hw.leds.write(pattern);
            if hw.leds.read() != pattern {
                result = TestResult::Fail(TestError::HardwareFault);
                break;
            }
        }

        hw.leds.write(saved);
        result
    }
}

/// Mode inputs are configured as inputs with pull-ups
pub struct ModePinTest;
impl TestCase for ModePinTest {
    fn name(&self) -> &'static str {
        "Mode pin pull-ups"
    }

    fn run(&self, hw: &mut Hardware) -> TestResult {
        check!(hw.mode_a.is_pulled_up());
        check!(hw.mode_b.is_pulled_up());
        TestResult::Pass
    }
}

/// Run the full hardware suite, returning whether everything passed
pub fn run_self_tests(console: &mut SerialConsole<Uart>, hw: &mut Hardware) -> bool {
    let mut runner = TestRunner::new(console);
    runner.run_suite(
        "Hardware",
        hw,
        &[
            &AdcConversionTest,
            &TimerOverflowTest,
            &PortReadbackTest,
            &ModePinTest,
        ],
    );
    runner.all_passed()
}
