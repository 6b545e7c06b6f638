//! Runs the hardware self tests once and reports over USART0.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(not(target_arch = "avr"))]
fn main() {}

#[cfg(target_arch = "avr")]
mod demo {
    use panic_halt as _;

    use avr_device::atmega128a::Peripherals;
    use cylon_meter::drivers::SerialConsole;
    use cylon_meter::hal::{board, Adc, LedPort, Timer0, Uart};
    use cylon_meter::testing::{run_self_tests, Hardware};

    #[avr_device::entry]
    fn main() -> ! {
        let dp = Peripherals::take().unwrap();
        let mut console = SerialConsole::new(Uart::new(dp.USART0));

        // Same pin and converter setup as the firmware, no ISRs besides UDRE
        let mut timer = Timer0::new(dp.TC0);
        let mut adc = Adc::new(dp.ADC);
        let mut leds = LedPort::new(dp.PORTD);
        let (mode_a, mode_b) = board::mode_pins(dp.PORTB);

        unsafe { avr_device::interrupt::enable() };

        let mut hw = Hardware {
            adc: &mut adc,
            timer: &mut timer,
            leds: &mut leds,
            mode_a: &mode_a,
            mode_b: &mode_b,
        };
        if run_self_tests(&mut console, &mut hw) {
            console.write_line("All self tests passed");
            console.flush();
        }

        loop {
            avr_device::asm::sleep();
        }
    }
}
