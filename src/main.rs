#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("cylon-meter only runs on the ATmega128, build it with `cargo firmware`");
}

#[cfg(target_arch = "avr")]
mod firmware {
    use panic_halt as _;

    use avr_device::atmega128a::Peripherals;
    use avr_device::interrupt;

    use cylon_meter::config::STARTUP_RELOAD;
    use cylon_meter::drivers::{Mode, ModeSelector, SerialConsole, TimingBucket};
    use cylon_meter::hal::board::{self, ModeA, ModeB};
    use cylon_meter::hal::{Adc, AdcChannel, AdcPrescaler, AdcReference, LedPort, Prescaler, Timer0, Uart};
    use cylon_meter::os::Shared;
    use cylon_meter::{log_debug, log_info, Application, Status};

    /// Everything the ISRs touch, handed over once at startup
    struct Firmware {
        app: Application<LedPort, ModeA, ModeB>,
        timer: Timer0,
        adc: Adc,
    }

    static FIRMWARE: Shared<Firmware> = Shared::new();

    #[avr_device::entry]
    fn main() -> ! {
        let dp = Peripherals::take().unwrap();

        let mut console = SerialConsole::new(Uart::new(dp.USART0));

        // Timer0: normal mode, clock / 1024
        let mut timer = Timer0::new(dp.TC0);
        timer.set_counter(STARTUP_RELOAD);
        timer.start(Prescaler::Div1024);
        timer.enable_overflow_interrupt();

        // ADC0 against AVCC, clock / 64
        let mut adc = Adc::new(dp.ADC);
        adc.set_reference(AdcReference::Avcc);
        adc.set_prescaler(AdcPrescaler::Div64);
        adc.select_channel(AdcChannel::Adc0);

        // PORTD all outputs, mode inputs pulled up
        #[cfg_attr(not(feature = "self-test"), allow(unused_mut))]
        let mut leds = LedPort::new(dp.PORTD);
        let (mode_a, mode_b) = board::mode_pins(dp.PORTB);

        #[cfg(feature = "self-test")]
        {
            use cylon_meter::testing::{run_self_tests, Hardware};

            // The report needs UDRE; the timer test polls TOV0 itself
            timer.disable_overflow_interrupt();
            unsafe { interrupt::enable() };
            let mut hw = Hardware {
                adc: &mut adc,
                timer: &mut timer,
                leds: &mut leds,
                mode_a: &mode_a,
                mode_b: &mode_b,
            };
            let passed = run_self_tests(&mut console, &mut hw);
            interrupt::disable();
            timer.enable_overflow_interrupt();
            if !passed {
                console.write_line("Self test failed, continuing anyway");
            }
        }

        adc.start_free_running();
        FIRMWARE.install(Firmware {
            app: Application::new(leds, ModeSelector::new(mode_a, mode_b)),
            timer,
            adc,
        });

        // Enable interrupts globally
        unsafe { interrupt::enable() };

        log_info!(&mut console, "cylon meter ready");
        console.flush();

        let mut shown: Option<(Mode, Option<TimingBucket>)> = None;

        loop {
            let status = match FIRMWARE.with(|fw| fw.app.poll()) {
                Some(Ok(Some(status))) => status,
                Some(Err(never)) => match never {},
                _ => continue,
            };

            report(&mut console, &mut shown, status);
        }
    }

    fn report(
        console: &mut SerialConsole<Uart>,
        shown: &mut Option<(Mode, Option<TimingBucket>)>,
        status: Status,
    ) {
        log_debug!(
            console,
            "reading {} mode {} eye {}",
            status.reading,
            status.mode.as_str(),
            status.cylon_index
        );

        let previous = shown.replace((status.mode, status.bucket));
        if previous.map(|(mode, _)| mode) != Some(status.mode) {
            log_info!(console, "mode {}", status.mode.as_str());
        }
        if let Some(bucket) = status.bucket {
            if previous.and_then(|(_, bucket)| bucket) != Some(bucket) {
                log_info!(
                    console,
                    "speed {} ({} ms/step)",
                    bucket.as_str(),
                    bucket.period_ms()
                );
            }
        }
    }

    #[avr_device::interrupt(atmega128a)]
    #[allow(non_snake_case)]
    fn ADC() {
        FIRMWARE.with(|fw| {
            let raw = fw.adc.result();
            fw.app.on_conversion(raw);
        });
    }

    #[avr_device::interrupt(atmega128a)]
    #[allow(non_snake_case)]
    fn TIMER0_OVF() {
        FIRMWARE.with(|fw| {
            fw.timer.set_counter(fw.app.reload());
            if let Err(never) = fw.app.on_overflow() {
                match never {}
            }
        });
    }
}
