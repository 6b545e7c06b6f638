pub mod adc;
pub mod gpio;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use adc::{Adc, AdcChannel, AdcPrescaler, AdcReference};
pub use gpio::board;
pub use gpio::{Input, LedPort, Pin, PullUp};
pub use timer::{Prescaler, Timer0};
pub use uart::{TxBufferFull, Uart};
