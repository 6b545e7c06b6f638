//! Configuration constants for the cylon meter board

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate for the diagnostic log
pub const UART_BAUD: u32 = 9600;

/// Largest value a 10-bit conversion can produce
pub const ADC_MAX: u16 = 1023;

/// Readings strictly below this select the fast cylon speed
pub const FAST_THRESHOLD: u16 = 511;

/// Timer0 clock divider. Must match `Prescaler::Div1024`.
pub const TIMER0_PRESCALE: u32 = 1024;

/// Timer0 reload value and overflow count for the fast bucket (~0.125s)
pub const FAST_RELOAD: u8 = 39;
pub const FAST_OVERFLOWS: u8 = 9;

/// Timer0 reload value and overflow count for the slow bucket (~0.5s)
pub const SLOW_RELOAD: u8 = 142;
pub const SLOW_OVERFLOWS: u8 = 55;

/// Counter value loaded before the first reading arrives
pub const STARTUP_RELOAD: u8 = 125;

/// Upper (inclusive) reading for each lit segment count in 8-bit mode.
/// Index `n` holds the largest reading that lights `n` segments; anything
/// above the last entry lights all eight.
pub const EIGHT_BIT_STEPS: [u16; 8] = [128, 256, 384, 512, 639, 767, 895, 1022];

/// Same as [`EIGHT_BIT_STEPS`] for the 4-segment bar graph
pub const FOUR_BIT_STEPS: [u16; 4] = [256, 512, 767, 1022];

/// PORTB bit of mode input A (bundle select)
pub const MODE_PIN_A: u8 = 5;

/// PORTB bit of mode input B (qualifier, only read while A is high)
pub const MODE_PIN_B: u8 = 4;

/// Output port bits owned by the 4-bit bar graph in split mode
pub const LOW_NIBBLE: u8 = 0x0F;

/// Output port bits owned by the 4-bit cylon in split mode
pub const HIGH_NIBBLE: u8 = 0xF0;

/// Size of the UART transmit ring. Must be a power of two. Holds the
/// startup banner plus the first mode and speed lines, about 80 bytes.
pub const TX_BUFFER_SIZE: usize = 128;
