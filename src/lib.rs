//! Cylon meter firmware for the ATmega128
//!
//! An ADC reading is shown as a bar graph on PORTD while a single lit
//! "cylon eye" bounces across the same port at a speed picked by that
//! reading. Two pulled-up inputs on PORTB choose which of the two is shown
//! and how wide.
//!
//! The control logic (`application` and `drivers`, including log line
//! formatting and the transmit ring) is plain `no_std` Rust over
//! `embedded-hal` traits and is unit tested on the host. Register access
//! (`hal`), the shared-state cell and the self tests only exist when
//! building for AVR.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod application;
pub mod config;
pub mod drivers;
#[cfg(target_arch = "avr")]
pub mod hal;
#[cfg(target_arch = "avr")]
pub mod os;
#[cfg(target_arch = "avr")]
pub mod testing;

pub use application::{Application, Status};
