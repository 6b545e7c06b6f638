//! State shared between the main loop and interrupt handlers

use avr_device::interrupt::{self, Mutex};
use core::cell::RefCell;

/// A value installed once at startup and afterwards only touched with
/// interrupts masked. The critical section doubles as the compiler barrier
/// that keeps reads from being cached across the ISR boundary.
pub struct Shared<T> {
    inner: Mutex<RefCell<Option<T>>>,
}

impl<T> Shared<T> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Hand the value over. Call before enabling the interrupts that use it.
    pub fn install(&self, value: T) {
        interrupt::free(|cs| {
            self.inner.borrow(cs).replace(Some(value));
        });
    }

    /// Run `f` on the value with interrupts masked.
    /// Returns `None` if nothing has been installed yet.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        interrupt::free(|cs| self.inner.borrow(cs).borrow_mut().as_mut().map(f))
    }
}
