//! Byte queue between the log writer and the USART0 data register empty
//! interrupt

use crate::config::TX_BUFFER_SIZE;

// Buffer size must be power of 2 for efficient masking
const BUFFER_MASK: usize = TX_BUFFER_SIZE - 1;
const _: () = assert!(TX_BUFFER_SIZE.is_power_of_two());

/// Transmit ring was full, the byte was not queued
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxBufferFull;

/// Fixed ring of queued output bytes. One slot stays empty so a full ring
/// can be told apart from an empty one.
pub struct TxRing {
    data: [u8; TX_BUFFER_SIZE],
    write_idx: usize,
    read_idx: usize,
}

impl TxRing {
    /// Bytes that can be queued at once
    pub const CAPACITY: usize = TX_BUFFER_SIZE - 1;

    pub const fn new() -> Self {
        Self {
            data: [0; TX_BUFFER_SIZE],
            write_idx: 0,
            read_idx: 0,
        }
    }

    pub fn write(&mut self, byte: u8) -> Result<(), TxBufferFull> {
        let next_write = (self.write_idx + 1) & BUFFER_MASK;
        if next_write == self.read_idx {
            return Err(TxBufferFull);
        }
        self.data[self.write_idx] = byte;
        self.write_idx = next_write;
        Ok(())
    }

    pub fn read(&mut self) -> Option<u8> {
        if self.read_idx != self.write_idx {
            let byte = self.data[self.read_idx];
            self.read_idx = (self.read_idx + 1) & BUFFER_MASK;
            Some(byte)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read_idx == self.write_idx
    }

    pub fn len(&self) -> usize {
        self.write_idx.wrapping_sub(self.read_idx) & BUFFER_MASK
    }
}

impl Default for TxRing {
    fn default() -> Self {
        Self::new()
    }
}
