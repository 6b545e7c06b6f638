use core::convert::Infallible;

use super::tx_ring::TxBufferFull;

/// Every console line ends with CR LF
const EOL: &str = "\r\n";

/// Byte-wise transmitter underneath the console
pub trait ByteSink {
    /// Queue one byte without waiting
    fn write_byte(&mut self, byte: u8) -> Result<(), TxBufferFull>;

    /// Wait until everything queued so far has been handed to the line
    fn flush(&mut self);
}

/// Line-oriented log output.
///
/// Writes never block: whatever does not fit in the transmit ring is
/// dropped and counted, and the count is reported ahead of the next
/// line written through [`log_info!`](crate::log_info). Callers that
/// must not lose a line (startup banner, self-test report) follow it with
/// [`flush`](Self::flush).
pub struct SerialConsole<S> {
    sink: S,
    dropped: u16,
}

impl<S: ByteSink> SerialConsole<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, dropped: 0 }
    }

    /// Queue `s`, stopping at the first byte that does not fit so a line
    /// is cut short rather than interleaved.
    pub fn write_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        for (sent, &byte) in bytes.iter().enumerate() {
            if self.sink.write_byte(byte).is_err() {
                let lost = u16::try_from(bytes.len() - sent).unwrap_or(u16::MAX);
                self.dropped = self.dropped.saturating_add(lost);
                return;
            }
        }
    }

    pub fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.end_line();
    }

    #[inline]
    pub fn end_line(&mut self) {
        self.write_str(EOL);
    }

    pub fn flush(&mut self) {
        self.sink.flush();
    }

    /// Bytes lost since the last call
    pub fn take_dropped(&mut self) -> u16 {
        core::mem::replace(&mut self.dropped, 0)
    }

    /// Report lost output, if any, then start a line with `prefix`.
    pub fn begin(&mut self, prefix: &str) {
        let dropped = self.take_dropped();
        if dropped > 0 {
            ufmt::uwrite!(self, "[WRN] {} log bytes dropped", dropped).ok();
            self.end_line();
        }
        self.write_str(prefix);
    }
}

impl<S: ByteSink> ufmt::uWrite for SerialConsole<S> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        SerialConsole::write_str(self, s);
        Ok(())
    }
}

/// Informational line: startup, mode and speed changes
#[macro_export]
macro_rules! log_info {
    ($console:expr, $($arg:tt)*) => {{
        let console: &mut $crate::drivers::SerialConsole<_> = $console;
        console.begin("[INF] ");
        ufmt::uwrite!(console, $($arg)*).ok();
        console.end_line();
    }};
}

/// Per-sample trace, compiled in with the `debug` feature only
#[macro_export]
macro_rules! log_debug {
    ($console:expr, $($arg:tt)*) => {{
        #[cfg(feature = "debug")]
        {
            let console: &mut $crate::drivers::SerialConsole<_> = $console;
            console.begin("[DBG] ");
            ufmt::uwrite!(console, $($arg)*).ok();
            console.end_line();
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{Mode, TimingBucket, TxRing};

    /// Ring plus the bytes the line has already taken from it
    struct Wire {
        ring: TxRing,
        sent: Vec<u8>,
    }

    impl ByteSink for Wire {
        fn write_byte(&mut self, byte: u8) -> Result<(), TxBufferFull> {
            self.ring.write(byte)
        }

        fn flush(&mut self) {
            while let Some(byte) = self.ring.read() {
                self.sent.push(byte);
            }
        }
    }

    fn console() -> SerialConsole<Wire> {
        SerialConsole::new(Wire {
            ring: TxRing::new(),
            sent: Vec::new(),
        })
    }

    fn sent(console: &mut SerialConsole<Wire>) -> String {
        console.flush();
        let bytes = core::mem::take(&mut console.sink.sent);
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn every_line_ends_with_crlf() {
        let mut console = console();
        crate::log_info!(&mut console, "mode {}", Mode::Split.as_str());
        console.write_line("PASS");
        ufmt::uwrite!(console, "Passed: {}/{}", 4u16, 4u16).ok();
        console.end_line();

        assert_eq!(
            sent(&mut console),
            "[INF] mode split\r\nPASS\r\nPassed: 4/4\r\n"
        );
    }

    #[test]
    fn drops_are_counted_and_reported_on_the_next_line() {
        let mut console = console();
        let filler = [b'x'; TxRing::CAPACITY - 4];
        console.write_str(core::str::from_utf8(&filler).unwrap());
        // Fits up to "ab\r\n" exactly, then "lost" cannot be queued at all
        console.write_line("ab");
        console.write_str("lost");
        assert_eq!(console.dropped, 4);

        sent(&mut console);
        crate::log_info!(&mut console, "speed {}", TimingBucket::Fast.as_str());
        assert_eq!(
            sent(&mut console),
            "[WRN] 4 log bytes dropped\r\n[INF] speed fast\r\n"
        );
        assert_eq!(console.take_dropped(), 0);
    }

    #[test]
    fn startup_burst_fits_without_flushing() {
        // Banner, first mode line and first speed line are queued within
        // one ADC conversion of each other, long before 9600 baud drains
        // anything
        for mode in [Mode::BarGraph, Mode::Cylon, Mode::Split] {
            for bucket in [TimingBucket::Fast, TimingBucket::Slow] {
                let mut console = console();
                crate::log_info!(&mut console, "cylon meter ready");
                crate::log_info!(&mut console, "mode {}", mode.as_str());
                crate::log_info!(
                    &mut console,
                    "speed {} ({} ms/step)",
                    bucket.as_str(),
                    bucket.period_ms()
                );

                assert_eq!(console.take_dropped(), 0);
                assert!(sent(&mut console).ends_with(" ms/step)\r\n"));
            }
        }
    }

    #[test]
    fn flush_empties_the_ring() {
        let mut console = console();
        console.write_line("=== Test Suite: Hardware ===");
        assert!(!console.sink.ring.is_empty());

        console.flush();
        assert!(console.sink.ring.is_empty());
        assert_eq!(console.sink.sent, b"=== Test Suite: Hardware ===\r\n");
    }
}
