//! Log output.
//!
//! Drains a [`LogStream`] into any text sink. On the device the sink is a
//! TX-only UART separate from the command console:
//!
//! ```text
//! ESP32-S3 GPIO17 (TX) ──────▶ USB-UART RX
//!                               └─▶ PC Serial Monitor
//! ```
//!
//! On host runs the simulator drains to stderr.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream, SliceWriter};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::uart::{self, UartTxDriver};

/// UART configuration for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogUartConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
}

impl Default for LogUartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 17, // UART1 TX
        }
    }
}

/// Write one entry as `[timestamp_us] LEVEL: message\n`.
pub fn write_log_entry(entry: &LogEntry, out: &mut dyn Write) -> core::fmt::Result {
    writeln!(
        out,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    )
}

/// Format log entry into a byte buffer, for byte-oriented sinks.
///
/// Returns the number of bytes written.
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = SliceWriter { buf, pos: 0 };
    let _ = write_log_entry(entry, &mut writer);
    writer.pos
}

/// Drain every pending entry into `out`.
///
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut count = 0;
    while let Some(entry) = stream.drain() {
        let _ = write_log_entry(&entry, out);
        count += 1;
    }
    count
}

/// Report and clear the dropped-message counter.
///
/// Writes nothing when no messages were dropped.
pub fn report_dropped<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) {
    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped: {}", dropped);
        stream.reset_dropped();
    }
}

/// Initialize UART TX-only for logging output.
#[cfg(target_os = "espidf")]
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = impl uart::Uart> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &LogUartConfig,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// Text sink over a TX-only UART.
#[cfg(target_os = "espidf")]
pub struct UartLogSink<'a, 'd>(pub &'a mut UartTxDriver<'d>);

#[cfg(target_os = "espidf")]
impl Write for UartLogSink<'_, '_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.write(s.as_bytes()).map(|_| ()).map_err(|_| core::fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MAX_MSG_LEN};

    #[test]
    fn test_format_log_entry() {
        let entry = LogEntry {
            timestamp_us: 1234567,
            level: LogLevel::Info,
            len: 11,
            msg: {
                let mut msg = [0u8; MAX_MSG_LEN];
                msg[..11].copy_from_slice(b"Hello world");
                msg
            },
        };

        let mut buf = [0u8; 128];
        let len = format_log_entry(&entry, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(formatted.contains("1234567"));
        assert!(formatted.contains("INFO"));
        assert!(formatted.contains("Hello world"));
        assert!(formatted.ends_with('\n'));
    }

    #[test]
    fn test_format_truncated_message() {
        let entry = LogEntry {
            timestamp_us: 999,
            level: LogLevel::Error,
            len: 5,
            msg: {
                let mut msg = [0u8; MAX_MSG_LEN];
                msg[..10].copy_from_slice(b"TEST12345X"); // Only first 5 used
                msg
            },
        };

        let mut buf = [0u8; 128];
        let len = format_log_entry(&entry, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains("TEST1"));
        assert!(!formatted.contains("X"));
    }

    #[test]
    fn test_drain_to_empties_stream() {
        let stream = LogStream::<8>::new();
        stream.push(1, LogLevel::Warn, b"first");
        stream.push(2, LogLevel::Debug, b"second");

        let mut out = String::new();
        assert_eq!(drain_to(&stream, &mut out), 2);
        assert!(!stream.has_entries());

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("WARN: first"));
        assert!(lines[1].ends_with("DEBUG: second"));
    }

    #[test]
    fn test_report_dropped() {
        let stream = LogStream::<2>::new();
        stream.push(1, LogLevel::Info, b"a");
        stream.push(2, LogLevel::Info, b"b");
        stream.push(3, LogLevel::Info, b"c");

        let mut out = String::new();
        report_dropped(&stream, &mut out);
        assert_eq!(out, "[WARN] Dropped: 1\n");
        assert_eq!(stream.dropped(), 0);

        out.clear();
        report_dropped(&stream, &mut out);
        assert!(out.is_empty());
    }
}
