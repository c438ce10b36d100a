//! SerialPinConsole - Main entry point
//!
//! On the device: console on UART0, logs on UART1, pins via ESP-IDF.
//! On a host: the same console over stdin/stdout with simulated pins,
//! logs and pin activity on stderr.

#![cfg_attr(target_os = "espidf", no_std)]
#![cfg_attr(target_os = "espidf", no_main)]

#[cfg(target_os = "espidf")]
mod device {
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::sys::{self as esp_idf_sys, EspError};

    use serial_pin_console::hal::esp::{init_console_uart, EspPins, EspSerial};
    use serial_pin_console::hal::SerialRx;
    use serial_pin_console::uart_logger::{self, init_uart_logger, LogUartConfig, UartLogSink};
    use serial_pin_console::{Console, ConsoleConfig, SerialConfig, CONSOLE_LOG};

    /// Report dropped log messages this often
    const DROPPED_REPORT_US: i64 = 10_000_000;

    #[no_mangle]
    fn main() {
        // Initialize ESP-IDF
        esp_idf_sys::link_patches();

        // Nothing to report to if the UARTs fail; idle instead of spinning
        if run().is_err() {
            loop {
                unsafe {
                    esp_idf_sys::vTaskDelay(1000);
                }
            }
        }
    }

    fn run() -> Result<(), EspError> {
        let peripherals = Peripherals::take()?;

        let uart = init_console_uart(peripherals.uart0, &SerialConfig::DEFAULT)?;
        let mut serial = EspSerial::new(uart);

        let log_config = LogUartConfig::default();
        let mut log_uart = init_uart_logger(peripherals.uart1, peripherals.pins.gpio17, &log_config)?;

        let mut pins = EspPins::new();
        let mut console = Console::new(ConsoleConfig::DEFAULT, &CONSOLE_LOG);
        console.print_banner(&mut serial);

        let mut last_dropped_report = 0i64;

        loop {
            let got_byte = match serial.read_byte() {
                Some(byte) => {
                    let _ = console.process_byte(byte, &mut serial, &mut pins);
                    true
                }
                None => false,
            };

            let mut sink = UartLogSink(&mut log_uart);
            uart_logger::drain_to(&CONSOLE_LOG, &mut sink);

            let now = unsafe { esp_idf_sys::esp_timer_get_time() };
            if now - last_dropped_report > DROPPED_REPORT_US {
                uart_logger::report_dropped(&CONSOLE_LOG, &mut sink);
                last_dropped_report = now;
            }

            // Yield to the idle task when there was nothing to do
            if !got_byte {
                unsafe {
                    esp_idf_sys::vTaskDelay(1);
                }
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> std::io::Result<()> {
    host::run()
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::fmt;
    use std::io::{self, Bytes, Read, StdinLock, Stdout, Write};

    use serial_pin_console::hal::{SerialRx, SimPins};
    use serial_pin_console::uart_logger;
    use serial_pin_console::{Console, ConsoleConfig, CONSOLE_LOG};

    /// stdin/stdout standing in for the UART
    struct StdioPort {
        input: Bytes<StdinLock<'static>>,
        output: Stdout,
    }

    impl SerialRx for StdioPort {
        fn read_byte(&mut self) -> Option<u8> {
            self.input.next().and_then(Result::ok)
        }
    }

    impl fmt::Write for StdioPort {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.output.write_all(s.as_bytes()).map_err(|_| fmt::Error)
        }
    }

    /// stderr as a log sink
    struct LogSink;

    impl fmt::Write for LogSink {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            io::stderr().write_all(s.as_bytes()).map_err(|_| fmt::Error)
        }
    }

    pub fn run() -> io::Result<()> {
        let mut port = StdioPort {
            input: io::stdin().lock().bytes(),
            output: io::stdout(),
        };
        let mut pins = SimPins::<64>::new();
        let mut console = Console::new(ConsoleConfig::DEFAULT, &CONSOLE_LOG);

        console.print_banner(&mut port);
        port.output.flush()?;

        // stdin blocks, so EOF is the only "nothing available"
        while let Some(byte) = port.read_byte() {
            if console.process_byte(byte, &mut port, &mut pins).is_some() {
                for call in pins.calls() {
                    eprintln!("[pin] {:?}", call);
                }
                pins.clear_calls();
            }

            uart_logger::drain_to(&CONSOLE_LOG, &mut LogSink);
            uart_logger::report_dropped(&CONSOLE_LOG, &mut LogSink);
            port.output.flush()?;
        }

        writeln!(port.output)?;
        Ok(())
    }
}
