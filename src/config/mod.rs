//! Module: config
//!
//! Purpose: Board and console configuration for SerialPinConsole.
//!
//! All values are `const`-constructible so the console can live in a
//! static with no runtime setup.

/// Console behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Printed after every processed line
    pub prompt: &'static str,
    /// Emit a newline when a line is completed (the input itself is not echoed)
    pub echo_newline: bool,
    /// Print the version banner at startup
    pub banner: bool,
}

impl ConsoleConfig {
    pub const DEFAULT: Self = Self {
        prompt: "> ",
        echo_newline: true,
        banner: true,
    };
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Console UART wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub tx_pin: i32,
    pub rx_pin: i32,
}

impl SerialConfig {
    /// UART0 on the ESP32-S3 default pins
    pub const DEFAULT: Self = Self {
        baud_rate: 115_200,
        tx_pin: 43,
        rx_pin: 44,
    };
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
