//! Hardware Abstraction Layer for SerialPinConsole.
//!
//! Command handlers only see the capability traits. Backends:
//! - [`sim`] - in-memory pins and serial port (host runs, tests)
//! - `esp` - ESP-IDF GPIO/LEDC/ADC/UART (device builds only)

pub mod gpio;
pub mod sim;
pub mod uart;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use gpio::{Pin, PinError, PinIo, PinMode};
pub use sim::{PinCall, SimPins, SimSerial};
pub use uart::SerialRx;
