//! Pin capabilities consumed by command handlers.
//!
//! Pins are addressed by number, the way the serial protocol names them.

/// Pin number as typed on the console
pub type Pin = u16;

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Capability call failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    /// No such pin on this board
    InvalidPin(Pin),
    /// Pin exists but cannot do the requested function
    NotSupported(Pin),
    /// Driver returned an error code
    Driver(i32),
}

impl core::fmt::Display for PinError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPin(pin) => write!(f, "invalid pin {}", pin),
            Self::NotSupported(pin) => write!(f, "pin {} does not support this", pin),
            Self::Driver(code) => write!(f, "driver error {}", code),
        }
    }
}

/// Digital and analog pin operations.
///
/// Implementations do the register or driver work for one board.
pub trait PinIo {
    /// Configure pin direction
    fn set_mode(&mut self, pin: Pin, mode: PinMode) -> Result<(), PinError>;

    /// Drive an output pin high or low
    fn digital_write(&mut self, pin: Pin, high: bool) -> Result<(), PinError>;

    /// Sample the logic level of a pin
    fn digital_read(&mut self, pin: Pin) -> Result<bool, PinError>;

    /// Set PWM duty (0 = off, 255 = fully on)
    fn analog_write(&mut self, pin: Pin, value: u16) -> Result<(), PinError>;

    /// Raw ADC reading
    fn analog_read(&mut self, pin: Pin) -> Result<u16, PinError>;
}
