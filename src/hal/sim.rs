//! In-memory backends for host runs and tests.
//!
//! `SimPins` keeps per-pin state and a journal of every capability call.
//! `SimSerial` replays a fixed input and collects output into a string.

use core::fmt;

use heapless::{String, Vec};

use super::{Pin, PinError, PinIo, PinMode, SerialRx};

/// Journal capacity (oldest calls are kept, later ones counted as lost)
pub const JOURNAL_SIZE: usize = 32;

/// Output capacity of [`SimSerial`]
pub const SIM_OUTPUT_SIZE: usize = 2048;

/// One recorded capability call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinCall {
    SetMode(Pin, PinMode),
    DigitalWrite(Pin, bool),
    DigitalRead(Pin),
    AnalogWrite(Pin, u16),
    AnalogRead(Pin),
}

/// Simulated pin bank with `N` pins
pub struct SimPins<const N: usize = 32> {
    modes: [Option<PinMode>; N],
    levels: [bool; N],
    analog_out: [u16; N],
    analog_in: [u16; N],
    journal: Vec<PinCall, JOURNAL_SIZE>,
    lost: usize,
}

impl<const N: usize> SimPins<N> {
    /// All pins unconfigured, low, zero
    pub const fn new() -> Self {
        Self {
            modes: [None; N],
            levels: [false; N],
            analog_out: [0; N],
            analog_in: [0; N],
            journal: Vec::new(),
            lost: 0,
        }
    }

    /// Set the level an input pin will read
    pub fn set_input(&mut self, pin: Pin, high: bool) {
        if let Some(level) = self.levels.get_mut(usize::from(pin)) {
            *level = high;
        }
    }

    /// Set the value the ADC will return for a pin
    pub fn set_analog_input(&mut self, pin: Pin, value: u16) {
        if let Some(v) = self.analog_in.get_mut(usize::from(pin)) {
            *v = value;
        }
    }

    pub fn mode(&self, pin: Pin) -> Option<PinMode> {
        self.modes.get(usize::from(pin)).copied().flatten()
    }

    pub fn level(&self, pin: Pin) -> bool {
        self.levels.get(usize::from(pin)).copied().unwrap_or(false)
    }

    /// Last PWM duty written to a pin
    pub fn analog_output(&self, pin: Pin) -> u16 {
        self.analog_out.get(usize::from(pin)).copied().unwrap_or(0)
    }

    /// Recorded calls, oldest first
    pub fn calls(&self) -> &[PinCall] {
        &self.journal
    }

    /// Calls that did not fit in the journal
    pub fn lost_calls(&self) -> usize {
        self.lost
    }

    pub fn clear_calls(&mut self) {
        self.journal.clear();
        self.lost = 0;
    }

    fn record(&mut self, call: PinCall) {
        if self.journal.push(call).is_err() {
            self.lost += 1;
        }
    }

    fn index(pin: Pin) -> Result<usize, PinError> {
        let idx = usize::from(pin);
        if idx < N {
            Ok(idx)
        } else {
            Err(PinError::InvalidPin(pin))
        }
    }
}

impl<const N: usize> Default for SimPins<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PinIo for SimPins<N> {
    fn set_mode(&mut self, pin: Pin, mode: PinMode) -> Result<(), PinError> {
        let idx = Self::index(pin)?;
        self.record(PinCall::SetMode(pin, mode));
        self.modes[idx] = Some(mode);
        Ok(())
    }

    fn digital_write(&mut self, pin: Pin, high: bool) -> Result<(), PinError> {
        let idx = Self::index(pin)?;
        self.record(PinCall::DigitalWrite(pin, high));
        self.levels[idx] = high;
        Ok(())
    }

    fn digital_read(&mut self, pin: Pin) -> Result<bool, PinError> {
        let idx = Self::index(pin)?;
        self.record(PinCall::DigitalRead(pin));
        Ok(self.levels[idx])
    }

    fn analog_write(&mut self, pin: Pin, value: u16) -> Result<(), PinError> {
        let idx = Self::index(pin)?;
        self.record(PinCall::AnalogWrite(pin, value));
        self.analog_out[idx] = value;
        Ok(())
    }

    fn analog_read(&mut self, pin: Pin) -> Result<u16, PinError> {
        let idx = Self::index(pin)?;
        self.record(PinCall::AnalogRead(pin));
        Ok(self.analog_in[idx])
    }
}

/// Scripted serial port: fixed input bytes, captured output
pub struct SimSerial<'a> {
    input: &'a [u8],
    pos: usize,
    output: String<SIM_OUTPUT_SIZE>,
}

impl<'a> SimSerial<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            output: String::new(),
        }
    }

    /// Bytes not yet read
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Everything written so far
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl SerialRx for SimSerial<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.input.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }
}

impl fmt::Write for SimSerial<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_overflow_counted() {
        let mut pins = SimPins::<4>::new();

        for _ in 0..JOURNAL_SIZE + 3 {
            pins.digital_read(1).unwrap();
        }
        assert_eq!(pins.calls().len(), JOURNAL_SIZE);
        assert_eq!(pins.lost_calls(), 3);

        pins.clear_calls();
        assert!(pins.calls().is_empty());
        assert_eq!(pins.lost_calls(), 0);
    }

    #[test]
    fn test_rejected_call_not_recorded() {
        let mut pins = SimPins::<4>::new();

        assert_eq!(pins.set_mode(4, PinMode::Output), Err(PinError::InvalidPin(4)));
        assert!(pins.calls().is_empty());
        assert_eq!(pins.mode(3), None);
        assert_eq!(pins.mode(4), None);
    }
}
