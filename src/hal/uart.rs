//! Serial transport abstraction.
//!
//! The console polls: it asks for one byte and gets `None` when nothing
//! is waiting. Output goes through `core::fmt::Write` on the same port.

/// Non-blocking byte source
pub trait SerialRx {
    /// Take one byte if one is available. Never blocks.
    fn read_byte(&mut self) -> Option<u8>;
}

impl<T: SerialRx + ?Sized> SerialRx for &mut T {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}
