//! Line accumulator for console input
//!
//! Bytes arrive one at a time. The buffer is fixed-size and never overruns:
//! when it is full the last slot is overwritten with a terminator and the
//! line is completed on the spot.

/// Capacity of the line buffer in bytes (63 usable characters + terminator)
pub const READ_BUFFER_SIZE: usize = 64;

/// True for bytes that end a line (CR, LF, NUL)
#[inline]
pub const fn is_terminator(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n' | 0)
}

/// Signal that a complete, NUL-terminated line sits in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineReady {
    /// Bytes before the terminator
    pub len: usize,
    /// Line hit capacity and was terminated by force
    pub truncated: bool,
    /// Byte that arrived while the buffer was full. It was not stored and
    /// belongs to the next line.
    pub carried: Option<u8>,
}

/// Line input buffer
pub struct LineBuffer {
    buf: [u8; READ_BUFFER_SIZE],
    /// Next write position, always in `0..=READ_BUFFER_SIZE`
    cursor: usize,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; READ_BUFFER_SIZE],
            cursor: 0,
        }
    }

    /// Feed one input byte.
    ///
    /// Returns `Some` when the line is complete. The cursor is left on the
    /// terminator; call [`reset`](Self::reset) once the line is processed.
    pub fn feed_byte(&mut self, byte: u8) -> Option<LineReady> {
        if self.cursor == READ_BUFFER_SIZE {
            self.buf[READ_BUFFER_SIZE - 1] = 0;
            return Some(LineReady {
                len: READ_BUFFER_SIZE - 1,
                truncated: true,
                carried: Some(byte),
            });
        }

        self.buf[self.cursor] = byte;

        if is_terminator(byte) {
            self.buf[self.cursor] = 0;
            return Some(LineReady {
                len: self.cursor,
                truncated: false,
                carried: None,
            });
        }

        self.cursor += 1;
        None
    }

    /// Re-arm for the next line
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Current write position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Buffer capacity
    pub const fn capacity(&self) -> usize {
        READ_BUFFER_SIZE
    }

    /// Check if nothing has been written since the last reset
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Whole buffer, for in-place tokenizing
    pub fn line_mut(&mut self) -> &mut [u8; READ_BUFFER_SIZE] {
        &mut self.buf
    }

    /// Get raw bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.cursor.min(READ_BUFFER_SIZE)]
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
