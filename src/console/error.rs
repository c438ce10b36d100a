//! Console error types

use crate::hal::PinError;

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command (or empty line)
    UnknownCommand,
    /// E02: Missing required argument
    MissingArg,
    /// E03: Tokenizer ran off the end of the buffer without a terminator
    LineWithoutEnd,
    /// E04: Token bytes are not valid UTF-8
    InvalidEncoding,
    /// E05: Pin capability call failed
    Hardware,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::MissingArg => "E02",
            Self::LineWithoutEnd => "E03",
            Self::InvalidEncoding => "E04",
            Self::Hardware => "E05",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::MissingArg => "missing argument",
            Self::LineWithoutEnd => "line without end",
            Self::InvalidEncoding => "invalid encoding",
            Self::Hardware => "pin I/O failed",
        }
    }
}

impl From<PinError> for ConsoleError {
    fn from(_: PinError) -> Self {
        Self::Hardware
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
