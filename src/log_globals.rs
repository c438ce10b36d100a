//! Global log stream instance.
//!
//! Single consumer: whichever loop services the log output device.

use crate::logging::LogStream;

/// Console log stream.
///
/// The console session is the producer; the main loop drains it to the
/// log UART (device) or stderr (host).
pub static CONSOLE_LOG: LogStream = LogStream::new();
