//! # SerialPinConsole
//!
//! Line-oriented command console for pin I/O over a serial port.
//!
//! ## Architecture
//!
//! ```text
//! UART byte ─▶ LineBuffer ─▶ tokenize ─▶ execute ─▶ handler ─▶ PinIo
//!                  │             │           │
//!              64 bytes,     in place,   static table,
//!              never overruns  ≤ 8 tokens  first match wins
//! ```
//!
//! - Single-threaded polling: one byte per poll, never blocks
//! - No heap: fixed-size line buffer, bounded token list
//! - Handlers see hardware only through [`hal::PinIo`]

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod hal;
pub mod log_globals;
pub mod logging;
pub mod uart_logger;

pub use config::{ConsoleConfig, SerialConfig};
pub use console::{Console, ConsoleError, LineBuffer, TokenList};
pub use hal::{PinIo, SerialRx};
pub use log_globals::CONSOLE_LOG;
pub use logging::{LogLevel, LogStream};
