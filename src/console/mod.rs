//! Serial command console
//!
//! Byte in, line out: [`LineBuffer`] accumulates, [`tokenize`] splits in
//! place, [`execute`] dispatches by exact first-token match.
//! Zero heap allocation - all fixed-size buffers.

pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod error;
pub mod line_buffer;
pub mod parser;

pub use commands::{command_names, execute, find, print_usage, CommandDescriptor, CommandKind, COMMANDS};
pub use console::{Console, VERSION};
pub use error::ConsoleError;
pub use line_buffer::{is_terminator, LineBuffer, LineReady, READ_BUFFER_SIZE};
pub use parser::{parse_int, tokenize, TokenList, ARGC_MAX};
