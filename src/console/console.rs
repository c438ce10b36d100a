//! Console session tying the accumulator, tokenizer and dispatcher together

use core::fmt::Write;

use super::{execute, is_terminator, tokenize, ConsoleError, LineBuffer, LineReady};
use crate::config::ConsoleConfig;
use crate::hal::{PinIo, SerialRx};
use crate::logging::{timestamp_us, LogStream};
use crate::{rt_debug, rt_error, rt_info, rt_trace, rt_warn};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// One console session: line state plus where its logs go.
///
/// All state lives here, so independent sessions can run side by side.
pub struct Console<'a> {
    line: LineBuffer,
    config: ConsoleConfig,
    log: &'a LogStream,
    lines: u32,
}

impl<'a> Console<'a> {
    /// Create a session with an empty line
    pub const fn new(config: ConsoleConfig, log: &'a LogStream) -> Self {
        Self {
            line: LineBuffer::new(),
            config,
            log,
            lines: 0,
        }
    }

    /// Poll the port once.
    ///
    /// Reads at most one byte; returns `None` straight away when nothing
    /// is waiting or the line is not finished yet.
    pub fn poll<T: SerialRx + Write>(
        &mut self,
        port: &mut T,
        pins: &mut dyn PinIo,
    ) -> Option<Result<(), ConsoleError>> {
        let byte = port.read_byte()?;
        self.process_byte(byte, port, pins)
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a line was completed and dispatched, None if
    /// more input is needed.
    pub fn process_byte(
        &mut self,
        byte: u8,
        out: &mut dyn Write,
        pins: &mut dyn PinIo,
    ) -> Option<Result<(), ConsoleError>> {
        let ready = self.line.feed_byte(byte)?;

        if self.config.echo_newline {
            let _ = writeln!(out);
        }

        let result = self.run_line(&ready, out, pins);

        self.line.reset();
        self.lines = self.lines.wrapping_add(1);

        // A byte that hit the full buffer opens the next line. A terminator
        // has nothing left to end: its line was already completed by force.
        if let Some(carried) = ready.carried.filter(|b| !is_terminator(*b)) {
            let _ = self.line.feed_byte(carried);
        }

        self.print_prompt(out);
        Some(result)
    }

    fn run_line(
        &mut self,
        ready: &LineReady,
        out: &mut dyn Write,
        pins: &mut dyn PinIo,
    ) -> Result<(), ConsoleError> {
        let log = self.log;

        if ready.truncated {
            rt_warn!(log, timestamp_us(), "line truncated at {} bytes", ready.len);
        }

        let tokens = match tokenize(self.line.line_mut()) {
            Ok(tokens) => tokens,
            Err(e) => {
                rt_error!(log, timestamp_us(), "tokenize failed: {}", e);
                let _ = writeln!(out, "[error] {}", e);
                return Err(e);
            }
        };

        if tokens.dropped() > 0 {
            rt_warn!(log, timestamp_us(), "{} argument(s) over limit dropped", tokens.dropped());
        }

        let name = tokens.name().unwrap_or("");
        let result = execute(&tokens, out, pins);

        match result {
            Ok(()) => rt_trace!(log, timestamp_us(), "{} ok ({} args)", name, tokens.args().len()),
            Err(ConsoleError::UnknownCommand) => {
                rt_debug!(log, timestamp_us(), "unknown command '{}'", name)
            }
            Err(e) => rt_info!(log, timestamp_us(), "{} failed: {}", name, e),
        }

        result
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Write) {
        let _ = write!(out, "{}", self.config.prompt);
    }

    /// Print welcome banner, if enabled, followed by the prompt
    pub fn print_banner(&self, out: &mut dyn Write) {
        if self.config.banner {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", VERSION);
        }
        self.print_prompt(out);
    }

    /// Write position of the line being entered
    pub fn cursor(&self) -> usize {
        self.line.cursor()
    }

    /// Lines completed since startup
    pub fn lines_processed(&self) -> u32 {
        self.lines
    }
}
