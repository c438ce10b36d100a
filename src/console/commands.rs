//! Command registry and handlers

use core::fmt::Write;

use super::parser::{parse_int, TokenList};
use super::ConsoleError;
use crate::hal::{Pin, PinIo, PinMode};

/// Built-in commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Print arguments space-joined
    Echo,
    /// Configure a pin as output and drive it
    DigitalWrite,
    /// Print the logic level of a pin
    DigitalRead,
    /// Set PWM duty on a pin
    AnalogWrite,
    /// Print the ADC reading of a pin
    AnalogRead,
}

impl CommandKind {
    /// Arguments required after the command name
    pub const fn min_args(self) -> usize {
        match self {
            Self::Echo | Self::DigitalRead | Self::AnalogRead => 1,
            Self::DigitalWrite | Self::AnalogWrite => 2,
        }
    }

    /// Run the handler with the arguments following the command name
    pub fn run(
        self,
        args: &[&str],
        out: &mut dyn Write,
        pins: &mut dyn PinIo,
    ) -> Result<(), ConsoleError> {
        if args.len() < self.min_args() {
            return Err(ConsoleError::MissingArg);
        }

        match self {
            Self::Echo => cmd_echo(args, out),
            Self::DigitalWrite => cmd_dw(args, pins),
            Self::DigitalRead => cmd_dr(args, out, pins),
            Self::AnalogWrite => cmd_aw(args, pins),
            Self::AnalogRead => cmd_ar(args, out, pins),
        }
    }
}

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub usage: &'static str,
    pub kind: CommandKind,
}

/// All available commands, in lookup order
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "echo", usage: "echo <prm>            :display prm", kind: CommandKind::Echo },
    CommandDescriptor { name: "dw", usage: "dw <pin> <value(0/1)> :digitalWrite(pin,value)", kind: CommandKind::DigitalWrite },
    CommandDescriptor { name: "dr", usage: "dr <pin>              :digitalRead(pin)", kind: CommandKind::DigitalRead },
    CommandDescriptor { name: "aw", usage: "aw <pin> <dec>        :analogWrite(pin,dec)", kind: CommandKind::AnalogWrite },
    CommandDescriptor { name: "ar", usage: "ar <pin>              :analogRead(pin)", kind: CommandKind::AnalogRead },
];

/// Look up a command by exact, case-sensitive name
pub fn find(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Get all command names
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

/// Print every usage line
pub fn print_usage(out: &mut dyn Write) {
    for c in COMMANDS {
        let _ = writeln!(out, "{}", c.usage);
    }
}

/// Execute a tokenized line.
///
/// Unknown commands and empty lines print every usage line. A failing
/// handler prints its own usage line. The error is returned either way.
pub fn execute(
    tokens: &TokenList<'_>,
    out: &mut dyn Write,
    pins: &mut dyn PinIo,
) -> Result<(), ConsoleError> {
    let Some(cmd) = tokens.name().and_then(find) else {
        print_usage(out);
        return Err(ConsoleError::UnknownCommand);
    };

    let result = cmd.kind.run(tokens.args(), out, pins);
    if result.is_err() {
        let _ = writeln!(out, "{}", cmd.usage);
    }
    result
}

/// Pin numbers wrap like the firmware's 16-bit pin variable
fn pin_arg(arg: &str) -> Pin {
    parse_int(arg) as Pin
}

// --- Command Implementations ---
// Argument counts are checked by `CommandKind::run`.

fn cmd_echo(args: &[&str], out: &mut dyn Write) -> Result<(), ConsoleError> {
    let (first, rest) = args.split_first().ok_or(ConsoleError::MissingArg)?;

    let _ = write!(out, "{}", first);
    for arg in rest {
        let _ = write!(out, " {}", arg);
    }
    let _ = writeln!(out);

    Ok(())
}

fn cmd_dw(args: &[&str], pins: &mut dyn PinIo) -> Result<(), ConsoleError> {
    let [pin, value, ..] = args else {
        return Err(ConsoleError::MissingArg);
    };
    let pin = pin_arg(pin);
    let high = parse_int(value) != 0;

    pins.set_mode(pin, PinMode::Output)?;
    pins.digital_write(pin, high)?;

    Ok(())
}

fn cmd_dr(args: &[&str], out: &mut dyn Write, pins: &mut dyn PinIo) -> Result<(), ConsoleError> {
    let pin = pin_arg(args.first().ok_or(ConsoleError::MissingArg)?);

    let level = pins.digital_read(pin)?;
    let _ = writeln!(out, "{}", u8::from(level));

    Ok(())
}

fn cmd_aw(args: &[&str], pins: &mut dyn PinIo) -> Result<(), ConsoleError> {
    let [pin, value, ..] = args else {
        return Err(ConsoleError::MissingArg);
    };

    pins.analog_write(pin_arg(pin), parse_int(value) as u16)?;

    Ok(())
}

fn cmd_ar(args: &[&str], out: &mut dyn Write, pins: &mut dyn PinIo) -> Result<(), ConsoleError> {
    let pin = pin_arg(args.first().ok_or(ConsoleError::MissingArg)?);

    let value = pins.analog_read(pin)?;
    let _ = writeln!(out, "{}", value);

    Ok(())
}
