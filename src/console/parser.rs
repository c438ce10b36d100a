//! Command line tokenizer
//!
//! Splits the line buffer in place: separators and the terminator are
//! overwritten with NUL, tokens are borrowed views into the buffer.
//! Only the ASCII space separates tokens. No quoting, no escapes.

use heapless::Vec;

use super::line_buffer::is_terminator;
use super::ConsoleError;

/// Maximum tokens per line (command name + 7 arguments)
pub const ARGC_MAX: usize = 8;

/// Tokens of one line, valid until the buffer is written again
#[derive(Debug, Clone, Default)]
pub struct TokenList<'a> {
    tokens: Vec<&'a str, ARGC_MAX>,
    dropped: usize,
}

impl<'a> TokenList<'a> {
    /// Number of tokens, `0..=ARGC_MAX`
    pub fn argc(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The command name (first token)
    pub fn name(&self) -> Option<&'a str> {
        self.tokens.first().copied()
    }

    /// Tokens after the command name
    pub fn args(&self) -> &[&'a str] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    /// Get token by index (0 is the command name)
    pub fn get(&self, idx: usize) -> Option<&'a str> {
        self.tokens.get(idx).copied()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Words past the `ARGC_MAX` cap that were discarded
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Tokenize a NUL/CR/LF-terminated line in place.
///
/// Runs of spaces collapse into one boundary and tokens are never empty.
/// Words beyond [`ARGC_MAX`] are counted in [`TokenList::dropped`] but not
/// returned. A buffer with no terminator anywhere is rejected with
/// [`ConsoleError::LineWithoutEnd`].
pub fn tokenize<const N: usize>(line: &mut [u8; N]) -> Result<TokenList<'_>, ConsoleError> {
    let mut spans: Vec<(usize, usize), ARGC_MAX> = Vec::new();
    let mut dropped = 0;
    let mut start: Option<usize> = None;
    let mut terminated = false;

    for i in 0..N {
        let byte = line[i];

        if is_terminator(byte) || byte == b' ' {
            line[i] = 0;

            if let Some(s) = start.take() {
                if spans.push((s, i)).is_err() {
                    dropped += 1;
                }
            }

            if byte != b' ' {
                terminated = true;
                break;
            }
            continue;
        }

        if start.is_none() {
            start = Some(i);
        }
    }

    if !terminated {
        return Err(ConsoleError::LineWithoutEnd);
    }

    let line: &[u8; N] = line;
    let mut tokens = Vec::new();
    // Any non-UTF-8 token rejects the whole line, even one that would
    // otherwise fall through to the usage listing as an unknown name
    for (s, e) in spans {
        let token = core::str::from_utf8(&line[s..e]).map_err(|_| ConsoleError::InvalidEncoding)?;
        // Cannot overflow: spans is bounded by the same capacity
        let _ = tokens.push(token);
    }

    Ok(TokenList { tokens, dropped })
}

/// Lenient decimal parse in the manner of C `atoi`.
///
/// Leading whitespace and one sign are accepted, digits are read up to the
/// first non-digit, and input without digits yields 0. Overflow wraps.
/// Malformed numbers are not reported as errors.
pub fn parse_int(s: &str) -> i32 {
    let trimmed = s.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i32, |acc, d| acc.wrapping_mul(10).wrapping_add(i32::from(d - b'0')));

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}
