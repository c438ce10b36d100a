//! Tokenizer tests

use proptest::prelude::*;
use serial_pin_console::console::parser::{tokenize, ARGC_MAX};
use serial_pin_console::console::{ConsoleError, READ_BUFFER_SIZE};

/// Line buffer holding `s` followed by a NUL terminator
fn line(s: &str) -> [u8; READ_BUFFER_SIZE] {
    assert!(s.len() < READ_BUFFER_SIZE);
    let mut buf = [b'#'; READ_BUFFER_SIZE];
    buf[..s.len()].copy_from_slice(s.as_bytes());
    buf[s.len()] = 0;
    buf
}

#[test]
fn test_empty_line() {
    let mut buf = line("");
    let tokens = tokenize(&mut buf).unwrap();

    assert_eq!(tokens.argc(), 0);
    assert_eq!(tokens.name(), None);
    assert!(tokens.args().is_empty());
}

#[test]
fn test_only_spaces() {
    let mut buf = line("   ");
    assert_eq!(tokenize(&mut buf).unwrap().argc(), 0);
}

#[test]
fn test_two_tokens() {
    let mut buf = line("echo hi");
    let tokens = tokenize(&mut buf).unwrap();

    assert_eq!(tokens.argc(), 2);
    assert_eq!(tokens.name(), Some("echo"));
    assert_eq!(tokens.args(), &["hi"]);
}

#[test]
fn test_collapses_space_runs() {
    let mut buf = line("  dw   13    1  ");
    let tokens = tokenize(&mut buf).unwrap();

    assert_eq!(tokens.as_slice(), &["dw", "13", "1"]);
}

#[test]
fn test_tab_is_not_a_separator() {
    let mut buf = line("echo a\tb");
    let tokens = tokenize(&mut buf).unwrap();

    assert_eq!(tokens.as_slice(), &["echo", "a\tb"]);
}

#[test]
fn test_carriage_return_terminates() {
    let mut buf = [b'#'; READ_BUFFER_SIZE];
    buf[..8].copy_from_slice(b"ar 2\rxyz");
    let tokens = tokenize(&mut buf).unwrap();

    assert_eq!(tokens.as_slice(), &["ar", "2"]);
}

#[test]
fn test_exactly_max_tokens() {
    let mut buf = line("a b c d e f g h");
    let tokens = tokenize(&mut buf).unwrap();

    assert_eq!(tokens.argc(), ARGC_MAX);
    assert_eq!(tokens.dropped(), 0);
    assert_eq!(tokens.get(7), Some("h"));
}

#[test]
fn test_token_cap_keeps_eight() {
    let mut buf = line("echo 1 2 3 4 5 6 7 8 9");
    let tokens = tokenize(&mut buf).unwrap();

    // The eighth token is kept; only words past the cap are dropped
    assert_eq!(tokens.argc(), 8);
    assert_eq!(tokens.args(), &["1", "2", "3", "4", "5", "6", "7"]);
    assert_eq!(tokens.dropped(), 2);
}

#[test]
fn test_line_without_end() {
    let mut buf = [b'a'; READ_BUFFER_SIZE];
    buf[10] = b' ';

    assert_eq!(tokenize(&mut buf).unwrap_err(), ConsoleError::LineWithoutEnd);
}

#[test]
fn test_invalid_utf8_rejected() {
    let mut buf = line("echo ");
    buf[5] = 0xFF;
    buf[6] = 0;

    assert_eq!(tokenize(&mut buf).unwrap_err(), ConsoleError::InvalidEncoding);
}

#[test]
fn test_tokens_are_views_into_buffer() {
    let mut buf = line("dr 7");
    let start = buf.as_ptr() as usize;
    let tokens = tokenize(&mut buf).unwrap();

    assert_eq!(tokens.get(1).unwrap().as_ptr() as usize, start + 3);
}

proptest! {
    #[test]
    fn tokens_match_nonempty_words(s in "[ a-z0-9]{0,63}") {
        let mut buf = line(&s);
        let tokens = tokenize(&mut buf).unwrap();
        let words: Vec<&str> = s.split(' ').filter(|w| !w.is_empty()).collect();

        prop_assert!(tokens.argc() <= ARGC_MAX);
        prop_assert_eq!(tokens.argc() + tokens.dropped(), words.len());
        prop_assert_eq!(tokens.as_slice(), &words[..tokens.argc()]);
        for t in tokens.as_slice() {
            prop_assert!(!t.is_empty());
            prop_assert!(!t.contains(' '));
        }
    }
}
