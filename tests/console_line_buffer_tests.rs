//! Line accumulator tests

use proptest::prelude::*;
use serial_pin_console::console::line_buffer::{LineBuffer, LineReady, READ_BUFFER_SIZE};

fn feed_str(buf: &mut LineBuffer, s: &str) -> Option<LineReady> {
    let mut ready = None;
    for b in s.bytes() {
        ready = buf.feed_byte(b);
    }
    ready
}

#[test]
fn test_plain_bytes_advance_cursor() {
    let mut buf = LineBuffer::new();

    assert_eq!(feed_str(&mut buf, "echo"), None);
    assert_eq!(buf.cursor(), 4);
    assert_eq!(buf.as_bytes(), b"echo");
}

#[test]
fn test_carriage_return_completes_line() {
    let mut buf = LineBuffer::new();
    let ready = feed_str(&mut buf, "dr 5\r").unwrap();

    assert_eq!(ready, LineReady { len: 4, truncated: false, carried: None });
    // Terminator replaced in place, cursor not advanced
    assert_eq!(&buf.line_mut()[..5], b"dr 5\0");
    assert_eq!(buf.cursor(), 4);
}

#[test]
fn test_line_feed_and_nul_terminate() {
    for term in [b'\n', 0u8] {
        let mut buf = LineBuffer::new();
        buf.feed_byte(b'x');

        let ready = buf.feed_byte(term).unwrap();
        assert_eq!(ready.len, 1);
        assert_eq!(buf.line_mut()[1], 0);
    }
}

#[test]
fn test_empty_line() {
    let mut buf = LineBuffer::new();
    let ready = buf.feed_byte(b'\r').unwrap();

    assert_eq!(ready.len, 0);
    assert!(buf.is_empty());
}

#[test]
fn test_full_buffer_forces_termination() {
    let mut buf = LineBuffer::new();

    for _ in 0..READ_BUFFER_SIZE {
        assert_eq!(buf.feed_byte(b'a'), None);
    }
    assert_eq!(buf.cursor(), READ_BUFFER_SIZE);

    let ready = buf.feed_byte(b'z').unwrap();
    assert_eq!(
        ready,
        LineReady { len: READ_BUFFER_SIZE - 1, truncated: true, carried: Some(b'z') }
    );
    assert_eq!(buf.line_mut()[READ_BUFFER_SIZE - 1], 0);
    assert_eq!(buf.line_mut()[READ_BUFFER_SIZE - 2], b'a');
    assert_eq!(buf.cursor(), READ_BUFFER_SIZE);
}

#[test]
fn test_reset_rearms() {
    let mut buf = LineBuffer::new();
    feed_str(&mut buf, "aw 3 100\n").unwrap();

    buf.reset();
    assert_eq!(buf.cursor(), 0);
    assert!(buf.is_empty());

    assert_eq!(feed_str(&mut buf, "ar"), None);
    assert_eq!(buf.as_bytes(), b"ar");
}

#[test]
fn test_feed_without_reset_overwrites_terminator() {
    let mut buf = LineBuffer::new();
    feed_str(&mut buf, "ab\r").unwrap();

    // Not re-armed: the next byte lands on the terminator slot
    assert_eq!(buf.feed_byte(b'c'), None);
    assert_eq!(buf.as_bytes(), b"abc");
}

#[test]
fn test_capacity() {
    let buf = LineBuffer::new();
    assert_eq!(buf.capacity(), 64);
}

proptest! {
    #[test]
    fn cursor_never_exceeds_capacity(bytes in proptest::collection::vec(any::<u8>(), 0..400)) {
        let mut buf = LineBuffer::new();

        for b in bytes {
            if let Some(ready) = buf.feed_byte(b) {
                prop_assert!(ready.len < READ_BUFFER_SIZE);
                prop_assert_eq!(buf.line_mut()[ready.len], 0);
                buf.reset();
            }
            prop_assert!(buf.cursor() <= READ_BUFFER_SIZE);
        }
    }
}
