//! Transcript buffer: drain semantics and overflow

use pretty_assertions::assert_eq;
use rust_morse_led::transcript::{TranscriptBuffer, TRANSCRIPT_CAPACITY};

#[test]
fn test_second_drain_returns_zero() {
    let buffer = TranscriptBuffer::<16>::new();
    buffer.push_all(b"... ");

    let mut out = [0u8; 16];
    assert_eq!(buffer.drain_into(&mut out), 4);
    assert_eq!(&out[..4], b"... ");
    assert_eq!(buffer.drain_into(&mut out), 0);
}

#[test]
fn test_drain_of_empty_buffer() {
    let buffer: TranscriptBuffer = TranscriptBuffer::new();
    let mut out = [0u8; 8];
    assert_eq!(buffer.drain_into(&mut out), 0);
    assert_eq!(buffer.capacity(), TRANSCRIPT_CAPACITY);
}

#[test]
fn test_overflow_keeps_oldest_and_counts_drops() {
    let buffer = TranscriptBuffer::<8>::new();
    let kept = buffer.push_all(b"---...---");

    assert_eq!(kept, 8);
    assert_eq!(buffer.dropped(), 1);
    assert_eq!(buffer.len(), 8);

    let mut out = [0u8; 32];
    assert_eq!(buffer.drain_into(&mut out), 8);
    assert_eq!(&out[..8], b"---...--");

    buffer.reset_dropped();
    assert_eq!(buffer.dropped(), 0);
    assert!(buffer.push(b'.'));
}

#[test]
fn test_partial_drain_discards_the_rest() {
    let buffer = TranscriptBuffer::<16>::new();
    buffer.push_all(b".- -... \n");

    let mut out = [0u8; 3];
    assert_eq!(buffer.drain_into(&mut out), 3);
    assert_eq!(&out, b".- ");

    assert!(buffer.is_empty());
    let mut rest = [0u8; 16];
    assert_eq!(buffer.drain_into(&mut rest), 0);
}
