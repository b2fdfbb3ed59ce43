//! Input trimming and character classification.
//!
//! Only `' '` and `'\n'` are trimmed from either end. Everything else that
//! is not a letter or a space survives trimming and is skipped later by
//! [`classify`].

/// Half-open range `[start, end)` of the input that is worth encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSpan {
    pub start: usize,
    pub end: usize,
}

impl InputSpan {
    /// True when trimming left nothing to encode.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of bytes inside the span.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Index of the last byte, if any.
    #[inline]
    pub fn last(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }
}

/// What a single input byte means to the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Class {
    /// A letter, already uppercased.
    Letter(u8),
    /// Word separator.
    Space,
    /// Skipped silently.
    Invalid,
}

#[inline]
fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\n'
}

/// First index that is neither space nor newline.
///
/// Returns `input.len()` for blank input.
pub fn find_start(input: &[u8]) -> usize {
    input
        .iter()
        .position(|&b| !is_blank(b))
        .unwrap_or(input.len())
}

/// Last index that is neither space nor newline, scanning backward.
pub fn find_end(input: &[u8]) -> Option<usize> {
    input.iter().rposition(|&b| !is_blank(b))
}

/// Trim leading and trailing spaces and newlines.
pub fn trim(input: &[u8]) -> InputSpan {
    let start = find_start(input);
    let end = find_end(input).map_or(start, |last| last + 1);

    InputSpan {
        start,
        end: end.max(start),
    }
}

/// Classify one byte.
#[inline]
pub fn classify(byte: u8) -> Class {
    match byte {
        b'A'..=b'Z' => Class::Letter(byte),
        b'a'..=b'z' => Class::Letter(byte.to_ascii_uppercase()),
        b' ' => Class::Space,
        _ => Class::Invalid,
    }
}
