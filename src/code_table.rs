//! International Morse code table.
//!
//! Each letter is a 16-bit pattern read most-significant bit first:
//! a run of one set bit is a dot, a run of three set bits is a dash,
//! single clear bits separate elements. Trailing clear bits are padding.
//!
//! ```text
//! S = 0xA800 = 1010 1000 0000 0000  →  1 0 1 0 1        →  . . .
//! O = 0xEEE0 = 1110 1110 1110 0000  →  111 0 111 0 111  →  - - -
//! ```

/// Letter patterns, indexed by `letter - b'A'`.
pub static MORSE_CODES: [u16; 26] = [
    0xB800, // A 1011 1
    0xEA80, // B 1110 1010 1
    0xEBA0, // C 1110 1011 101
    0xEA00, // D 1110 101
    0x8000, // E 1
    0xAE80, // F 1010 1110 1
    0xEE80, // G 1110 1110 1
    0xAA00, // H 1010 101
    0xA000, // I 101
    0xBBB8, // J 1011 1011 1011 1
    0xEB80, // K 1110 1011 1
    0xBA80, // L 1011 1010 1
    0xEE00, // M 1110 111
    0xE800, // N 1110 1
    0xEEE0, // O 1110 1110 111
    0xBBA0, // P 1011 1011 101
    0xEEB8, // Q 1110 1110 1011 1
    0xBA00, // R 1011 101
    0xA800, // S 1010 1
    0xE000, // T 111
    0xAE00, // U 1010 111
    0xAB80, // V 1010 1011 1
    0xBB80, // W 1011 1011 1
    0xEAE0, // X 1110 1010 111
    0xEBB8, // Y 1110 1011 1011 1
    0xEEA0, // Z 1110 1110 101
];

/// One timed element of a letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    Dot,
    Dash,
}

impl Element {
    /// Key-down length in dot units.
    #[inline]
    pub const fn units(self) -> u8 {
        match self {
            Element::Dot => 1,
            Element::Dash => 3,
        }
    }

    /// Transcript symbol for this element.
    #[inline]
    pub const fn mark(self) -> &'static [u8] {
        match self {
            Element::Dot => b".",
            Element::Dash => b"-",
        }
    }
}

/// A letter together with its bit pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterCode {
    letter: u8,
    pattern: u16,
}

impl LetterCode {
    /// The uppercase ASCII letter.
    #[inline]
    pub const fn letter(&self) -> u8 {
        self.letter
    }

    /// Raw pattern, MSB first, zero padded.
    #[inline]
    pub const fn pattern(&self) -> u16 {
        self.pattern
    }

    /// Number of pattern bits up to and including the last set bit.
    #[inline]
    pub const fn significant_bits(&self) -> u32 {
        16 - self.pattern.trailing_zeros()
    }

    /// Walk the pattern and yield its elements in order.
    #[inline]
    pub fn elements(&self) -> Elements {
        Elements { bits: self.pattern }
    }
}

/// Look up the code for an uppercase letter.
///
/// The caller must pass `b'A'..=b'Z'`; [`crate::sanitize::classify`] is the
/// gatekeeper for that.
#[inline]
pub fn lookup(letter: u8) -> LetterCode {
    debug_assert!(letter.is_ascii_uppercase(), "lookup outside A-Z: {letter:#04x}");
    LetterCode {
        letter,
        pattern: MORSE_CODES[usize::from(letter - b'A')],
    }
}

/// Iterator over the elements of a pattern.
///
/// Consumes bits from the top; stops as soon as the remaining bits are all
/// zero, so the padding is never visited.
#[derive(Clone, Debug)]
pub struct Elements {
    bits: u16,
}

impl Iterator for Elements {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        if self.bits == 0 {
            return None;
        }

        let run = self.bits.leading_ones();
        debug_assert!(run == 1 || run == 3, "illegal run length {run}");

        // Drop the run and the separating zero bit (if any).
        self.bits = self.bits.checked_shl(run + 1).unwrap_or(0);

        Some(if run >= 3 { Element::Dash } else { Element::Dot })
    }
}
