//! Pulse emitter.
//!
//! Pure logic: turns one letter into the timing events that key it.
//! Nothing here touches hardware or sleeps; [`crate::keyer::Keyer`]
//! plays the events back in real time.
//!
//! # Timing (in dot units)
//!
//! ```text
//! dot        ▔ 1
//! dash       ▔▔▔ 3
//! element    _ 1      (between elements of one letter)
//! letter     ___ 3    (after the last element, if another letter follows)
//! word       _______ 7
//! ```

use core::iter::Peekable;

use crate::code_table::{Elements, LetterCode};

/// Key-up time between elements of one letter.
pub const ELEMENT_GAP_UNITS: u8 = 1;

/// Dash length; also the gap between letters.
pub const DASH_UNITS: u8 = 3;

/// Key-up time between letters of one word.
pub const LETTER_GAP_UNITS: u8 = DASH_UNITS;

/// Key-up time between words.
pub const WORD_GAP_UNITS: u8 = 7;

/// Transcript marks for a word gap.
pub const WORD_GAP_MARKS: &[u8] = b"   ";

/// Transcript mark written after every letter.
pub const LETTER_SEPARATOR: &[u8] = b" ";

/// Transcript mark closing a message.
pub const END_OF_MESSAGE: &[u8] = b"\n";

/// One timing event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pulse {
    /// Key down for `units` dot lengths.
    On { units: u8 },
    /// Key up, record `marks` at the release edge, then hold for `units`.
    Off { units: u8, marks: &'static [u8] },
    /// Transcript only, the key is left alone.
    Mark(&'static [u8]),
}

impl Pulse {
    /// Duration of this event in dot units.
    #[inline]
    pub fn units(&self) -> u8 {
        match *self {
            Pulse::On { units } | Pulse::Off { units, .. } => units,
            Pulse::Mark(_) => 0,
        }
    }

    /// Transcript bytes recorded by this event.
    #[inline]
    pub fn marks(&self) -> &'static [u8] {
        match *self {
            Pulse::On { .. } => b"",
            Pulse::Off { marks, .. } | Pulse::Mark(marks) => marks,
        }
    }
}

/// Build the pulses of one letter.
///
/// `insert_trailing_gap` holds the key up for a letter gap after the last
/// element; it is false for the last letter of a word or message.
pub fn emit_letter(code: LetterCode, insert_trailing_gap: bool) -> LetterPulses {
    LetterPulses {
        elements: code.elements().peekable(),
        release: None,
        trailing_gap: insert_trailing_gap,
    }
}

/// Iterator returned by [`emit_letter`].
#[derive(Clone, Debug)]
pub struct LetterPulses {
    elements: Peekable<Elements>,
    release: Option<Pulse>,
    trailing_gap: bool,
}

impl Iterator for LetterPulses {
    type Item = Pulse;

    fn next(&mut self) -> Option<Pulse> {
        if let Some(release) = self.release.take() {
            return Some(release);
        }

        let element = self.elements.next()?;

        let gap = if self.elements.peek().is_some() {
            ELEMENT_GAP_UNITS
        } else if self.trailing_gap {
            LETTER_GAP_UNITS
        } else {
            0
        };

        self.release = Some(Pulse::Off {
            units: gap,
            marks: element.mark(),
        });

        Some(Pulse::On {
            units: element.units(),
        })
    }
}
