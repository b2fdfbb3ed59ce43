//! Message encoder.
//!
//! Pure state machine over a trimmed input: yields every [`Pulse`] of a
//! message, word gaps and transcript separators included. Fully testable on
//! host; the [`crate::keyer::Keyer`] adds the real-time part.
//!
//! # States
//!
//! ```text
//!            letter            pulses exhausted
//! Scanning ─────────▶ Emitting ─────────────────▶ Scanning (+ " ")
//!    │
//!    │ end of span
//!    ▼
//! Terminator (+ "\n") ──▶ Done
//! ```

use crate::code_table::lookup;
use crate::config::TerminatorPolicy;
use crate::pulse::{
    emit_letter, LetterPulses, Pulse, END_OF_MESSAGE, LETTER_SEPARATOR, WORD_GAP_MARKS,
    WORD_GAP_UNITS,
};
use crate::sanitize::{classify, trim, Class, InputSpan};

#[derive(Clone, Debug)]
enum State {
    Scanning,
    Emitting(LetterPulses),
    Terminator,
    Done,
}

/// What one encoding pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Letters keyed.
    pub letters: u32,
    /// Words keyed (a word is a run of letters between spaces).
    pub words: u32,
    /// Letter and space bytes processed; skipped bytes do not count.
    pub consumed: usize,
}

/// Iterator over the pulses of one message.
#[derive(Clone, Debug)]
pub struct MessagePulses<'a> {
    input: &'a [u8],
    span: InputSpan,
    idx: usize,
    space_pending: bool,
    state: State,
    policy: TerminatorPolicy,
    summary: EncodeSummary,
}

/// Encode `input` into its pulse sequence.
pub fn encode(input: &[u8], policy: TerminatorPolicy) -> MessagePulses<'_> {
    let span = trim(input);

    MessagePulses {
        input,
        span,
        idx: span.start,
        space_pending: false,
        state: if span.is_empty() { State::Done } else { State::Scanning },
        policy,
        summary: EncodeSummary::default(),
    }
}

impl MessagePulses<'_> {
    /// The trimmed span being encoded.
    #[inline]
    pub fn span(&self) -> InputSpan {
        self.span
    }

    /// Progress so far; final once the iterator is exhausted.
    #[inline]
    pub fn summary(&self) -> EncodeSummary {
        self.summary
    }

    /// Classification of the next non-invalid byte at or after `from`,
    /// without consuming anything.
    fn look_ahead(&self, from: usize) -> Option<Class> {
        self.input[from..self.span.end]
            .iter()
            .map(|&b| classify(b))
            .find(|class| *class != Class::Invalid)
    }

    /// Advance the scan to the next letter, returning the pulse that opens
    /// it (word gap or first element) or `None` at end of span.
    fn scan(&mut self) -> Option<Pulse> {
        while self.idx < self.span.end {
            let byte = self.input[self.idx];
            self.idx += 1;

            let letter = match classify(byte) {
                Class::Invalid => continue,
                Class::Space => {
                    self.space_pending = true;
                    self.summary.consumed += 1;
                    continue;
                }
                Class::Letter(letter) => letter,
            };

            let trailing_gap = matches!(self.look_ahead(self.idx), Some(Class::Letter(_)));
            let mut pulses = emit_letter(lookup(letter), trailing_gap);

            if self.summary.letters == 0 || self.space_pending {
                self.summary.words += 1;
            }
            self.summary.letters += 1;
            self.summary.consumed += 1;

            if self.space_pending {
                self.space_pending = false;
                self.state = State::Emitting(pulses);
                return Some(Pulse::Off {
                    units: WORD_GAP_UNITS,
                    marks: WORD_GAP_MARKS,
                });
            }

            let first = pulses.next();
            self.state = State::Emitting(pulses);
            return first;
        }

        self.state = State::Terminator;
        None
    }
}

impl Iterator for MessagePulses<'_> {
    type Item = Pulse;

    fn next(&mut self) -> Option<Pulse> {
        loop {
            match &mut self.state {
                State::Scanning => {
                    if let Some(pulse) = self.scan() {
                        return Some(pulse);
                    }
                }
                State::Emitting(pulses) => {
                    if let Some(pulse) = pulses.next() {
                        return Some(pulse);
                    }
                    self.state = State::Scanning;
                    return Some(Pulse::Mark(LETTER_SEPARATOR));
                }
                State::Terminator => {
                    self.state = State::Done;
                    let terminate = match self.policy {
                        TerminatorPolicy::AfterScan => true,
                        TerminatorPolicy::AfterLetters => self.summary.letters > 0,
                    };
                    if terminate {
                        return Some(Pulse::Mark(END_OF_MESSAGE));
                    }
                }
                State::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(input: &[u8]) -> Vec<u8> {
        encode(input, TerminatorPolicy::AfterScan)
            .flat_map(|p| p.marks().iter().copied())
            .collect()
    }

    #[test]
    fn test_look_ahead_skips_invalid() {
        let enc = encode(b"A1!B", TerminatorPolicy::AfterScan);
        assert_eq!(enc.look_ahead(1), Some(Class::Letter(b'B')));

        let enc = encode(b"A1 B", TerminatorPolicy::AfterScan);
        assert_eq!(enc.look_ahead(1), Some(Class::Space));

        let enc = encode(b"A12", TerminatorPolicy::AfterScan);
        assert_eq!(enc.look_ahead(1), None);
    }

    #[test]
    fn test_single_letter() {
        assert_eq!(transcript(b"e"), b". \n");
    }

    #[test]
    fn test_space_after_untrimmed_tab_still_gaps() {
        // The tab survives trimming, so the space behind it is inside the span
        assert_eq!(transcript(b"\t A"), b"   .- \n");
    }

    #[test]
    fn test_dangling_space_before_invalid_tail() {
        let mut enc = encode(b"E !", TerminatorPolicy::AfterScan);
        let pulses: Vec<_> = enc.by_ref().collect();
        assert_eq!(
            pulses,
            vec![
                Pulse::On { units: 1 },
                Pulse::Off { units: 0, marks: b"." },
                Pulse::Mark(b" "),
                Pulse::Mark(b"\n"),
            ]
        );
        assert_eq!(enc.summary(), EncodeSummary { letters: 1, words: 1, consumed: 2 });
    }

    #[test]
    fn test_summary_counts_words() {
        let mut enc = encode(b"HI  THERE X", TerminatorPolicy::AfterScan);
        enc.by_ref().for_each(drop);
        assert_eq!(enc.summary(), EncodeSummary { letters: 8, words: 3, consumed: 11 });
    }
}
