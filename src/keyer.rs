//! Keyer: plays [`Pulse`] events on real hardware.
//!
//! This is the only place that waits. The encoder decides *what* to key,
//! the keyer decides *when*: it switches the actuator, records transcript
//! marks at the release edge and sleeps for the event's duration.
//!
//! The keyer keeps its own clock (`elapsed_ms`), the sum of all waits since
//! it was created. Log timestamps use it, so they read as signalling time.

use crate::hal::{Actuator, Delay};
use crate::pulse::Pulse;
use crate::transcript::TranscriptBuffer;

/// Outcome of playing one pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayReport {
    /// Marks that did not fit in the transcript.
    pub dropped_marks: usize,
}

/// Real-time pulse player.
pub struct Keyer<A: Actuator, D: Delay> {
    actuator: A,
    delay: D,
    dot_ms: u32,
    elapsed_ms: u64,
    key_down: bool,
}

impl<A: Actuator, D: Delay> Keyer<A, D> {
    pub fn new(actuator: A, delay: D, dot_ms: u32) -> Self {
        Self {
            actuator,
            delay,
            dot_ms,
            elapsed_ms: 0,
            key_down: false,
        }
    }

    /// Change the dot duration (takes effect on the next pulse).
    #[inline]
    pub fn set_dot_ms(&mut self, dot_ms: u32) {
        self.dot_ms = dot_ms;
    }

    #[inline]
    pub fn dot_ms(&self) -> u32 {
        self.dot_ms
    }

    /// Milliseconds spent waiting since creation.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    #[inline]
    pub fn is_key_down(&self) -> bool {
        self.key_down
    }

    /// Play one pulse.
    ///
    /// An actuator error is returned, but only after the marks were recorded
    /// and the wait elapsed, so timing and transcript stay intact.
    pub fn play<const N: usize>(
        &mut self,
        pulse: Pulse,
        transcript: &TranscriptBuffer<N>,
    ) -> Result<PlayReport, A::Error> {
        let switched = match pulse {
            Pulse::On { .. } => self.switch(true),
            Pulse::Off { .. } => self.switch(false),
            Pulse::Mark(_) => Ok(()),
        };

        let marks = pulse.marks();
        let kept = transcript.push_all(marks);

        self.wait(pulse.units());

        switched.map(|()| PlayReport {
            dropped_marks: marks.len() - kept,
        })
    }

    /// Force the key up without waiting.
    pub fn release(&mut self) -> Result<(), A::Error> {
        self.switch(false)
    }

    /// Access the actuator (lifecycle hooks).
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    fn switch(&mut self, on: bool) -> Result<(), A::Error> {
        self.key_down = on;
        self.actuator.set(on)
    }

    fn wait(&mut self, units: u8) {
        if units == 0 {
            return;
        }
        let ms = self.dot_ms * u32::from(units);
        self.delay.delay_ms(ms);
        self.elapsed_ms += u64::from(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(u64, bool)>>>;

    struct Lamp {
        clock: Rc<RefCell<u64>>,
        edges: Log,
        fail: bool,
    }

    impl Actuator for Lamp {
        type Error = ();

        fn set(&mut self, on: bool) -> Result<(), ()> {
            self.edges.borrow_mut().push((*self.clock.borrow(), on));
            if self.fail {
                Err(())
            } else {
                Ok(())
            }
        }
    }

    struct Clock(Rc<RefCell<u64>>);

    impl Delay for Clock {
        fn delay_ms(&mut self, ms: u32) {
            *self.0.borrow_mut() += u64::from(ms);
        }
    }

    fn keyer(fail: bool) -> (Keyer<Lamp, Clock>, Log) {
        let clock = Rc::new(RefCell::new(0));
        let edges = Log::default();
        let lamp = Lamp {
            clock: Rc::clone(&clock),
            edges: Rc::clone(&edges),
            fail,
        };
        (Keyer::new(lamp, Clock(clock), 200), edges)
    }

    #[test]
    fn test_dash_then_release() {
        let (mut keyer, edges) = keyer(false);
        let transcript = TranscriptBuffer::<16>::new();

        keyer.play(Pulse::On { units: 3 }, &transcript).unwrap();
        assert!(keyer.is_key_down());
        keyer.play(Pulse::Off { units: 3, marks: b"-" }, &transcript).unwrap();

        assert_eq!(*edges.borrow(), vec![(0, true), (600, false)]);
        assert_eq!(keyer.elapsed_ms(), 1200);
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_mark_does_not_touch_actuator_or_clock() {
        let (mut keyer, edges) = keyer(false);
        let transcript = TranscriptBuffer::<16>::new();

        keyer.play(Pulse::Mark(b" "), &transcript).unwrap();
        assert!(edges.borrow().is_empty());
        assert_eq!(keyer.elapsed_ms(), 0);
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_actuator_error_keeps_timing() {
        let (mut keyer, _edges) = keyer(true);
        let transcript = TranscriptBuffer::<16>::new();

        let result = keyer.play(Pulse::Off { units: 1, marks: b"." }, &transcript);
        assert_eq!(result, Err(()));
        assert_eq!(keyer.elapsed_ms(), 200);
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_dropped_marks_reported() {
        let (mut keyer, _edges) = keyer(false);
        let transcript = TranscriptBuffer::<2>::new();

        let report = keyer
            .play(Pulse::Off { units: 7, marks: b"   " }, &transcript)
            .unwrap();
        assert_eq!(report.dropped_marks, 1);
    }
}
