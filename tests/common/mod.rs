//! Simulated lamp and clock shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rust_morse_led::{Actuator, Delay};

/// Virtual clock: `delay_ms` advances time instantly.
#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn now(&self) -> u64 {
        self.0.get()
    }
}

impl Delay for SimClock {
    fn delay_ms(&mut self, ms: u32) {
        self.0.set(self.0.get() + u64::from(ms));
    }
}

/// What happened to the lamp, and when.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LampEvent {
    Registered,
    On(u64),
    Off(u64),
    Unregistered,
}

/// Lamp double recording every call against the virtual clock.
#[derive(Clone)]
pub struct SimLamp {
    clock: SimClock,
    events: Rc<RefCell<Vec<LampEvent>>>,
    /// Fail every `set` from this call index on.
    fail_from: Option<usize>,
    refuse_register: bool,
    sets: Rc<Cell<usize>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LampFailure;

impl SimLamp {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            events: Rc::default(),
            fail_from: None,
            refuse_register: false,
            sets: Rc::default(),
        }
    }

    pub fn failing_from(mut self, call: usize) -> Self {
        self.fail_from = Some(call);
        self
    }

    pub fn refusing_register(mut self) -> Self {
        self.refuse_register = true;
        self
    }

    pub fn events(&self) -> Vec<LampEvent> {
        self.events.borrow().clone()
    }

    /// On/off events only.
    pub fn edges(&self) -> Vec<LampEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, LampEvent::On(_) | LampEvent::Off(_)))
            .collect()
    }

    /// Length of every key-down period, in ms.
    pub fn on_durations(&self) -> Vec<u64> {
        let mut durations = Vec::new();
        let mut since = None;
        for event in self.edges() {
            match event {
                LampEvent::On(t) => since = since.or(Some(t)),
                LampEvent::Off(t) => {
                    if let Some(start) = since.take() {
                        durations.push(t - start);
                    }
                }
                _ => {}
            }
        }
        durations
    }
}

impl Actuator for SimLamp {
    type Error = LampFailure;

    fn set(&mut self, on: bool) -> Result<(), LampFailure> {
        let now = self.clock.now();
        self.events
            .borrow_mut()
            .push(if on { LampEvent::On(now) } else { LampEvent::Off(now) });

        let call = self.sets.get();
        self.sets.set(call + 1);
        match self.fail_from {
            Some(from) if call >= from => Err(LampFailure),
            _ => Ok(()),
        }
    }

    fn register(&mut self) -> Result<(), LampFailure> {
        if self.refuse_register {
            return Err(LampFailure);
        }
        self.events.borrow_mut().push(LampEvent::Registered);
        Ok(())
    }

    fn unregister(&mut self) {
        self.events.borrow_mut().push(LampEvent::Unregistered);
    }
}

/// Transcript text a pulse sequence records.
pub fn marks_of(pulses: impl Iterator<Item = rust_morse_led::Pulse>) -> String {
    pulses
        .flat_map(|p| p.marks().iter().copied())
        .map(char::from)
        .collect()
}
