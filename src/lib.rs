//! # RustMorseLed
//!
//! Morse code LED signaler with a read-back transcript.
//!
//! ## Architecture
//!
//! Text written to the device is sanitized, encoded into a stream of
//! [`Pulse`] events and played by the [`Keyer`] on an [`Actuator`]. The
//! keyer records the dots, dashes and separators it keyed in a lock-free
//! [`TranscriptBuffer`] that readers drain.
//!
//! - Encoding is pure and never waits; it is fully testable on host
//! - Only the keyer touches hardware or sleeps
//! - Shared state is atomics only, no mutexes

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod code_table;
pub mod config;
pub mod console;
pub mod device;
pub mod encoder;
pub mod error;
pub mod fault;
pub mod hal;
pub mod keyer;
pub mod log_drain;
pub mod logging;
pub mod pulse;
pub mod sanitize;
pub mod transcript;

pub use config::{MorseConfig, TerminatorPolicy, WriteCountPolicy, CONFIG};
pub use device::{DeviceState, DeviceStats, LogReader, MorseDevice, MorseReader, DEVICE_NAME};
pub use encoder::{encode, EncodeSummary, MessagePulses};
pub use error::{DeviceError, InputFault};
pub use fault::{FaultCode, FaultState};
pub use hal::{Actuator, Delay, InputSource};
pub use keyer::Keyer;
pub use pulse::Pulse;
pub use transcript::TranscriptBuffer;
