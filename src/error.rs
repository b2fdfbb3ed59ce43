//! Error types surfaced to callers of the device.
//!
//! Only input faults make a write fail. Invalid characters, transcript
//! overflow and actuator hiccups degrade quietly (see [`crate::fault`]).

use thiserror::Error;

/// A byte of the caller's buffer could not be read.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("input buffer fault at byte {offset}")]
pub struct InputFault {
    /// First offset that could not be copied.
    pub offset: usize,
}

/// Errors returned by [`crate::device::MorseDevice`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// Copying the caller's buffer failed; nothing was keyed.
    #[error("I/O fault reading input at byte {offset}")]
    InputFault { offset: usize },

    /// The actuator refused to register at open.
    #[error("actuator registration failed")]
    Register,

    /// The requested end of the device (writer or reader) is already taken.
    #[error("device busy")]
    Busy,
}

impl From<InputFault> for DeviceError {
    fn from(fault: InputFault) -> Self {
        DeviceError::InputFault { offset: fault.offset }
    }
}
