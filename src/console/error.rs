//! Console error types

use thiserror::Error;

use crate::config::ParamSetError;
use crate::error::DeviceError;

/// Console error with code and message
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    #[error("E01: unknown command")]
    UnknownCommand,
    /// E02: Invalid value format
    #[error("E02: invalid value")]
    InvalidValue,
    /// E03: Missing required argument
    #[error("E03: missing argument")]
    MissingArg,
    /// E04: Value out of allowed range
    #[error("E04: out of range")]
    OutOfRange,
    /// E05: No parameter with that name
    #[error("E05: unknown parameter")]
    UnknownParam,
    /// E06: The device rejected the operation
    #[error("E06: device error")]
    Device,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::InvalidValue => "E02",
            Self::MissingArg => "E03",
            Self::OutOfRange => "E04",
            Self::UnknownParam => "E05",
            Self::Device => "E06",
        }
    }
}

impl From<ParamSetError> for ConsoleError {
    fn from(e: ParamSetError) -> Self {
        match e {
            ParamSetError::OutOfRange => Self::OutOfRange,
            ParamSetError::WrongType | ParamSetError::Unparsable => Self::InvalidValue,
        }
    }
}

impl From<DeviceError> for ConsoleError {
    fn from(_: DeviceError) -> Self {
        Self::Device
    }
}
