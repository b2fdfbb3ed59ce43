//! Fault latch for the Morse device.
//!
//! Faults never stop the device by themselves: an input fault fails the
//! one write that hit it, an actuator fault is recorded and keying goes on
//! so the transcript stays aligned with the requested timing. The latch
//! keeps the last fault for diagnostics until someone clears it.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// Fault codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (normal operation).
    None = 0,

    /// The caller's buffer could not be copied.
    /// Data: offset of the first unreadable byte.
    InputFault = 1,

    /// The actuator reported an error while switching.
    /// Data: index of the pulse within the write.
    ActuatorFault = 2,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::InputFault,
            2 => FaultCode::ActuatorFault,
            _ => FaultCode::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::InputFault => "input",
            FaultCode::ActuatorFault => "actuator",
        }
    }
}

/// Thread-safe fault state.
///
/// Set by the writer, inspected by whoever reports status.
pub struct FaultState {
    /// True if a fault is latched.
    active: AtomicBool,

    /// Fault code (reason for fault).
    code: AtomicU8,

    /// Additional data (meaning depends on code).
    data: AtomicU32,

    /// Total fault count since open (never cleared).
    count: AtomicU32,
}

impl FaultState {
    /// Create new fault state (no fault).
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(0),
            data: AtomicU32::new(0),
            count: AtomicU32::new(0),
        }
    }

    /// Latch a fault and bump the counter.
    #[inline]
    pub fn set(&self, code: FaultCode, data: u32) {
        self.code.store(code as u8, Ordering::Release);
        self.data.store(data, Ordering::Release);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Fault code (only meaningful if `is_active()` is true).
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Acquire))
    }

    #[inline]
    pub fn data(&self) -> u32 {
        self.data.load(Ordering::Acquire)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Clear the latch. The counter keeps its history.
    #[inline]
    pub fn clear(&self) {
        self.active.store(false, Ordering::Release);
    }

    #[inline]
    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            active: self.is_active(),
            code: self.code(),
            data: self.data(),
            count: self.count(),
        }
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of fault state at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultSnapshot {
    pub active: bool,
    pub code: FaultCode,
    pub data: u32,
    pub count: u32,
}
