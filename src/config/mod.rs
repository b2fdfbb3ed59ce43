//! Module: config
//!
//! Purpose: Runtime configuration for the Morse signaler.
//!
//! Architecture:
//! - `MorseConfig`: lock-free parameter store (atomics, `const fn new`)
//! - `CONFIG`: process-wide instance used by the binaries
//! - `Settings`: immutable snapshot taken once per write
//! - `params`: descriptor table behind the console `set` / `show` commands
//!
//! Safety: RT-safe. All access via atomics, no locks.

pub mod params;

use core::sync::atomic::{AtomicU16, AtomicU32, AtomicU8, Ordering};

pub use params::{
    find_param, find_params_matching, param_names, ParamDescriptor, ParamSetError, ParamType,
    ParamValue, PARAMS,
};

/// Reference dot duration in milliseconds.
pub const DEFAULT_DOT_MS: u32 = 200;

/// Accepted dot duration range in milliseconds.
pub const DOT_MS_MIN: u32 = 1;
pub const DOT_MS_MAX: u32 = 2000;

/// When the end-of-message newline is written to the transcript.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum TerminatorPolicy {
    /// Whenever the trimmed input was not empty, even if nothing in it
    /// was a letter.
    #[default]
    AfterScan = 0,
    /// Only if at least one letter was keyed.
    AfterLetters = 1,
}

impl TerminatorPolicy {
    pub const NAMES: &'static [&'static str] = &["scan", "letters"];

    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => TerminatorPolicy::AfterLetters,
            _ => TerminatorPolicy::AfterScan,
        }
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

/// What `write` reports back to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum WriteCountPolicy {
    /// The full requested byte count.
    #[default]
    Requested = 0,
    /// Letters and spaces actually encoded.
    Consumed = 1,
}

impl WriteCountPolicy {
    pub const NAMES: &'static [&'static str] = &["requested", "consumed"];

    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => WriteCountPolicy::Consumed,
            _ => WriteCountPolicy::Requested,
        }
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

/// Snapshot of the configuration, taken at the start of a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub dot_ms: u32,
    pub terminator: TerminatorPolicy,
    pub write_count: WriteCountPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dot_ms: DEFAULT_DOT_MS,
            terminator: TerminatorPolicy::default(),
            write_count: WriteCountPolicy::default(),
        }
    }
}

/// Lock-free configuration store.
pub struct MorseConfig {
    dot_ms: AtomicU32,
    terminator: AtomicU8,
    write_count: AtomicU8,
    /// Bumped on every change.
    generation: AtomicU16,
}

/// Process-wide configuration.
pub static CONFIG: MorseConfig = MorseConfig::new();

impl MorseConfig {
    pub const fn new() -> Self {
        Self {
            dot_ms: AtomicU32::new(DEFAULT_DOT_MS),
            terminator: AtomicU8::new(TerminatorPolicy::AfterScan as u8),
            write_count: AtomicU8::new(WriteCountPolicy::Requested as u8),
            generation: AtomicU16::new(0),
        }
    }

    #[inline]
    pub fn dot_ms(&self) -> u32 {
        self.dot_ms.load(Ordering::Relaxed)
    }

    /// Set the dot duration, rejecting values outside the legal range.
    pub fn set_dot_ms(&self, ms: u32) -> Result<(), ParamSetError> {
        if !(DOT_MS_MIN..=DOT_MS_MAX).contains(&ms) {
            return Err(ParamSetError::OutOfRange);
        }
        self.dot_ms.store(ms, Ordering::Relaxed);
        self.bump();
        Ok(())
    }

    #[inline]
    pub fn terminator(&self) -> TerminatorPolicy {
        TerminatorPolicy::from_u8(self.terminator.load(Ordering::Relaxed))
    }

    pub fn set_terminator(&self, policy: TerminatorPolicy) {
        self.terminator.store(policy as u8, Ordering::Relaxed);
        self.bump();
    }

    #[inline]
    pub fn write_count(&self) -> WriteCountPolicy {
        WriteCountPolicy::from_u8(self.write_count.load(Ordering::Relaxed))
    }

    pub fn set_write_count(&self, policy: WriteCountPolicy) {
        self.write_count.store(policy as u8, Ordering::Relaxed);
        self.bump();
    }

    /// Configuration generation number, logged with every write.
    #[inline]
    pub fn generation(&self) -> u16 {
        self.generation.load(Ordering::Acquire)
    }

    /// Take a consistent-enough snapshot for one write.
    pub fn snapshot(&self) -> Settings {
        Settings {
            dot_ms: self.dot_ms(),
            terminator: self.terminator(),
            write_count: self.write_count(),
        }
    }

    /// Restore every parameter to its default.
    pub fn reset(&self) {
        let defaults = Settings::default();
        self.dot_ms.store(defaults.dot_ms, Ordering::Relaxed);
        self.terminator.store(defaults.terminator as u8, Ordering::Relaxed);
        self.write_count.store(defaults.write_count as u8, Ordering::Relaxed);
        self.bump();
    }

    #[inline]
    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl Default for MorseConfig {
    fn default() -> Self {
        Self::new()
    }
}
