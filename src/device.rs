//! The `/dev/morse-code` device.
//!
//! # Architecture
//!
//! ```text
//!             write()                                   read()
//! caller ──▶ bulk copy ──▶ encode() ──▶ Keyer ──▶ LED    ▲
//!                                         │               │
//!                                         └──▶ TranscriptBuffer
//! ```
//!
//! Shared state lives in [`DeviceState`] (a `const fn` constructible value,
//! normally a `static`). The transcript and the log are SPSC rings, so each
//! end is handed out at most once at a time:
//!
//! - [`MorseDevice::open`] claims the writer side (`DeviceError::Busy` if taken)
//! - [`DeviceState::take_reader`] hands out the single [`MorseReader`]
//! - [`DeviceState::take_log`] hands out the single [`LogReader`]
//!
//! Each claim is released when its handle is dropped.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Write;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::{MorseConfig, WriteCountPolicy};
use crate::encoder::encode;
use crate::error::{DeviceError, InputFault};
use crate::fault::{FaultCode, FaultSnapshot, FaultState};
use crate::hal::{Actuator, Delay, InputSource};
use crate::keyer::Keyer;
use crate::log_drain::drain_log;
use crate::logging::{LogEntry, LogStream};
use crate::transcript::{TranscriptBuffer, TRANSCRIPT_CAPACITY};

/// Name of the device node.
pub const DEVICE_NAME: &str = "morse-code";

/// Fault data latched when switching the actuator off at release fails.
pub const RELEASE_PULSE: u32 = u32::MAX;

/// State shared between the writer and the reader.
pub struct DeviceState<const N: usize = TRANSCRIPT_CAPACITY> {
    transcript: TranscriptBuffer<N>,
    fault: FaultState,
    /// Written by the open device only.
    log: LogStream,
    writer_claimed: AtomicBool,
    reader_claimed: AtomicBool,
    log_claimed: AtomicBool,
    writes: AtomicU32,
    letters: AtomicU32,
    words: AtomicU32,
}

impl<const N: usize> DeviceState<N> {
    pub const fn new() -> Self {
        Self {
            transcript: TranscriptBuffer::new(),
            fault: FaultState::new(),
            log: LogStream::new(),
            writer_claimed: AtomicBool::new(false),
            reader_claimed: AtomicBool::new(false),
            log_claimed: AtomicBool::new(false),
            writes: AtomicU32::new(0),
            letters: AtomicU32::new(0),
            words: AtomicU32::new(0),
        }
    }

    /// Counters and buffer levels.
    pub fn stats(&self) -> DeviceStats {
        DeviceStats {
            writes: self.writes.load(Ordering::Relaxed),
            letters: self.letters.load(Ordering::Relaxed),
            words: self.words.load(Ordering::Relaxed),
            fault: self.fault.snapshot(),
            transcript_len: self.transcript.len(),
            transcript_dropped: self.transcript.dropped(),
            log_dropped: self.log.dropped(),
        }
    }

    /// Fault latch. Any thread may set, inspect or clear it.
    #[inline]
    pub fn fault(&self) -> &FaultState {
        &self.fault
    }

    /// Claim the transcript consumer. `None` while another reader is alive.
    pub fn take_reader(&self) -> Option<MorseReader<'_, N>> {
        claim(&self.reader_claimed).then(|| MorseReader { state: self })
    }

    /// Claim the log consumer. `None` while another log reader is alive.
    pub fn take_log(&self) -> Option<LogReader<'_>> {
        claim(&self.log_claimed).then(|| LogReader {
            stream: &self.log,
            claim: &self.log_claimed,
        })
    }
}

/// Set `flag` if it was clear; true on success.
#[inline]
fn claim(flag: &AtomicBool) -> bool {
    flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
        .is_ok()
}

impl<const N: usize> Default for DeviceState<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of device counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceStats {
    pub writes: u32,
    pub letters: u32,
    pub words: u32,
    pub fault: FaultSnapshot,
    pub transcript_len: usize,
    pub transcript_dropped: u32,
    pub log_dropped: u32,
}

/// The writer side of the device, owning the actuator.
///
/// Opening registers the actuator; dropping turns it off and unregisters it.
pub struct MorseDevice<'a, A: Actuator, D: Delay, const N: usize = TRANSCRIPT_CAPACITY> {
    state: &'a DeviceState<N>,
    config: &'a MorseConfig,
    keyer: Keyer<A, D>,
}

impl<'a, A: Actuator, D: Delay, const N: usize> MorseDevice<'a, A, D, N> {
    /// Register the actuator and open the device.
    pub fn open(
        state: &'a DeviceState<N>,
        config: &'a MorseConfig,
        actuator: A,
        delay: D,
    ) -> Result<Self, DeviceError> {
        if !claim(&state.writer_claimed) {
            return Err(DeviceError::Busy);
        }

        let mut keyer = Keyer::new(actuator, delay, config.dot_ms());

        if let Err(e) = keyer.actuator_mut().register() {
            crate::rt_error!(state.log, 0, "actuator register failed: {:?}", e);
            state.writer_claimed.store(false, Ordering::Release);
            return Err(DeviceError::Register);
        }

        crate::rt_info!(state.log, 0, "/dev/{} open, dot {} ms", DEVICE_NAME, config.dot_ms());

        Ok(Self {
            state,
            config,
            keyer,
        })
    }

    /// Key `count` bytes from `src`, blocking until the last pulse is done.
    ///
    /// The input is copied in one go before anything is keyed, so a fault
    /// leaves the LED and the transcript untouched.
    pub fn write<S: InputSource + ?Sized>(
        &mut self,
        src: &S,
        count: usize,
    ) -> Result<usize, DeviceError> {
        let settings = self.config.snapshot();
        self.keyer.set_dot_ms(settings.dot_ms);

        let input = match copy_input(src, count) {
            Ok(input) => input,
            Err(fault) => {
                let offset = u32::try_from(fault.offset).unwrap_or(u32::MAX);
                self.state.fault.set(FaultCode::InputFault, offset);
                crate::rt_error!(self.state.log, self.now(), "write: {}", fault);
                return Err(fault.into());
            }
        };

        self.state.writes.fetch_add(1, Ordering::Relaxed);

        let mut pulses = encode(&input, settings.terminator);
        let span = pulses.span();
        if span.is_empty() {
            crate::rt_debug!(self.state.log, self.now(), "write: {} blank bytes", count);
        }

        let started = self.now();
        let mut dropped_marks = 0;
        let mut actuator_failed = false;

        for (i, pulse) in pulses.by_ref().enumerate() {
            match self.keyer.play(pulse, &self.state.transcript) {
                Ok(report) => dropped_marks += report.dropped_marks,
                Err(e) => {
                    let pulse = u32::try_from(i).unwrap_or(u32::MAX);
                    self.state.fault.set(FaultCode::ActuatorFault, pulse);
                    if !actuator_failed {
                        crate::rt_error!(self.state.log, self.now(), "actuator fault at pulse {}: {:?}", i, e);
                    }
                    actuator_failed = true;
                }
            }
        }

        let summary = pulses.summary();
        self.state.letters.fetch_add(summary.letters, Ordering::Relaxed);
        self.state.words.fetch_add(summary.words, Ordering::Relaxed);

        if dropped_marks > 0 {
            crate::rt_warn!(self.state.log, self.now(), "transcript full, dropped {} marks", dropped_marks);
        }
        if !span.is_empty() {
            crate::rt_info!(
                self.state.log,
                self.now(),
                "sent {} letters in {} words, {} ms (config gen {})",
                summary.letters,
                summary.words,
                self.now() - started,
                self.config.generation()
            );
        }

        Ok(match settings.write_count {
            WriteCountPolicy::Requested => count,
            WriteCountPolicy::Consumed => summary.consumed,
        })
    }

    /// Drain the transcript into `dst` through a short-lived reader claim.
    ///
    /// Fails with `DeviceError::Busy` while a [`MorseReader`] is held elsewhere.
    pub fn read(&self, dst: &mut [u8]) -> Result<usize, DeviceError> {
        let reader = self.state.take_reader().ok_or(DeviceError::Busy)?;
        Ok(reader.read(dst))
    }

    #[inline]
    pub fn state(&self) -> &'a DeviceState<N> {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &'a MorseConfig {
        self.config
    }

    /// Signalling time since open, in milliseconds.
    #[inline]
    pub fn now(&self) -> u64 {
        self.keyer.elapsed_ms()
    }

    #[inline]
    pub fn stats(&self) -> DeviceStats {
        self.state.stats()
    }
}

impl<A: Actuator, D: Delay, const N: usize> Drop for MorseDevice<'_, A, D, N> {
    fn drop(&mut self) {
        if let Err(e) = self.keyer.release() {
            self.state.fault.set(FaultCode::ActuatorFault, RELEASE_PULSE);
            crate::rt_error!(self.state.log, self.now(), "actuator fault at release: {:?}", e);
        }
        self.keyer.actuator_mut().unregister();
        crate::rt_info!(self.state.log, self.now(), "/dev/{} released", DEVICE_NAME);
        self.state.writer_claimed.store(false, Ordering::Release);
    }
}

/// Copy `count` bytes of `src` in one go.
///
/// A `count` past the end of `src` faults at `src.len()` before anything
/// is allocated.
fn copy_input<S: InputSource + ?Sized>(src: &S, count: usize) -> Result<Vec<u8>, InputFault> {
    if count > src.len() {
        return Err(InputFault { offset: src.len() });
    }
    let mut input = vec![0u8; count];
    src.copy_to(0, &mut input)?;
    Ok(input)
}

/// Reader side of the device, from [`DeviceState::take_reader`].
///
/// There is at most one alive per [`DeviceState`]. It may move to another
/// thread; dropping it lets the next reader be taken.
pub struct MorseReader<'a, const N: usize = TRANSCRIPT_CAPACITY> {
    state: &'a DeviceState<N>,
}

impl<const N: usize> MorseReader<'_, N> {
    /// Drain the transcript into `dst`; 0 when nothing is buffered.
    #[inline]
    pub fn read(&self, dst: &mut [u8]) -> usize {
        self.state.transcript.drain_into(dst)
    }
}

impl<const N: usize> Drop for MorseReader<'_, N> {
    fn drop(&mut self) {
        self.state.reader_claimed.store(false, Ordering::Release);
    }
}

/// Consumer side of the device log, from [`DeviceState::take_log`].
pub struct LogReader<'a> {
    stream: &'a LogStream,
    claim: &'a AtomicBool,
}

impl LogReader<'_> {
    /// Pop the oldest entry.
    #[inline]
    pub fn next_entry(&self) -> Option<LogEntry> {
        self.stream.drain()
    }

    /// Entries lost to a full ring since the last reset.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.stream.dropped()
    }

    #[inline]
    pub fn reset_dropped(&self) {
        self.stream.reset_dropped();
    }

    /// Format every pending entry into `out`; see [`drain_log`].
    pub fn drain_to(&self, out: &mut dyn Write) -> usize {
        drain_log(self.stream, out)
    }
}

impl Drop for LogReader<'_> {
    fn drop(&mut self) {
        self.claim.store(false, Ordering::Release);
    }
}
