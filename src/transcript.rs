//! Lock-free SPSC transcript buffer.
//!
//! The writer records every symbol it keys; the reader drains the lot.
//!
//! ```text
//! Keyer ──push()──▶ [. . - ␠ ␠ ␠ …] ──drain_into()──▶ reader
//!                     512 bytes
//!                     drop when full
//! ```
//!
//! # Rules
//!
//! - One producer (the device writer), one consumer (the reader)
//! - Push never blocks and never fails; overflow is dropped and counted
//! - Drain copies what fits and discards the rest

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Default transcript capacity.
pub const TRANSCRIPT_CAPACITY: usize = 512;

/// Bounded FIFO of transcript symbols.
///
/// # Safety
///
/// Uses `UnsafeCell` for the slots. Sound under the SPSC contract:
/// the producer only writes slots in `[write, read + N)`, the consumer only
/// reads slots in `[read, write)`, and the indices are published with
/// `Release` / observed with `Acquire`.
pub struct TranscriptBuffer<const N: usize = TRANSCRIPT_CAPACITY> {
    slots: UnsafeCell<[u8; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: Single producer, single consumer, atomic coordination.
unsafe impl<const N: usize> Sync for TranscriptBuffer<N> {}
unsafe impl<const N: usize> Send for TranscriptBuffer<N> {}

impl<const N: usize> TranscriptBuffer<N> {
    const MASK: usize = N - 1;

    /// Create an empty buffer.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Transcript size must be power of 2");

        Self {
            slots: UnsafeCell::new([0; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Append one symbol (producer side).
    ///
    /// Returns `false` if the buffer was full and the symbol was dropped.
    #[inline]
    pub fn push(&self, symbol: u8) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // SAFETY: Slot is outside [read, write), the consumer never touches it
        unsafe {
            (*self.slots.get())[(write as usize) & Self::MASK] = symbol;
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Append several symbols, returns how many were kept.
    #[inline]
    pub fn push_all(&self, symbols: &[u8]) -> usize {
        symbols.iter().filter(|&&s| self.push(s)).count()
    }

    /// Copy buffered symbols into `dst`, then clear the buffer (consumer side).
    ///
    /// Everything that was buffered when the drain started is gone afterwards,
    /// including bytes that did not fit in `dst`.
    pub fn drain_into(&self, dst: &mut [u8]) -> usize {
        let write = self.write_idx.load(Ordering::Acquire);
        let read = self.read_idx.load(Ordering::Relaxed);

        let available = (write.wrapping_sub(read) as usize).min(N);
        let count = available.min(dst.len());

        for (i, out) in dst[..count].iter_mut().enumerate() {
            let idx = (read as usize).wrapping_add(i) & Self::MASK;
            // SAFETY: Slot is inside [read, write), the producer never touches it
            *out = unsafe { (*self.slots.get())[idx] };
        }

        self.read_idx.store(write, Ordering::Release);
        count
    }

    /// Discard everything buffered (consumer side).
    #[inline]
    pub fn clear(&self) {
        let write = self.write_idx.load(Ordering::Acquire);
        self.read_idx.store(write, Ordering::Release);
    }

    /// Number of symbols waiting.
    #[inline]
    pub fn len(&self) -> usize {
        let write = self.write_idx.load(Ordering::Acquire);
        let read = self.read_idx.load(Ordering::Acquire);
        (write.wrapping_sub(read) as usize).min(N)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Symbols dropped because the buffer was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }
}

impl<const N: usize> Default for TranscriptBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
