//! Hardware Abstraction Layer for RustMorseLed.
//!
//! The core only needs three things from the outside world: a binary
//! actuator, a way to wait, and a fallible copy out of the caller's buffer.
//! Business logic stays in core modules, HAL is just I/O.

#[cfg(target_os = "espidf")]
pub mod led;

#[cfg(target_os = "espidf")]
pub use led::{FreeRtosDelay, LedActuator, LedConfig};

use crate::error::InputFault;

/// Binary on/off output (LED, relay, keying line).
pub trait Actuator {
    type Error: core::fmt::Debug;

    /// Drive the output on or off.
    fn set(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Called once when the device opens.
    fn register(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once when the device is released.
    fn unregister(&mut self) {}
}

/// Blocking wait.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Caller-supplied input that may fault while being copied.
pub trait InputSource {
    /// Bytes available from the source.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `dst.len()` bytes starting at `offset` into `dst`.
    fn copy_to(&self, offset: usize, dst: &mut [u8]) -> Result<(), InputFault>;
}

impl InputSource for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn copy_to(&self, offset: usize, dst: &mut [u8]) -> Result<(), InputFault> {
        let src = offset
            .checked_add(dst.len())
            .and_then(|end| self.get(offset..end))
            .ok_or(InputFault {
                offset: offset.max(<[u8]>::len(self)),
            })?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl InputSource for str {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn copy_to(&self, offset: usize, dst: &mut [u8]) -> Result<(), InputFault> {
        self.as_bytes().copy_to(offset, dst)
    }
}

impl<const N: usize> InputSource for [u8; N] {
    fn len(&self) -> usize {
        N
    }

    fn copy_to(&self, offset: usize, dst: &mut [u8]) -> Result<(), InputFault> {
        self.as_slice().copy_to(offset, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_copy() {
        let src: &[u8] = b"hello";
        let mut dst = [0u8; 3];
        src.copy_to(1, &mut dst).unwrap();
        assert_eq!(&dst, b"ell");
    }

    #[test]
    fn test_slice_copy_past_end_faults() {
        let src: &[u8] = b"hi";
        let mut dst = [0u8; 4];
        assert_eq!(src.copy_to(0, &mut dst), Err(InputFault { offset: 2 }));
        assert_eq!(src.copy_to(5, &mut dst[..1]), Err(InputFault { offset: 5 }));
    }

    #[test]
    fn test_str_and_array_sources() {
        let mut dst = [0u8; 2];
        "ok".copy_to(0, &mut dst).unwrap();
        assert_eq!(&dst, b"ok");
        assert_eq!(InputSource::len(b"abc"), 3);
    }
}
