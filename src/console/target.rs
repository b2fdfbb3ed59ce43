//! What the console drives.

use crate::config::MorseConfig;
use crate::device::{DeviceStats, MorseDevice};
use crate::error::DeviceError;
use crate::hal::{Actuator, Delay};

/// Device operations reachable from console commands.
pub trait ConsoleTarget {
    /// Key `text`; returns the byte count reported by the device.
    fn send(&mut self, text: &[u8]) -> Result<usize, DeviceError>;

    /// Drain the transcript into `dst`.
    fn read_transcript(&mut self, dst: &mut [u8]) -> Result<usize, DeviceError>;

    fn stats(&self) -> DeviceStats;

    fn config(&self) -> &MorseConfig;
}

impl<A: Actuator, D: Delay, const N: usize> ConsoleTarget for MorseDevice<'_, A, D, N> {
    fn send(&mut self, text: &[u8]) -> Result<usize, DeviceError> {
        self.write(text, text.len())
    }

    fn read_transcript(&mut self, dst: &mut [u8]) -> Result<usize, DeviceError> {
        self.read(dst)
    }

    fn stats(&self) -> DeviceStats {
        MorseDevice::stats(self)
    }

    fn config(&self) -> &MorseConfig {
        MorseDevice::config(self)
    }
}
