//! GPIO LED actuator and FreeRTOS delay for ESP-IDF targets.

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyOutputPin, Level, Output, PinDriver};
use esp_idf_svc::sys::EspError;

use super::{Actuator, Delay};

/// LED pin configuration.
#[derive(Clone, Copy, Debug)]
pub struct LedConfig {
    pub pin: i32,
    pub active_high: bool,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            pin: 2, // on-board LED on most DevKitC boards
            active_high: true,
        }
    }
}

/// LED driven through a GPIO output.
pub struct LedActuator<'d> {
    pin: PinDriver<'d, AnyOutputPin, Output>,
    config: LedConfig,
}

impl<'d> LedActuator<'d> {
    pub fn new(pin: PinDriver<'d, AnyOutputPin, Output>, config: LedConfig) -> Self {
        Self { pin, config }
    }

    fn level(&self, on: bool) -> Level {
        if on == self.config.active_high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl Actuator for LedActuator<'_> {
    type Error = EspError;

    fn set(&mut self, on: bool) -> Result<(), EspError> {
        let level = self.level(on);
        self.pin.set_level(level)
    }

    fn register(&mut self) -> Result<(), EspError> {
        // Start dark
        self.set(false)
    }

    fn unregister(&mut self) {
        let _ = self.set(false);
    }
}

/// Delay backed by `vTaskDelay`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeRtosDelay;

impl Delay for FreeRtosDelay {
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}
