//! RustMorseLed - main entry point
//!
//! 1. Open `/dev/morse-code` on the board LED (or a terminal lamp on host)
//! 2. Run the console on stdin
//! 3. Drain the device log after every command

use std::io::{self, Write as _};

use rust_morse_led::console::Console;
use rust_morse_led::{DeviceState, CONFIG};

/// Shared device state (transcript, fault latch, log, counters).
static STATE: DeviceState = DeviceState::new();

/// `core::fmt::Write` adapter over stdout for console output.
struct ConsoleOut(io::Stdout);

impl core::fmt::Write for ConsoleOut {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}

impl ConsoleOut {
    fn flush(&mut self) {
        let _ = self.0.flush();
    }
}

#[cfg(target_os = "espidf")]
fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    if let Err(e) = board::run() {
        log::error!("morse: {:?}", e);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> std::process::ExitCode {
    match host::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("morse: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_os = "espidf")]
mod board {
    use std::io::{self, Read};

    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::gpio::{AnyOutputPin, PinDriver};
    use esp_idf_svc::sys::EspError;

    use rust_morse_led::hal::{FreeRtosDelay, LedActuator, LedConfig};
    use rust_morse_led::logging::LogLevel;
    use rust_morse_led::{LogReader, MorseDevice};

    use super::*;

    /// Console poll period when the UART is idle.
    const IDLE_POLL_MS: u32 = 10;

    pub fn run() -> Result<(), EspError> {
        let Some(device_log) = STATE.take_log() else {
            log::error!("device log already taken");
            return Ok(());
        };

        let led_config = LedConfig::default();
        // SAFETY: the LED pin is not claimed by anything else in this firmware
        let pin = PinDriver::output(unsafe { AnyOutputPin::new(led_config.pin) })?;
        let led = LedActuator::new(pin, led_config);

        let mut device = match MorseDevice::open(&STATE, &CONFIG, led, FreeRtosDelay) {
            Ok(device) => device,
            Err(e) => {
                forward_log(&device_log);
                log::error!("open failed: {}", e);
                return Ok(());
            }
        };
        forward_log(&device_log);

        let mut console = Console::new();
        let mut out = ConsoleOut(io::stdout());
        let mut stdin = io::stdin();
        let mut byte = [0u8; 1];

        console.print_banner(&mut out);
        out.flush();

        loop {
            match stdin.read(&mut byte) {
                Ok(1) => {
                    if console.process_byte(byte[0], &mut device, &mut out).is_some() {
                        forward_log(&device_log);
                    }
                    out.flush();
                }
                _ => FreeRtos::delay_ms(IDLE_POLL_MS),
            }
        }
    }

    /// Hand drained entries to the `log` facade (EspLogger).
    fn forward_log(stream: &LogReader<'_>) {
        while let Some(entry) = stream.next_entry() {
            let msg = entry.message();
            match entry.level {
                LogLevel::Error => log::error!("[{}] {}", entry.timestamp_ms, msg),
                LogLevel::Warn => log::warn!("[{}] {}", entry.timestamp_ms, msg),
                LogLevel::Info => log::info!("[{}] {}", entry.timestamp_ms, msg),
                LogLevel::Debug => log::debug!("[{}] {}", entry.timestamp_ms, msg),
            }
        }

        let dropped = stream.dropped();
        if dropped > 0 {
            log::warn!("log dropped {} messages", dropped);
            stream.reset_dropped();
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::io::{self, Read, Write as _};
    use std::thread;
    use std::time::Duration;

    use rust_morse_led::{Actuator, Delay, DeviceError, MorseDevice};

    use super::*;

    /// Draws the LED as a lamp on stderr.
    struct TerminalLamp(io::Stderr);

    impl Actuator for TerminalLamp {
        type Error = io::Error;

        fn set(&mut self, on: bool) -> io::Result<()> {
            let mut err = self.0.lock();
            write!(err, "\r[{}]", if on { '*' } else { ' ' })?;
            err.flush()
        }

        fn unregister(&mut self) {
            let _ = writeln!(self.0);
        }
    }

    struct SleepDelay;

    impl Delay for SleepDelay {
        fn delay_ms(&mut self, ms: u32) {
            thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }

    /// `core::fmt::Write` adapter for the log drain.
    struct LogOut(io::Stderr);

    impl core::fmt::Write for LogOut {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            self.0.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)
        }
    }

    pub fn run() -> Result<(), DeviceError> {
        let mut log_out = LogOut(io::stderr());
        let device_log = STATE.take_log().ok_or(DeviceError::Busy)?;

        let opened = MorseDevice::open(&STATE, &CONFIG, TerminalLamp(io::stderr()), SleepDelay);
        device_log.drain_to(&mut log_out);
        let mut device = opened?;

        // The terminal echoes and line-buffers for us
        let mut console = Console::new().with_echo(false);
        let mut out = ConsoleOut(io::stdout());

        console.print_banner(&mut out);
        out.flush();

        for byte in io::stdin().lock().bytes() {
            let Ok(byte) = byte else { break };
            if console.process_byte(byte, &mut device, &mut out).is_some() {
                device_log.drain_to(&mut log_out);
            }
            out.flush();
        }

        drop(device);
        device_log.drain_to(&mut log_out);
        Ok(())
    }
}
