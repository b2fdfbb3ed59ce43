//! Command handler and console state machine tests

mod common;

use common::{SimClock, SimLamp};
use rust_morse_led::console::commands::{execute, COMMANDS};
use rust_morse_led::console::parser::parse_line;
use rust_morse_led::console::{Console, ConsoleError, VERSION};
use rust_morse_led::{DeviceState, FaultCode, MorseConfig, MorseDevice, TerminatorPolicy};

type SimDevice<'a> = MorseDevice<'a, SimLamp, SimClock>;

fn open<'a>(state: &'a DeviceState, config: &'a MorseConfig) -> SimDevice<'a> {
    let clock = SimClock::default();
    MorseDevice::open(state, config, SimLamp::new(&clock), clock).unwrap()
}

fn run(device: &mut SimDevice<'_>, line: &str) -> (Result<(), ConsoleError>, String) {
    let mut out = String::new();
    let result = execute(&parse_line(line), device, &mut out);
    (result, out)
}

#[test]
fn test_command_registry_has_all_commands() {
    let expected = ["help", "send", "read", "set", "show", "stats", "version"];

    for name in expected {
        assert!(
            COMMANDS.iter().any(|c| c.name == name),
            "Command '{}' should be in registry",
            name
        );
    }
}

#[test]
fn test_execute_unknown_command() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    let (result, _) = run(&mut device, "foobar");
    assert_eq!(result, Err(ConsoleError::UnknownCommand));
    assert_eq!(ConsoleError::UnknownCommand.code(), "E01");
}

#[test]
fn test_execute_help() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    let (result, out) = run(&mut device, "help");
    assert!(result.is_ok());
    assert!(out.contains("send"));
    assert!(out.contains("version"));

    let (result, out) = run(&mut device, "help read");
    assert!(result.is_ok());
    assert!(out.starts_with("read:"));
}

#[test]
fn test_send_then_read() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    let (result, out) = run(&mut device, "send SOS");
    assert!(result.is_ok());
    assert_eq!(out, "sent 3 bytes\n");

    let (result, out) = run(&mut device, "read");
    assert!(result.is_ok());
    assert_eq!(out, "... --- ... \n");

    let (_, out) = run(&mut device, "read");
    assert_eq!(out, "(empty)\n");
}

#[test]
fn test_send_requires_text() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    assert_eq!(run(&mut device, "send").0, Err(ConsoleError::MissingArg));
}

#[test]
fn test_read_max() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    run(&mut device, "send E").0.unwrap();
    let (_, out) = run(&mut device, "read 1");
    assert_eq!(out, ".\n");

    assert_eq!(run(&mut device, "read 0").0, Err(ConsoleError::OutOfRange));
    assert_eq!(run(&mut device, "read many").0, Err(ConsoleError::InvalidValue));
}

#[test]
fn test_read_while_reader_held() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    run(&mut device, "send E").0.unwrap();
    let reader = state.take_reader().unwrap();
    assert_eq!(run(&mut device, "read").0, Err(ConsoleError::Device));

    drop(reader);
    let (_, out) = run(&mut device, "read");
    assert_eq!(out, ". \n");
}

#[test]
fn test_set_and_show() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    let (result, out) = run(&mut device, "set dot_ms 120");
    assert!(result.is_ok());
    assert_eq!(out, "dot_ms=120\n");
    assert_eq!(config.dot_ms(), 120);

    run(&mut device, "set terminator letters").0.unwrap();
    assert_eq!(config.terminator(), TerminatorPolicy::AfterLetters);

    let (_, out) = run(&mut device, "show");
    assert_eq!(out, "dot_ms=120\nterminator=letters\nwrite_count=requested\n");

    let (_, out) = run(&mut device, "show w*");
    assert_eq!(out, "write_count=requested\n");
}

#[test]
fn test_set_errors() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    assert_eq!(run(&mut device, "set").0, Err(ConsoleError::MissingArg));
    assert_eq!(run(&mut device, "set dot_ms").0, Err(ConsoleError::MissingArg));
    assert_eq!(run(&mut device, "set speed 20").0, Err(ConsoleError::UnknownParam));
    assert_eq!(run(&mut device, "set dot_ms 0").0, Err(ConsoleError::OutOfRange));
    assert_eq!(run(&mut device, "set dot_ms fast").0, Err(ConsoleError::InvalidValue));
    assert_eq!(run(&mut device, "show speed").0, Err(ConsoleError::UnknownParam));
    assert_eq!(config.dot_ms(), 200);
}

#[test]
fn test_stats() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    run(&mut device, "send HI THERE").0.unwrap();
    let (_, out) = run(&mut device, "stats");
    assert!(out.contains("writes:     1"));
    assert!(out.contains("letters:    7"));
    assert!(out.contains("words:      2"));
    assert!(out.contains("fault:      none"));

    state.fault().set(FaultCode::InputFault, 9);
    let (_, out) = run(&mut device, "stats");
    assert!(out.contains("fault:      input (data=9, count=1)"));
}

#[test]
fn test_version() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);

    let (_, out) = run(&mut device, "version");
    assert_eq!(out.trim_end(), VERSION);
    assert!(VERSION.starts_with("MorseLed v"));
}

#[test]
fn test_console_bytes_to_command() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);
    let mut console = Console::new().with_echo(false);
    let mut out = String::new();

    for &b in b"send X\x7fEE" {
        assert!(console.process_byte(b, &mut device, &mut out).is_none());
    }
    assert_eq!(console.line(), "send EE");

    let result = console.process_byte(b'\r', &mut device, &mut out);
    assert_eq!(result, Some(Ok(())));
    assert!(out.contains("sent 2 bytes"));
    assert!(out.ends_with("morse> "));
    assert_eq!(console.line(), "");
}

#[test]
fn test_console_reports_errors_and_ignores_escapes() {
    let state = DeviceState::new();
    let config = MorseConfig::new();
    let mut device = open(&state, &config);
    let mut console = Console::new();
    let mut out = String::new();

    // Up arrow, then an unknown command
    for &b in b"\x1b[Abogus" {
        console.process_byte(b, &mut device, &mut out);
    }
    assert_eq!(console.line(), "bogus");

    let result = console.process_byte(b'\n', &mut device, &mut out);
    assert_eq!(result, Some(Err(ConsoleError::UnknownCommand)));
    assert!(out.contains("E01: unknown command"));

    // Empty line and Ctrl+U produce no command
    assert_eq!(console.process_byte(b'\n', &mut device, &mut out), None);
    for &b in b"send X\x15" {
        console.process_byte(b, &mut device, &mut out);
    }
    assert_eq!(console.line(), "");
}
