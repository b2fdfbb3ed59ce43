//! Parser tests for console command line parsing

use rust_morse_led::console::parser::{parse_line, ParsedCommand};

#[test]
fn test_parse_simple_command() {
    let cmd = parse_line("help");
    assert_eq!(cmd.command, "help");
    assert_eq!(cmd.args[0], None);
    assert_eq!(cmd.rest, "");
}

#[test]
fn test_parse_command_with_one_arg() {
    let cmd = parse_line("show dot_ms");
    assert_eq!(cmd.command, "show");
    assert_eq!(cmd.args[0], Some("dot_ms"));
    assert_eq!(cmd.args[1], None);
}

#[test]
fn test_parse_command_with_two_args() {
    let cmd = parse_line("set dot_ms 120");
    assert_eq!(cmd.command, "set");
    assert_eq!(cmd.arg(0), Some("dot_ms"));
    assert_eq!(cmd.arg(1), Some("120"));
    assert_eq!(cmd.arg(2), None);
}

#[test]
fn test_parse_trims_whitespace() {
    let cmd = parse_line("  show   w*  ");
    assert_eq!(cmd.command, "show");
    assert_eq!(cmd.args[0], Some("w*"));
}

#[test]
fn test_parse_empty_line() {
    let cmd = parse_line("");
    assert_eq!(cmd.command, "");
    assert_eq!(cmd.rest, "");

    let cmd = parse_line("   ");
    assert_eq!(cmd.command, "");
}

#[test]
fn test_parse_max_args() {
    let cmd = parse_line("send one two three four");
    assert_eq!(cmd.args, [Some("one"), Some("two"), Some("three")]);
    // "four" is dropped from args (max 3) but kept in the remainder
    assert_eq!(cmd.rest, "one two three four");
}

#[test]
fn test_rest_keeps_inner_spacing() {
    let cmd = parse_line("send  HI   THERE ");
    assert_eq!(cmd.command, "send");
    assert_eq!(cmd.rest, "HI   THERE ");
}

#[test]
fn test_empty_command() {
    let cmd = ParsedCommand::empty();
    assert_eq!(cmd.command, "");
    assert_eq!(cmd.arg(0), None);
}
