//! Command handlers

use core::fmt::Write;

use super::console::VERSION;
use super::parser::ParsedCommand;
use super::{ConsoleError, ConsoleTarget};
use crate::config::{find_param, find_params_matching, ParamDescriptor, PARAMS};
use crate::transcript::TRANSCRIPT_CAPACITY;

/// Command handler signature
pub type Handler =
    fn(&ParsedCommand<'_>, &mut dyn ConsoleTarget, &mut dyn Write) -> Result<(), ConsoleError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub handler: Handler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", brief: "List commands", handler: cmd_help },
    CommandDescriptor { name: "send", brief: "Key text on the LED", handler: cmd_send },
    CommandDescriptor { name: "read", brief: "Drain the transcript", handler: cmd_read },
    CommandDescriptor { name: "set", brief: "Set parameter value", handler: cmd_set },
    CommandDescriptor { name: "show", brief: "Show parameters", handler: cmd_show },
    CommandDescriptor { name: "stats", brief: "Device statistics", handler: cmd_stats },
    CommandDescriptor { name: "version", brief: "Firmware version", handler: cmd_version },
];

/// Execute a parsed command
pub fn execute(
    cmd: &ParsedCommand<'_>,
    target: &mut dyn ConsoleTarget,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if cmd.command.is_empty() {
        return Ok(()); // Empty line, do nothing
    }

    let handler = COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (handler.handler)(cmd, target, out)
}

/// Get all command names
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

// --- Command Implementations ---

fn cmd_help(
    cmd: &ParsedCommand<'_>,
    _target: &mut dyn ConsoleTarget,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        let c = COMMANDS
            .iter()
            .find(|c| c.name == name)
            .ok_or(ConsoleError::UnknownCommand)?;
        let _ = writeln!(out, "{}: {}", c.name, c.brief);
    } else {
        for c in COMMANDS {
            let _ = writeln!(out, "  {:<10} {}", c.name, c.brief);
        }
    }
    Ok(())
}

fn cmd_send(
    cmd: &ParsedCommand<'_>,
    target: &mut dyn ConsoleTarget,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if cmd.rest.is_empty() {
        return Err(ConsoleError::MissingArg);
    }

    let written = target.send(cmd.rest.as_bytes())?;
    let _ = writeln!(out, "sent {} bytes", written);
    Ok(())
}

fn cmd_read(
    cmd: &ParsedCommand<'_>,
    target: &mut dyn ConsoleTarget,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let max = match cmd.arg(0) {
        Some(text) => text.parse::<usize>().map_err(|_| ConsoleError::InvalidValue)?,
        None => TRANSCRIPT_CAPACITY,
    };
    if max == 0 || max > TRANSCRIPT_CAPACITY {
        return Err(ConsoleError::OutOfRange);
    }

    let mut buf = [0u8; TRANSCRIPT_CAPACITY];
    let n = target.read_transcript(&mut buf[..max])?;
    if n == 0 {
        let _ = writeln!(out, "(empty)");
        return Ok(());
    }

    // Transcript symbols are ASCII
    let text = core::str::from_utf8(&buf[..n]).map_err(|_| ConsoleError::Device)?;
    let _ = out.write_str(text);
    if !text.ends_with('\n') {
        let _ = writeln!(out);
    }
    Ok(())
}

fn cmd_set(
    cmd: &ParsedCommand<'_>,
    target: &mut dyn ConsoleTarget,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let name = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    let value = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;

    let param = find_param(name).ok_or(ConsoleError::UnknownParam)?;
    let pval = param.parse(value)?;
    (param.set_fn)(target.config(), pval)?;

    show_param(param, target, out);
    Ok(())
}

fn cmd_show(
    cmd: &ParsedCommand<'_>,
    target: &mut dyn ConsoleTarget,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    match cmd.arg(0) {
        Some(pattern) if pattern.ends_with('*') => {
            for p in find_params_matching(pattern) {
                show_param(p, target, out);
            }
        }
        Some(name) => {
            let param = find_param(name).ok_or(ConsoleError::UnknownParam)?;
            show_param(param, target, out);
        }
        None => {
            for p in PARAMS {
                show_param(p, target, out);
            }
        }
    }
    Ok(())
}

fn show_param(param: &ParamDescriptor, target: &dyn ConsoleTarget, out: &mut dyn Write) {
    let _ = write!(out, "{}=", param.name);
    let _ = param.display((param.get_fn)(target.config()), out);
    let _ = writeln!(out);
}

fn cmd_stats(
    _cmd: &ParsedCommand<'_>,
    target: &mut dyn ConsoleTarget,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let stats = target.stats();

    let _ = writeln!(out, "writes:     {}", stats.writes);
    let _ = writeln!(out, "letters:    {}", stats.letters);
    let _ = writeln!(out, "words:      {}", stats.words);
    let _ = writeln!(out, "transcript: {} buffered, {} dropped", stats.transcript_len, stats.transcript_dropped);
    let _ = writeln!(out, "log:        {} dropped", stats.log_dropped);
    if stats.fault.active {
        let _ = writeln!(
            out,
            "fault:      {} (data={}, count={})",
            stats.fault.code.as_str(),
            stats.fault.data,
            stats.fault.count
        );
    } else {
        let _ = writeln!(out, "fault:      none");
    }
    Ok(())
}

fn cmd_version(
    _cmd: &ParsedCommand<'_>,
    _target: &mut dyn ConsoleTarget,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let _ = writeln!(out, "{}", VERSION);
    Ok(())
}
