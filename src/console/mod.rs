//! Serial console: the device file on a line-oriented terminal.
//!
//! Byte driven, zero heap allocation apart from what `send` hands to the
//! device.

pub mod commands;
pub mod console;
pub mod error;
pub mod line_buffer;
pub mod parser;
pub mod target;

pub use commands::{command_names, execute, CommandDescriptor, COMMANDS};
pub use console::{Console, VERSION};
pub use error::ConsoleError;
pub use line_buffer::{LineBuffer, LINE_SIZE};
pub use parser::{parse_line, ParsedCommand};
pub use target::ConsoleTarget;
