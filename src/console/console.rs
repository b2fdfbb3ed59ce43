//! Console state machine: bytes in, command results out.

use core::fmt::Write;

use super::{execute, parse_line, ConsoleError, ConsoleTarget, LineBuffer};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Prompt printed before each line.
pub const PROMPT: &str = "morse> ";

/// Console state machine
pub struct Console {
    line: LineBuffer,
    /// Echo typed characters (off when the terminal echoes locally)
    echo: bool,
    /// Escape sequence state
    escape_state: EscapeState,
}

#[derive(Clone, Copy, PartialEq)]
enum EscapeState {
    Normal,
    Escape,  // Got ESC
    Bracket, // Got ESC [
}

impl Console {
    /// Create new console with echo on.
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            echo: true,
            escape_state: EscapeState::Normal,
        }
    }

    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a command ran, None if more input needed.
    pub fn process_byte(
        &mut self,
        byte: u8,
        target: &mut dyn ConsoleTarget,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        match self.escape_state {
            EscapeState::Normal => self.process_normal(byte, target, out),
            EscapeState::Escape => {
                self.escape_state = if byte == b'[' {
                    EscapeState::Bracket
                } else {
                    EscapeState::Normal
                };
                None
            }
            EscapeState::Bracket => {
                // Cursor keys are not supported; swallow the final byte
                if !byte.is_ascii_digit() && byte != b';' {
                    self.escape_state = EscapeState::Normal;
                }
                None
            }
        }
    }

    fn process_normal(
        &mut self,
        byte: u8,
        target: &mut dyn ConsoleTarget,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        match byte {
            // Enter
            b'\r' | b'\n' => {
                if self.echo {
                    let _ = writeln!(out);
                }

                if self.line.is_empty() {
                    self.print_prompt(out);
                    return None;
                }

                let cmd = parse_line(self.line.as_str());
                let result = execute(&cmd, target, out);
                if let Err(e) = result {
                    let _ = writeln!(out, "{}", e);
                }
                self.line.clear();
                self.print_prompt(out);
                Some(result)
            }

            // Backspace
            0x7F | 0x08 => {
                if !self.line.is_empty() {
                    self.line.backspace();
                    if self.echo {
                        let _ = write!(out, "\x08 \x08");
                    }
                }
                None
            }

            // Escape
            0x1B => {
                self.escape_state = EscapeState::Escape;
                None
            }

            // Ctrl+C
            0x03 => {
                let _ = writeln!(out, "^C");
                self.line.clear();
                self.print_prompt(out);
                None
            }

            // Ctrl+U (clear line)
            0x15 => {
                if self.echo {
                    for _ in 0..self.line.len() {
                        let _ = write!(out, "\x08 \x08");
                    }
                }
                self.line.clear();
                None
            }

            // Printable character, tab kept as free text for `send`
            b'\t' | 0x20..=0x7E => {
                if self.line.push(byte) && self.echo {
                    let _ = write!(out, "{}", byte as char);
                }
                None
            }

            _ => None,
        }
    }

    /// Current (unsubmitted) line.
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Write) {
        let _ = write!(out, "{}", PROMPT);
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "\r\n{}", VERSION);
        let _ = writeln!(out, "Type 'help' for commands.\r");
        self.print_prompt(out);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
