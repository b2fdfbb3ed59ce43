//! Command line parser
//!
//! Split on whitespace, max 3 arguments. The untouched text after the
//! command word is kept as well, for commands that take free text.

/// Parsed command with up to 3 arguments
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The command name (first token)
    pub command: &'a str,
    /// Up to 3 arguments
    pub args: [Option<&'a str>; 3],
    /// Everything after the command word, leading whitespace removed
    pub rest: &'a str,
}

impl<'a> ParsedCommand<'a> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self {
            command: "",
            args: [None, None, None],
            rest: "",
        }
    }

    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }
}

/// Parse a command line into command and arguments
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let line = line.trim_start();

    let (command, rest) = match line.find(char::is_whitespace) {
        Some(end) => (&line[..end], line[end..].trim_start()),
        None => (line, ""),
    };

    let mut args = [None, None, None];
    for (i, arg) in rest.split_whitespace().take(3).enumerate() {
        args[i] = Some(arg);
    }

    ParsedCommand { command, args, rest }
}
