//! Line-oriented console input and output.

use crossterm::style::Stylize;
#[cfg(test)]
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

/// Blocking source of user input lines.
pub trait LineReader {
    /// Show `prompt` and read one line without its terminator.
    ///
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Sink for console output.
pub trait LineRenderer {
    fn line(&mut self, text: &str);

    /// Report a failed command.
    fn error(&mut self, text: &str) {
        self.line(text);
    }
}

/// Reads from standard input.
pub struct StdinReader {
    stdin: io::Stdin,
}

impl StdinReader {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }
}

/// Writes to standard output, colouring errors when attached to a terminal.
pub struct StdoutRenderer {
    styled: bool,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self {
            styled: io::stdout().is_terminal(),
        }
    }
}

impl Default for StdoutRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineRenderer for StdoutRenderer {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error(&mut self, text: &str) {
        if self.styled {
            println!("{}", text.red());
        } else {
            println!("{}", text);
        }
    }
}

/// Replays a fixed list of answers, recording the prompts it was shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedReader {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedReader {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// Collects output lines in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CapturedOutput {
    pub lines: Vec<String>,
    pub errors: Vec<String>,
}

#[cfg(test)]
impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// All output joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
impl LineRenderer for CapturedOutput {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
        self.lines.push(text.to_string());
    }
}
