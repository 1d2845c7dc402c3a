//! Interactive input: numbered choices and yes/no questions.
//!
//! Prompts read whole lines. Invalid answers are reported and the question is
//! asked again. End of input aborts the session with [`BuildError::Cancelled`].

use crate::console::{self, Level};
use crate::error::{BuildError, Result};
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process' stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompter over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Everything written so far (useful when `W` is a buffer).
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Writes a line of text.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Writes a status line, formatted like [`console`] output.
    pub fn status(&mut self, level: Level, message: impl AsRef<str>) -> Result<()> {
        self.say(console::format(level, message.as_ref()))
    }

    fn complain(&mut self, message: &str) -> Result<()> {
        self.status(Level::Error, message)
    }

    /// Shows `prompt` and returns the trimmed answer.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.say("")?;
            return Err(BuildError::Cancelled);
        }
        Ok(line.trim().to_string())
    }

    /// Asks for a number in `range`. An empty answer picks `default` when given.
    pub fn choose(
        &mut self,
        prompt: &str,
        range: RangeInclusive<u32>,
        default: Option<u32>,
    ) -> Result<u32> {
        let (low, high) = (*range.start(), *range.end());
        let prompt = match default {
            Some(d) => format!("{prompt} ({low}-{high}) [default: {d}]: "),
            None => format!("{prompt} ({low}-{high}): "),
        };

        loop {
            let answer = self.ask(&prompt)?;
            if answer.is_empty() {
                if let Some(d) = default {
                    return Ok(d);
                }
            }
            match answer.parse::<u32>() {
                Ok(n) if range.contains(&n) => return Ok(n),
                Ok(_) => self.complain(&format!("Please enter a number between {low} and {high}"))?,
                Err(_) => self.complain("Please enter a valid number")?,
            }
        }
    }

    /// Asks a yes/no question. An empty answer picks `default`.
    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "y" } else { "n" };
        let prompt = format!("{prompt} (y/n) [default: {hint}]: ");

        loop {
            let answer = self.ask(&prompt)?.to_lowercase();
            match answer.as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.complain("Please enter y or n")?,
            }
        }
    }
}
