//! Yes/no confirmation

use std::io::{BufRead, Write};

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> std::io::Result<bool>;
}

/// Reads the answer from a line-based input, writing the question to `output`
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// Always answers the same; used for `--yes`
pub struct Preset(pub bool);

impl Confirm for Preset {
    fn confirm(&mut self, _question: &str) -> std::io::Result<bool> {
        Ok(self.0)
    }
}
