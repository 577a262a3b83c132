use crate::core::error::{ResolveError, Result};
use std::io::{BufRead, Stdin, StdinLock, Stdout, Write};

/// Operator interaction used by the selector and the filename collision check.
pub trait Prompter {
    /// Print informational text, such as the variant listing.
    fn show(&mut self, text: &str) -> Result<()>;

    /// Print `question` and block until one line of input arrives.
    /// The trailing newline is removed.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Line-based prompter over any reader/writer pair.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl ConsolePrompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = std::io::stdin();
        Self::new(stdin.lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn show(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ResolveError::InputClosed);
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        Ok(answer)
    }
}

/// Prompter for unattended runs: any question is an error instead of a stall.
#[derive(Debug, Default)]
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn show(&mut self, text: &str) -> Result<()> {
        tracing::debug!("{}", text);
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        Err(ResolveError::PromptUnavailable(question.trim().to_string()))
    }
}
