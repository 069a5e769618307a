//! Operator interaction.
//!
//! Every stage talks to the operator through a [`Prompter`]: ask a question,
//! get one line back. [`retry`] and [`ask_until`] implement the
//! report-and-ask-again loop for recoverable input errors.

use crate::error::{PlotError, Result};
use std::io::{BufRead, Write};
use tracing::warn;

/// Line-oriented question and answer surface.
pub trait Prompter {
    /// Show `question` and block for one line of input (without the newline).
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Show a message line.
    fn say(&mut self, message: &str) -> Result<()>;
}

/// Prompter over any reader/writer pair, usually stdin and stdout.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console reading answers from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(PlotError::InputClosed);
        }
        let line = String::from_utf8(buf)
            .map_err(|_| PlotError::validation("input is not valid UTF-8"))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// Run `attempt` until it succeeds, reporting recoverable errors and trying
/// again. Fatal errors are returned as-is.
pub fn retry<P, T, F>(prompter: &mut P, mut attempt: F) -> Result<T>
where
    P: Prompter + ?Sized,
    F: FnMut(&mut P) -> Result<T>,
{
    loop {
        match attempt(prompter) {
            Ok(value) => return Ok(value),
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "rejected input");
                prompter.say(&format!("Error: {}. Please try again.", err))?;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Ask `question` until `parse` accepts the answer.
pub fn ask_until<P, T, F>(prompter: &mut P, question: &str, mut parse: F) -> Result<T>
where
    P: Prompter + ?Sized,
    F: FnMut(&str) -> Result<T>,
{
    retry(prompter, |p| {
        let answer = p.ask(question)?;
        parse(&answer)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_strips_line_endings() {
        let mut c = console("hello\r\nworld\n");
        assert_eq!(c.ask("? ").unwrap(), "hello");
        assert_eq!(c.ask("? ").unwrap(), "world");
        assert!(matches!(c.ask("? "), Err(PlotError::InputClosed)));
    }

    #[test]
    fn ask_until_reprompts_on_recoverable_error() {
        let mut c = console("abc\n-1\n4\n");
        let value = ask_until(&mut c, "n: ", |s| {
            let n: i64 = s
                .trim()
                .parse()
                .map_err(|_| PlotError::validation("not a number"))?;
            if n <= 0 {
                return Err(PlotError::validation("must be positive"));
            }
            Ok(n)
        })
        .unwrap();
        assert_eq!(value, 4);

        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("n: ").count(), 3);
        assert!(out.contains("Error: not a number. Please try again."));
        assert!(out.contains("Error: must be positive. Please try again."));
    }

    #[test]
    fn invalid_utf8_line_is_asked_again() {
        let mut c = Console::new(Cursor::new(b"\xff\xfe\n12\n".to_vec()), Vec::new());
        let value = ask_until(&mut c, "n: ", |s| {
            s.trim()
                .parse::<i64>()
                .map_err(|_| PlotError::validation("not a number"))
        })
        .unwrap();
        assert_eq!(value, 12);

        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("n: ").count(), 2);
        assert!(out.contains("Error: input is not valid UTF-8. Please try again."));
    }

    #[test]
    fn fatal_errors_stop_the_loop() {
        let mut c = console("x\n");
        let err = ask_until(&mut c, "? ", |_| -> Result<()> { Err(PlotError::InputClosed) })
            .unwrap_err();
        assert!(matches!(err, PlotError::InputClosed));
    }
}
