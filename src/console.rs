// Operator I/O. The session and dispatcher only ever ask for the next line
// of input and emit lines of output, so they run the same against a real
// terminal or a fixed script.

use crate::error::{ClientError, Result};
use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::time::Duration;

pub trait Console {
    /// Ask the operator for one line of free text.
    fn prompt(&mut self, label: &str) -> Result<String>;

    fn say(&mut self, line: &str);

    /// Local rejection: bad menu choice or malformed input.
    fn warn(&mut self, line: &str);

    /// A request failed or its response could not be used.
    fn error(&mut self, line: &str);

    /// Run a blocking request. Terminals show a spinner meanwhile.
    fn in_flight<T>(&mut self, _label: &str, request: impl FnOnce() -> T) -> T {
        request()
    }
}

/// Interactive terminal session built on `dialoguer`.
#[derive(Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole
    }
}

impl Console for TerminalConsole {
    fn prompt(&mut self, label: &str) -> Result<String> {
        let line: String = Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn warn(&mut self, line: &str) {
        println!("{}", line.yellow());
    }

    fn error(&mut self, line: &str) {
        println!("{}", line.red());
    }

    fn in_flight<T>(&mut self, label: &str, request: impl FnOnce() -> T) -> T {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(label.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        let out = request();
        spinner.finish_and_clear();
        out
    }
}

/// Replays canned input and keeps a transcript of everything emitted.
/// Warnings and errors are prefixed with `warning: ` / `error: `.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    transcript: Vec<String>,
    prompts: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            input: input.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            prompts: 0,
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn prompts(&self) -> usize {
        self.prompts
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    /// True if any emitted line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, _label: &str) -> Result<String> {
        self.prompts += 1;
        self.input.pop_front().ok_or(ClientError::InputClosed)
    }

    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn warn(&mut self, line: &str) {
        self.transcript.push(format!("warning: {line}"));
    }

    fn error(&mut self, line: &str) {
        self.transcript.push(format!("error: {line}"));
    }
}
