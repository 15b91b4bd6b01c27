// UI prompts and user interaction module

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input};
use std::io::{self, BufRead, IsTerminal, Write};

/// Interactive input the dispatcher depends on.
///
/// The terminal implementation talks to the user; tests script the answers.
pub trait Prompter {
    /// Read one line of free-form input
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Yes/no question, defaulting to "no"
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Block until the user acknowledges the screen
    fn pause(&mut self) -> Result<()>;
}

/// `Prompter` backed by dialoguer on the real terminal
#[derive(Debug)]
pub struct TerminalPrompter {
    wait_on_pause: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self { wait_on_pause: true }
    }

    /// For one-shot subcommands: `pause` returns immediately
    pub fn without_pause() -> Self {
        Self {
            wait_on_pause: false,
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Read one trimmed answer; `None` once the input is exhausted
fn read_answer(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Plain prompt-and-read-line, for when stdin is piped or redirected
fn ask_line(prompt: &str, reader: &mut impl BufRead) -> Result<String> {
    print!("{}: ", prompt.yellow());
    io::stdout().flush()?;
    read_answer(reader)?.ok_or_else(|| anyhow::anyhow!("Input closed before an answer was given"))
}

fn confirm_line(prompt: &str, reader: &mut impl BufRead) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    Ok(read_answer(reader)?.is_some_and(|answer| parse_yes(&answer)))
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        // dialoguer refuses to run without a terminal
        if !io::stdin().is_terminal() {
            return ask_line(prompt, &mut io::stdin().lock());
        }

        let answer: String = Input::new()
            .with_prompt(prompt.yellow().to_string())
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        if !io::stdin().is_terminal() {
            return confirm_line(prompt, &mut io::stdin().lock());
        }

        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    fn pause(&mut self) -> Result<()> {
        if !self.wait_on_pause {
            return Ok(());
        }

        println!();
        print!("{}", "Press Enter to continue...".dimmed());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(())
    }
}

/// Display a warning message
pub fn warn(message: &str) {
    println!("{}", message.yellow());
}

/// Display an info message
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{}", message.green());
}

/// Display an error message
pub fn error(message: &str) {
    println!("{}", message.red());
}

/// Display a dimmed/secondary message
pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}

/// Display a bold message
pub fn bold(message: &str) {
    println!("{}", message.bold());
}
