use anyhow::Result;
use colored::Colorize;

use crate::commands::session::Session;
use crate::core::batch::{validate_all, ValidationReport};

pub(crate) fn print_separator() {
    println!("{}", "=".repeat(40).purple());
}

/// Probe every URL and print the valid/invalid totals
pub fn execute(session: &mut Session<'_>) -> Result<ValidationReport> {
    let report = validate_all(&session.groups, session.extractor);

    println!();
    print_separator();
    println!("{}", format!("Valid:   {}", report.valid.url_count()).green());
    println!("{}", format!("Invalid: {}", report.invalid.url_count()).red());

    session.prompter.pause()?;
    Ok(report)
}
