//! td edit command implementation.
//!
//! Prompts for replacement text when none is given on the command line.
//! Empty or unchanged input is a no-op and sends nothing.

use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};

/// Options for the edit command
pub struct EditOptions {
    pub id: u64,
    pub text: Option<String>,
    pub api_url: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct EditReport {
    id: u64,
    text: String,
    changed: bool,
}

pub fn run(options: EditOptions) -> Result<()> {
    let mut list = super::build_list(options.api_url)?;
    let runtime = super::runtime()?;
    runtime.block_on(list.refresh())?;

    let current = list
        .get(options.id)
        .ok_or(Error::TaskNotFound(options.id))?
        .text
        .clone();

    let new_text = match options.text {
        Some(text) => text,
        None => prompt_replacement(&current)?,
    };

    let changed = runtime.block_on(list.edit(options.id, &new_text))?;

    let text = if changed {
        new_text.trim().to_string()
    } else {
        current
    };

    let header = if changed {
        format!("Task #{} updated: \"{}\"", options.id, text)
    } else {
        format!("Task #{} unchanged", options.id)
    };

    let report = EditReport {
        id: options.id,
        text,
        changed,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &report,
        Some(&HumanOutput::new(header)),
    )
}

fn prompt_replacement(current: &str) -> Result<String> {
    print!("Edit task [{current}]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\n', '\r']).to_string())
}
