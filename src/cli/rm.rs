//! td rm command implementation.
//!
//! Deletion is destructive and requires explicit confirmation; declining
//! sends nothing to the server.

use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::Task;

/// Options for the rm command
pub struct RmOptions {
    pub id: u64,
    pub yes: bool,
    pub api_url: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct RmReport {
    id: u64,
    deleted: bool,
}

pub fn run(options: RmOptions) -> Result<()> {
    let mut list = super::build_list(options.api_url)?;
    let runtime = super::runtime()?;
    runtime.block_on(list.refresh())?;

    let task = list
        .get(options.id)
        .ok_or(Error::TaskNotFound(options.id))?
        .clone();

    let confirmed = options.yes || confirm(&task)?;
    let output = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    if !confirmed {
        let report = RmReport {
            id: options.id,
            deleted: false,
        };
        return emit_success(
            output,
            "rm",
            &report,
            Some(&HumanOutput::new("Aborted, task kept")),
        );
    }

    runtime.block_on(list.remove(options.id))?;

    let report = RmReport {
        id: options.id,
        deleted: true,
    };
    let header = format!("Task #{} deleted: \"{}\"", task.id, task.text);
    emit_success(output, "rm", &report, Some(&HumanOutput::new(header)))
}

fn confirm(task: &Task) -> Result<bool> {
    print!(
        "Delete task #{} \"{}\"? This cannot be undone. [y/N] ",
        task.id, task.text
    );
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
