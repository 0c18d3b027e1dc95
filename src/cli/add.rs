//! td add command implementation.
//!
//! Creates a task on the remote service, then re-fetches the list. Empty
//! or whitespace-only text is rejected locally without a network call.

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

/// Options for the add command
pub struct AddOptions {
    pub text: String,
    pub api_url: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct AddReport {
    text: String,
    total: usize,
}

pub fn run(options: AddOptions) -> Result<()> {
    let mut list = super::build_list(options.api_url)?;
    let runtime = super::runtime()?;
    runtime.block_on(list.add(&options.text))?;

    let view = list.view();
    let text = options.text.trim().to_string();

    let mut human = HumanOutput::new(format!("Task added: \"{text}\""));
    human.push_summary("tasks", view.count_line());

    let report = AddReport {
        text,
        total: view.total,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &report,
        Some(&human),
    )
}
