//! td done command implementation.
//!
//! Marks a task done on the remote service. A task that is already done
//! is left alone; nothing is sent.

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

/// Options for the done command
pub struct DoneOptions {
    pub id: u64,
    pub api_url: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct DoneReport {
    id: u64,
    changed: bool,
}

pub fn run(options: DoneOptions) -> Result<()> {
    let mut list = super::build_list(options.api_url)?;
    let runtime = super::runtime()?;
    runtime.block_on(list.refresh())?;

    let changed = runtime.block_on(list.mark_done(options.id))?;

    let header = if changed {
        format!("Task #{} completed", options.id)
    } else {
        format!("Task #{} is already done", options.id)
    };

    let report = DoneReport {
        id: options.id,
        changed,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "done",
        &report,
        Some(&HumanOutput::new(header)),
    )
}
