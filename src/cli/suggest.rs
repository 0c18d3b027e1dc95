//! td suggest command implementations.

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::suggest::{self, Suggestion};

/// Options for the suggest show command
pub struct ShowOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Options for the suggest add command
pub struct AddOptions {
    pub text: String,
    pub api_url: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct ShowReport {
    suggestions: Vec<&'static Suggestion>,
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let picked = suggest::pick(suggest::PICK_COUNT);

    let mut human = HumanOutput::new("Suggestions");
    for suggestion in &picked {
        human.push_detail(format!("{} ({})", suggestion.text, suggestion.subtitle));
    }
    human.push_next_step("td suggest add \"<text>\"".to_string());

    let report = ShowReport {
        suggestions: picked,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "suggest show",
        &report,
        Some(&human),
    )
}

#[derive(serde::Serialize)]
struct AddReport {
    text: String,
    total: usize,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut list = super::build_list(options.api_url)?;
    let runtime = super::runtime()?;

    // The duplicate check runs against the current snapshot.
    runtime.block_on(list.refresh())?;
    runtime.block_on(list.add_suggestion(&options.text))?;

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
        "suggest add",
        &report,
        Some(&human),
    )
}
