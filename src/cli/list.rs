//! td list command implementation.
//!
//! Fetches the collection and prints one page of the filtered view.

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{format_relative_time, Filter, Task};

/// Options for the list command
pub struct ListOptions {
    pub filter: String,
    pub page: usize,
    pub api_url: Option<String>,
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}

pub fn run(options: ListOptions) -> Result<()> {
    let filter: Filter = options.filter.parse()?;

    let mut list = super::build_list(options.api_url)?;
    let runtime = super::runtime()?;
    runtime.block_on(list.refresh())?;

    list.set_filter(filter);
    // Out-of-bounds pages are a no-op and leave the view on page 1.
    list.goto_page(options.page);

    let view = list.view();

    let mut human = HumanOutput::new(capitalize(&view.count_line()));
    human.push_summary("filter", view.filter.to_string());
    human.push_summary("page", format!("{}/{}", view.page, view.page_count.max(1)));

    if view.tasks.is_empty() {
        human.push_detail(view.empty_message());
    } else {
        for task in &view.tasks {
            human.push_detail(task_line(task, options.verbose));
        }
    }

    if view.page_count > 1 {
        human.push_next_step(format!(
            "td list --filter {} --page <1..{}>",
            view.filter, view.page_count
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &view,
        Some(&human),
    )
}

fn task_line(task: &Task, verbose: bool) -> String {
    let marker = if task.done { "[x]" } else { "[ ]" };
    let mut line = format!("{} #{} {}", marker, task.id, task.text);
    if verbose {
        if let Some(created) = task.created() {
            line.push_str(&format!("  (added {})", format_relative_time(&created)));
        }
        if let Some(completed) = task.completed() {
            line.push_str(&format!("  (done {})", format_relative_time(&completed)));
        }
    }
    line
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
