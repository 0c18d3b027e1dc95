//! Command-line interface for td
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::list::TaskList;

mod add;
mod done;
mod edit;
mod list;
mod rm;
mod suggest;

/// td - terminal todo client
///
/// A CLI for a remote todo-list service: list, add, edit, complete, and
/// delete tasks, with filtering, pagination, and randomized suggestions.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base address of the task service (overrides config)
    #[arg(long, global = true, env = "TD_API_URL")]
    pub api_url: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the task list
    List {
        /// Filter: all, done, undone
        #[arg(long, default_value = "all")]
        filter: String,

        /// Page of the filtered list (3 tasks per page)
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Add a task
    Add {
        /// Task text
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Replace a task's text
    Edit {
        /// Task id
        id: u64,

        /// Replacement text (prompted for when omitted)
        text: Vec<String>,
    },

    /// Mark a task as done
    Done {
        /// Task id
        id: u64,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Task suggestions
    #[command(subcommand)]
    Suggest(SuggestCommands),

    /// Open the interactive UI
    Ui,
}

/// Suggestion subcommands
#[derive(Subcommand, Debug)]
pub enum SuggestCommands {
    /// Show random suggestions
    Show,

    /// Add a suggestion to the list (blocked when it already exists)
    Add {
        /// Suggestion text
        #[arg(required = true)]
        text: Vec<String>,
    },
}

/// Build the API client from config plus CLI overrides.
pub(crate) fn build_api(api_url: Option<String>) -> Result<ApiClient> {
    let config = Config::load();
    let base_url = api_url.unwrap_or(config.api.base_url.clone());
    let timeout = config.timeout()?;
    ApiClient::new(&base_url, timeout)
}

/// Build the task list controller from config plus CLI overrides.
pub(crate) fn build_list(api_url: Option<String>) -> Result<TaskList> {
    Ok(TaskList::new(build_api(api_url)?))
}

/// Runtime for blocking on the async core from one-shot commands.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Error::OperationFailed(format!("failed to start async runtime: {err}")))
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::List { filter, page } => list::run(list::ListOptions {
                filter,
                page,
                api_url: self.api_url,
                json: self.json,
                quiet: self.quiet,
                verbose: self.verbose,
            }),
            Commands::Add { text } => add::run(add::AddOptions {
                text: text.join(" "),
                api_url: self.api_url,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit { id, text } => edit::run(edit::EditOptions {
                id,
                text: if text.is_empty() {
                    None
                } else {
                    Some(text.join(" "))
                },
                api_url: self.api_url,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Done { id } => done::run(done::DoneOptions {
                id,
                api_url: self.api_url,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Rm { id, yes } => rm::run(rm::RmOptions {
                id,
                yes,
                api_url: self.api_url,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Suggest(cmd) => match cmd {
                SuggestCommands::Show => suggest::run_show(suggest::ShowOptions {
                    json: self.json,
                    quiet: self.quiet,
                }),
                SuggestCommands::Add { text } => suggest::run_add(suggest::AddOptions {
                    text: text.join(" "),
                    api_url: self.api_url,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Ui => {
                let api = build_api(self.api_url)?;
                crate::ui::run(api)
            }
        }
    }
}
