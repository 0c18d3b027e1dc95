//! Task list controller: the cache, the view state, and remote mutations.
//!
//! The cache is always a verbatim snapshot of the last successful fetch.
//! Mutations never touch it directly; they go through the remote API and
//! re-fetch, so a failed request leaves the previous snapshot intact.

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::suggest;
use crate::task::{self, Filter, Task, TaskView, ViewState};

/// Owns one remote task collection and the process-local view over it.
#[derive(Debug)]
pub struct TaskList {
    api: ApiClient,
    tasks: Vec<Task>,
    view: ViewState,
}

impl TaskList {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            view: ViewState::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn require(&self, id: u64) -> Result<&Task> {
        self.get(id).ok_or(Error::TaskNotFound(id))
    }

    /// Derive the current page of the filtered list.
    pub fn view(&self) -> TaskView {
        task::derive_view(&self.tasks, self.view)
    }

    /// Replace the cache with a fresh snapshot from the server.
    pub async fn refresh(&mut self) -> Result<()> {
        let tasks = self.api.fetch_all().await?;
        self.tasks = tasks;
        Ok(())
    }

    /// Create a task. Empty or whitespace-only text is rejected locally,
    /// before any request. A successful add resets the view to filter
    /// `all`, page 1.
    pub async fn add(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }

        self.api.create(text).await?;
        self.refresh().await?;
        self.view.reset();
        Ok(())
    }

    /// Add a suggestion, unless its text already exists on the list.
    pub async fn add_suggestion(&mut self, text: &str) -> Result<()> {
        if suggest::find_duplicate(&self.tasks, text).is_some() {
            return Err(Error::DuplicateTask(text.trim().to_string()));
        }
        self.add(text).await
    }

    /// Replace a task's text. Returns false (and sends nothing) when the
    /// trimmed replacement is empty or identical to the current text.
    pub async fn edit(&mut self, id: u64, new_text: &str) -> Result<bool> {
        let current = self.require(id)?.text.clone();
        let text = new_text.trim();
        if text.is_empty() || text == current {
            return Ok(false);
        }

        self.api.rename(id, text).await?;
        self.refresh().await?;
        Ok(true)
    }

    /// Mark a task done. Returns false (and sends nothing) when the cached
    /// task is already done.
    pub async fn mark_done(&mut self, id: u64) -> Result<bool> {
        if self.require(id)?.done {
            return Ok(false);
        }

        self.api.complete(id).await?;
        self.refresh().await?;
        Ok(true)
    }

    /// Delete a task. Confirmation is the caller's concern; this method is
    /// only invoked once the user has confirmed.
    pub async fn remove(&mut self, id: u64) -> Result<()> {
        self.require(id)?;
        self.api.delete(id).await?;
        self.refresh().await?;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.view.set_filter(filter);
    }

    /// Returns true if the page changed; out-of-bounds requests are no-ops.
    pub fn goto_page(&mut self, page: usize) -> bool {
        let filtered = self
            .tasks
            .iter()
            .filter(|task| self.view.filter.matches(task))
            .count();
        self.view.goto_page(page, task::page_count(filtered))
    }

    pub fn next_page(&mut self) -> bool {
        self.goto_page(self.view.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        if self.view.page > 1 {
            self.goto_page(self.view.page - 1)
        } else {
            false
        }
    }
}
