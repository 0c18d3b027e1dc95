//! Task model and view derivation.
//!
//! Tasks are owned by the remote service; the client holds a transient,
//! fully-replaceable snapshot plus process-local view state (filter and
//! page). Everything in this module is pure.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fixed page size for the task list view.
pub const PAGE_SIZE: usize = 3;

/// A unit of work, identified by a server-assigned id.
///
/// `created_at` / `completed_at` are Unix-seconds stamps the server includes
/// alongside each task. They are display-only; mutations never send them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<f64>,
}

impl Task {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(epoch_to_datetime)
    }

    pub fn completed(&self) -> Option<DateTime<Utc>> {
        self.completed_at.and_then(epoch_to_datetime)
    }
}

fn epoch_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc() as i64;
    let nanos = ((secs - secs.trunc()) * 1e9) as u32;
    Utc.timestamp_opt(whole, nanos).single()
}

/// Render a past timestamp as a short relative age.
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let diff = Utc::now() - *dt;

    if diff.num_days() > 0 {
        format!("{}d ago", diff.num_days())
    } else if diff.num_hours() > 0 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_minutes() > 0 {
        format!("{}m ago", diff.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Which tasks the view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Done,
    Undone,
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Done => task.done,
            Filter::Undone => !task.done,
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "done" => Ok(Filter::Done),
            "undone" => Ok(Filter::Undone),
            _ => Err(Error::InvalidArgument(format!(
                "invalid filter '{}': must be all, done, or undone",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Filter::All => "all",
            Filter::Done => "done",
            Filter::Undone => "undone",
        };
        write!(f, "{label}")
    }
}

/// Process-local view state.
///
/// Changing the filter resets to the first page; page navigation outside
/// `1..=page_count` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub filter: Filter,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: Filter::All,
            page: 1,
        }
    }
}

impl ViewState {
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.page = 1;
    }

    /// Returns true if the page changed.
    pub fn goto_page(&mut self, page: usize, page_count: usize) -> bool {
        if page >= 1 && page <= page_count {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Number of pages the filtered list occupies.
pub fn page_count(filtered: usize) -> usize {
    filtered.div_ceil(PAGE_SIZE)
}

/// One derived page of the filtered task list, plus counts for the summary
/// line.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub tasks: Vec<Task>,
    pub filter: Filter,
    pub page: usize,
    pub page_count: usize,
    pub filtered: usize,
    pub total: usize,
    pub done: usize,
    pub pending: usize,
}

impl TaskView {
    pub fn count_line(&self) -> String {
        let plural = if self.filtered == 1 { "" } else { "s" };
        match self.filter {
            Filter::Done => format!(
                "showing {} completed task{} ({} of {} total)",
                self.filtered, plural, self.done, self.total
            ),
            Filter::Undone => format!(
                "showing {} pending task{} ({} of {} total)",
                self.filtered, plural, self.pending, self.total
            ),
            Filter::All => format!(
                "showing {} task{} ({} done, {} pending)",
                self.filtered, plural, self.done, self.pending
            ),
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self.filter {
            Filter::Done => "No completed tasks yet!",
            Filter::Undone => "No pending tasks!",
            Filter::All => "No tasks yet!",
        }
    }
}

/// Pure derivation of the current page from the cache and view state.
///
/// A page left past the end by a shrinking cache renders as the last
/// non-empty page rather than an empty slice.
pub fn derive_view(tasks: &[Task], state: ViewState) -> TaskView {
    let filtered: Vec<&Task> = tasks
        .iter()
        .filter(|task| state.filter.matches(task))
        .collect();
    let page_count = page_count(filtered.len());
    let page = state.page.min(page_count).max(1);

    let start = (page - 1) * PAGE_SIZE;
    let slice: Vec<Task> = filtered
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|task| (*task).clone())
        .collect();

    let done = tasks.iter().filter(|task| task.done).count();

    TaskView {
        tasks: slice,
        filter: state.filter,
        page,
        page_count,
        filtered: filtered.len(),
        total: tasks.len(),
        done,
        pending: tasks.len() - done,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, text: &str, done: bool) -> Task {
        Task {
            id,
            text: text.to_string(),
            done,
            created_at: None,
            completed_at: None,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Buy milk", false),
            task(2, "Ship release", true),
            task(3, "Water plants", false),
            task(4, "File taxes", true),
            task(5, "Call dentist", false),
        ]
    }

    #[test]
    fn filter_matches_by_done_state() {
        let tasks = sample();
        assert!(tasks.iter().all(|t| Filter::All.matches(t)));
        assert!(tasks
            .iter()
            .filter(|t| Filter::Done.matches(t))
            .all(|t| t.done));
        assert!(tasks
            .iter()
            .filter(|t| Filter::Undone.matches(t))
            .all(|t| !t.done));
    }

    #[test]
    fn filter_parses_known_values() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("Done".parse::<Filter>().unwrap(), Filter::Done);
        assert_eq!("UNDONE".parse::<Filter>().unwrap(), Filter::Undone);
        assert!("bogus".parse::<Filter>().is_err());
    }

    #[test]
    fn page_count_is_ceil_of_thirds() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(3), 1);
        assert_eq!(page_count(4), 2);
        assert_eq!(page_count(6), 2);
        assert_eq!(page_count(7), 3);
    }

    #[test]
    fn goto_page_out_of_bounds_is_noop() {
        let mut state = ViewState::default();
        assert!(!state.goto_page(0, 2));
        assert_eq!(state.page, 1);
        assert!(!state.goto_page(3, 2));
        assert_eq!(state.page, 1);
        assert!(state.goto_page(2, 2));
        assert_eq!(state.page, 2);
    }

    #[test]
    fn set_filter_resets_page() {
        let mut state = ViewState::default();
        state.goto_page(2, 2);
        state.set_filter(Filter::Done);
        assert_eq!(state.page, 1);
        assert_eq!(state.filter, Filter::Done);
    }

    #[test]
    fn derive_view_slices_current_page() {
        let tasks = sample();
        let view = derive_view(&tasks, ViewState::default());
        assert_eq!(view.page, 1);
        assert_eq!(view.page_count, 2);
        assert_eq!(view.tasks.len(), 3);
        assert_eq!(view.tasks[0].id, 1);

        let view = derive_view(
            &tasks,
            ViewState {
                filter: Filter::All,
                page: 2,
            },
        );
        assert_eq!(view.tasks.len(), 2);
        assert_eq!(view.tasks[0].id, 4);
    }

    #[test]
    fn derive_view_respects_filter() {
        let tasks = sample();
        let view = derive_view(
            &tasks,
            ViewState {
                filter: Filter::Done,
                page: 1,
            },
        );
        assert_eq!(view.filtered, 2);
        assert!(view.tasks.iter().all(|t| t.done));

        let view = derive_view(
            &tasks,
            ViewState {
                filter: Filter::Undone,
                page: 1,
            },
        );
        assert_eq!(view.filtered, 3);
        assert!(view.tasks.iter().all(|t| !t.done));
    }

    #[test]
    fn derive_view_clamps_stale_page() {
        let tasks = sample();
        let view = derive_view(
            &tasks,
            ViewState {
                filter: Filter::All,
                page: 9,
            },
        );
        assert_eq!(view.page, 2);
        assert!(!view.tasks.is_empty());
    }

    #[test]
    fn count_line_matches_filter() {
        let tasks = sample();
        let view = derive_view(&tasks, ViewState::default());
        assert_eq!(view.count_line(), "showing 5 tasks (2 done, 3 pending)");

        let view = derive_view(
            &tasks,
            ViewState {
                filter: Filter::Done,
                page: 1,
            },
        );
        assert_eq!(view.count_line(), "showing 2 completed tasks (2 of 5 total)");
    }

    #[test]
    fn empty_cache_derives_empty_view() {
        let view = derive_view(&[], ViewState::default());
        assert_eq!(view.page, 1);
        assert_eq!(view.page_count, 0);
        assert!(view.tasks.is_empty());
        assert_eq!(view.empty_message(), "No tasks yet!");
    }

    #[test]
    fn task_deserializes_with_and_without_timestamps() {
        let bare: Task = serde_json::from_str(r#"{"id":1,"text":"a","done":false}"#).unwrap();
        assert!(bare.created_at.is_none());

        let stamped: Task = serde_json::from_str(
            r#"{"id":2,"text":"b","done":true,"created_at":1700000000.5,"completed_at":1700000100.0}"#,
        )
        .unwrap();
        assert!(stamped.created().is_some());
        assert!(stamped.completed().is_some());
    }
}
