//! Randomized task suggestions.
//!
//! A static pool of candidate descriptions; each display picks 3 distinct
//! entries at random. Selecting one is blocked when its text already exists
//! on the list (case-insensitive, trimmed exact match).

use rand::seq::SliceRandom;

use crate::task::Task;

/// How many suggestions a single pick shows.
pub const PICK_COUNT: usize = 3;

/// A candidate task description with a one-line blurb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Suggestion {
    pub text: &'static str,
    pub subtitle: &'static str,
}

pub const SUGGESTION_POOL: &[Suggestion] = &[
    Suggestion {
        text: "Complete project presentation",
        subtitle: "Get ready for the meeting",
    },
    Suggestion {
        text: "Review weekly goals",
        subtitle: "Track your progress",
    },
    Suggestion {
        text: "Schedule team meeting",
        subtitle: "Coordinate with colleagues",
    },
    Suggestion {
        text: "Update project documentation",
        subtitle: "Keep records current",
    },
    Suggestion {
        text: "Review budget reports",
        subtitle: "Financial planning",
    },
    Suggestion {
        text: "Prepare client proposal",
        subtitle: "Business development",
    },
    Suggestion {
        text: "Organize workspace",
        subtitle: "Boost productivity",
    },
    Suggestion {
        text: "Backup important files",
        subtitle: "Data security",
    },
    Suggestion {
        text: "Plan next week agenda",
        subtitle: "Strategic planning",
    },
    Suggestion {
        text: "Review performance metrics",
        subtitle: "Analytics and insights",
    },
    Suggestion {
        text: "Update professional skills",
        subtitle: "Continuous learning",
    },
    Suggestion {
        text: "Network with industry peers",
        subtitle: "Professional growth",
    },
];

/// Pick `n` distinct suggestions at random. A fresh pick may repeat entries
/// from earlier picks.
pub fn pick(n: usize) -> Vec<&'static Suggestion> {
    let mut rng = rand::thread_rng();
    SUGGESTION_POOL.choose_multiple(&mut rng, n).collect()
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Find a cached task whose text matches `text` case-insensitively after
/// trimming.
pub fn find_duplicate<'a>(tasks: &'a [Task], text: &str) -> Option<&'a Task> {
    let needle = normalize(text);
    tasks.iter().find(|task| normalize(&task.text) == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, text: &str) -> Task {
        Task {
            id,
            text: text.to_string(),
            done: false,
            created_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn pick_returns_distinct_pool_entries() {
        for _ in 0..20 {
            let picked = pick(PICK_COUNT);
            assert_eq!(picked.len(), PICK_COUNT);
            for (i, a) in picked.iter().enumerate() {
                assert!(SUGGESTION_POOL.iter().any(|entry| entry == *a));
                for b in picked.iter().skip(i + 1) {
                    assert_ne!(a.text, b.text);
                }
            }
        }
    }

    #[test]
    fn pick_caps_at_pool_size() {
        let picked = pick(SUGGESTION_POOL.len() + 10);
        assert_eq!(picked.len(), SUGGESTION_POOL.len());
    }

    #[test]
    fn find_duplicate_ignores_case_and_whitespace() {
        let tasks = vec![task(1, "Buy milk"), task(2, "Ship release")];
        assert!(find_duplicate(&tasks, "buy milk").is_some());
        assert!(find_duplicate(&tasks, "  BUY MILK  ").is_some());
        assert!(find_duplicate(&tasks, "buy milks").is_none());
    }

    #[test]
    fn find_duplicate_on_empty_cache_is_none() {
        assert!(find_duplicate(&[], "anything").is_none());
    }
}
