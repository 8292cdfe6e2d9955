//! Task extraction from markdown plan documents.
//!
//! Two independent strategies run over the same text: checkbox list items
//! and markdown tables. Their outputs are concatenated (checkbox tasks
//! first), validated, and deduplicated by exact title.

mod checkbox;
mod table;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use checkbox::parse_checkbox_tasks;
pub use table::{map_status_text, parse_table_tasks};

/// Longest title, in characters, a task may carry.
pub const MAX_TITLE_CHARS: usize = 500;

/// Completion state of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// In progress.
    Doing,
    /// Finished.
    Done,
    /// Cannot proceed.
    Blocked,
}

impl TaskStatus {
    /// Returns the lowercase wire name of this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One actionable item discovered in a plan document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Cleaned title.
    pub title: String,
    /// Completion state.
    pub status: TaskStatus,
    /// Plan file the task came from, relative to the checkout root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// 1-based line number of the task in its plan file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    /// Priority tag, if one was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Trailing description split off the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reason a candidate task was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRejection {
    /// Title is empty or whitespace only.
    EmptyTitle,
    /// Title exceeds [`MAX_TITLE_CHARS`]; carries the actual length.
    TitleTooLong(usize),
}

impl fmt::Display for TaskRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => f.write_str("empty title"),
            Self::TitleTooLong(len) => {
                write!(f, "title is {len} characters (limit {MAX_TITLE_CHARS})")
            }
        }
    }
}

/// Checks a candidate task against the title rules.
///
/// Status needs no check: [`TaskStatus`] only has the four valid values.
///
/// # Errors
///
/// Returns the [`TaskRejection`] describing the first rule the task breaks.
pub fn validate(task: &Task) -> Result<(), TaskRejection> {
    if task.title.trim().is_empty() {
        return Err(TaskRejection::EmptyTitle);
    }
    let len = task.title.chars().count();
    if len > MAX_TITLE_CHARS {
        return Err(TaskRejection::TitleTooLong(len));
    }
    Ok(())
}

/// Extracts every task from a markdown document.
///
/// Invalid candidates are dropped silently (logged at debug level). When
/// two candidates share a title, the first one wins; the comparison is
/// exact and case-sensitive.
#[must_use]
pub fn extract(content: &str, file_path: Option<&str>) -> Vec<Task> {
    let candidates = parse_checkbox_tasks(content, file_path)
        .into_iter()
        .chain(parse_table_tasks(content, file_path));

    let mut seen: HashSet<String> = HashSet::new();
    let mut tasks = Vec::new();
    for task in candidates {
        if let Err(reason) = validate(&task) {
            debug!(title = %task.title, %reason, "dropping task");
            continue;
        }
        if seen.insert(task.title.clone()) {
            tasks.push(task);
        }
    }

    info!(count = tasks.len(), source = file_path.unwrap_or("content"), "extracted tasks");
    tasks
}
