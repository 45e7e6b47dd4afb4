//! Extracted Tasks
//!
//! Output of the task extractor: a [`Task`] with its resolved attributes and a
//! [`TaskEntry`] tree mirroring how tasks are nested in the document.
//!
//! # Examples
//!
//! ```rust
//! use tasklist_core::models::{Task, NO_DATE};
//! use chrono::NaiveDate;
//!
//! let mut task = Task::new("Write report [d: 11/12/2012]");
//! assert_eq!(task.due_key(), NO_DATE);
//!
//! task.due = NaiveDate::from_ymd_opt(2012, 12, 11);
//! assert_eq!(task.due_key(), "2012-12-11");
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sort key used for tasks without a due date
///
/// Sorts after every real `YYYY-MM-DD` date.
pub const NO_DATE: &str = "9999";

/// A single task with all inherited attributes resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// False once the checkbox is checked or crossed (and no subtask is open)
    pub open: bool,
    /// False when the task waits on a start date, a tag or a previous task
    pub actionable: bool,
    /// Number of `!` marks, inherited when the task has none (0 = none)
    pub priority: u32,
    /// Due date from `[d: ...]`, inherited when the task has none
    pub due: Option<NaiveDate>,
    /// Start (threshold) date from `[f: ...]`, the later of own and inherited
    pub start: Option<NaiveDate>,
    /// Own `@tags` plus all tags of enclosing tasks and headers
    pub tags: BTreeSet<String>,
    /// Text of the task line, annotations left inline
    pub description: String,
}

impl Task {
    /// Create an open, actionable task without attributes
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            open: true,
            actionable: true,
            priority: 0,
            due: None,
            start: None,
            tags: BTreeSet::new(),
            description: description.into(),
        }
    }

    /// Due date as `YYYY-MM-DD`, or [`NO_DATE`]
    pub fn due_key(&self) -> String {
        self.due
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| NO_DATE.to_string())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// A task together with its subtasks, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub task: Task,
    pub children: Vec<TaskEntry>,
}

impl TaskEntry {
    pub fn new(task: Task, children: Vec<TaskEntry>) -> Self {
        Self { task, children }
    }

    pub fn leaf(task: Task) -> Self {
        Self::new(task, Vec::new())
    }

    /// Number of tasks in this entry including all descendants
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TaskEntry::count).sum::<usize>()
    }

    /// Depth-first iterator over this task and all subtasks
    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let entry = stack.pop()?;
            stack.extend(entry.children.iter().rev());
            Some(&entry.task)
        })
    }
}

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;
