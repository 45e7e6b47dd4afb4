//! Task Extractor
//!
//! Walks a [`ParseTree`] depth-first and collects tasks with inherited
//! attributes. The tree is only borrowed; a fresh [`TaskEntry`] tree is built
//! on every call.
//!
//! # Recognition Rules
//!
//! Per paragraph:
//!
//! 1. A paragraph whose first line starts with an excluded label (e.g.
//!    `Agenda:`) and contains a list yields no tasks at all. A list item
//!    with an excluded label is skipped together with its nested lists.
//! 2. A first line like `TODO @home !!:` followed by a list is a *header*: it
//!    is not a task itself, but every checkbox below it is, and all of them
//!    inherit the header's tags, priority and dates.
//! 3. Any other line or list item starting with a task label is a task.
//! 4. Checkboxes are tasks when `all_checkboxes` is set, when they are below
//!    a header, or when they are nested below another task.
//! 5. Items that are not tasks are transparent: their nested tasks surface at
//!    the current level with the current context.
//!
//! # Inheritance
//!
//! - Tags accumulate down the tree
//! - Priority (`!` count) and due date (`[d: ...]`) are taken from the nearest
//!   ancestor unless the task has its own
//! - The start date (`[f: ...]`) is the later of own and inherited, so a task
//!   never becomes actionable before its parent
//! - A non-actionable parent makes the whole subtree non-actionable

use crate::config::TaskListConfig;
use crate::error::Result;
use crate::models::{
    inline_text, Clock, List, Node, ParseTree, SystemClock, Task, TaskEntry,
};
use crate::utils::parse_date;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// Inline tag: `@word` at the start of the text or after whitespace
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)@(\w+)").unwrap());

/// Due date annotation: `[d: 11/12/2012]`
static DUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[d:\s*([^\]]*)\]").unwrap());

/// Start (threshold) date annotation: `[f: 22/11/2098]`
static START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[f:\s*([^\]]*)\]").unwrap());

/// Any date annotation, used to strip them from header lines
static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[df]:[^\]]*\]").unwrap());

/// Attributes passed from a task (or header) to everything nested below it
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskContext {
    tags: BTreeSet<String>,
    priority: u32,
    due: Option<NaiveDate>,
    start: Option<NaiveDate>,
    actionable: bool,
}

impl TaskContext {
    fn root() -> Self {
        Self {
            tags: BTreeSet::new(),
            priority: 0,
            due: None,
            start: None,
            actionable: true,
        }
    }
}

impl From<&Task> for TaskContext {
    fn from(task: &Task) -> Self {
        Self {
            tags: task.tags.clone(),
            priority: task.priority,
            due: task.due,
            start: task.start,
            actionable: task.actionable,
        }
    }
}

/// Text of one line, with and without strike-through content
///
/// `live` drops struck-out text and decides whether a line carries a label;
/// `full` keeps it and becomes the description.
#[derive(Debug)]
struct LineText {
    live: String,
    full: String,
}

/// A paragraph flattened into text lines and list blocks
#[derive(Debug)]
enum ParagraphLine<'a> {
    Text(LineText),
    List(&'a List),
}

/// Configuration compiled into matchers
#[derive(Debug, Clone)]
struct Patterns {
    labels: Option<Regex>,
    excluded: Option<Regex>,
    nonactionable_tags: HashSet<String>,
}

impl Patterns {
    fn compile(config: &TaskListConfig) -> Result<Self> {
        Ok(Self {
            labels: label_pattern(config.trigger_labels())?,
            excluded: label_pattern(config.excluded_labels.iter().map(String::as_str))?,
            nonactionable_tags: config
                .nonactionable_tags
                .iter()
                .map(|t| t.trim_start_matches('@').to_lowercase())
                .collect(),
        })
    }
}

/// Build `^\s*(?:A|B)(?:\W|$)` for the given labels, `None` if there are none
fn label_pattern<'a>(labels: impl Iterator<Item = &'a str>) -> Result<Option<Regex>> {
    let alternatives: Vec<String> = labels.map(|l| regex::escape(l.trim())).collect();
    if alternatives.is_empty() {
        return Ok(None);
    }
    let pattern = format!(r"^\s*(?:{})(?:\W|$)", alternatives.join("|"));
    Ok(Some(Regex::new(&pattern)?))
}

/// Extracts nested task lists from parsed documents
///
/// The configuration is snapshotted at construction; use
/// [`set_config`](Self::set_config) to change it between extraction passes.
///
/// # Examples
///
/// ```rust
/// use tasklist_core::{FixedClock, TaskExtractor, TaskListConfig, WikiParser};
/// use chrono::NaiveDate;
///
/// let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
/// let extractor = TaskExtractor::with_clock(TaskListConfig::default(), clock)?;
///
/// let tree = WikiParser::new().parse("[ ] Date [d: 11/12/2012]\n\t[ ] TODO: BAR !!!\n");
/// let tasks = extractor.extract_tasks(&tree);
///
/// let parent = &tasks[0];
/// assert_eq!(parent.task.due_key(), "2012-12-11");
/// assert_eq!(parent.children[0].task.due_key(), "2012-12-11");
/// assert_eq!(parent.children[0].task.priority, 3);
/// # Ok::<(), tasklist_core::TaskListError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TaskExtractor<C: Clock = SystemClock> {
    config: TaskListConfig,
    patterns: Patterns,
    clock: C,
}

impl TaskExtractor<SystemClock> {
    /// Create an extractor that compares start dates with the system date
    pub fn new(config: TaskListConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TaskExtractor<C> {
    /// Create an extractor with a custom source of "today"
    ///
    /// # Errors
    ///
    /// Returns `TaskListError::InvalidConfig` if the configuration fails
    /// validation.
    pub fn with_clock(config: TaskListConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let patterns = Patterns::compile(&config)?;
        Ok(Self {
            config,
            patterns,
            clock,
        })
    }

    pub fn config(&self) -> &TaskListConfig {
        &self.config
    }

    /// Replace the configuration used by subsequent extraction passes
    ///
    /// On error the previous configuration stays in effect.
    pub fn set_config(&mut self, config: TaskListConfig) -> Result<()> {
        config.validate()?;
        self.patterns = Patterns::compile(&config)?;
        self.config = config;
        tracing::debug!("Task list configuration refreshed");
        Ok(())
    }

    /// Extract all tasks of a document, nested as in the document
    pub fn extract_tasks(&self, tree: &ParseTree) -> Vec<TaskEntry> {
        let today = self.clock.today();
        let mut tasks = Vec::new();

        for node in &tree.children {
            let blocks = match node {
                Node::Paragraph(children) => children.as_slice(),
                other => std::slice::from_ref(other),
            };
            tasks.extend(self.extract_paragraph(blocks, today));
        }

        tracing::debug!("Extracted {} top-level tasks", tasks.len());
        tasks
    }

    fn extract_paragraph(&self, nodes: &[Node], today: NaiveDate) -> Vec<TaskEntry> {
        let mut lines = flatten_paragraph(nodes);
        let root = TaskContext::root();

        let header = match lines.as_slice() {
            [ParagraphLine::Text(first), rest @ ..]
                if rest.iter().any(|l| matches!(l, ParagraphLine::List(_))) =>
            {
                if self.is_excluded(&first.live) {
                    tracing::debug!(
                        "Skipping paragraph below excluded header '{}'",
                        first.full.trim()
                    );
                    return Vec::new();
                }
                match rest.first() {
                    Some(ParagraphLine::List(_)) => self.parse_header(first, &root, today),
                    _ => None,
                }
            }
            _ => None,
        };

        let (context, in_tasklist) = match header {
            Some(context) => {
                lines.remove(0);
                (context, true)
            }
            None => (root, false),
        };

        let mut tasks = Vec::new();
        for line in &lines {
            match line {
                ParagraphLine::Text(text) => {
                    if self.is_task_label(&text.live) {
                        let task = self.build_task(&text.full, true, &context, false, today);
                        tracing::trace!("Task line: {}", task.description);
                        tasks.push(TaskEntry::leaf(task));
                    }
                }
                ParagraphLine::List(list) => {
                    tasks.extend(self.extract_list(list, &context, in_tasklist, today));
                }
            }
        }
        tasks
    }

    fn extract_list(
        &self,
        list: &List,
        context: &TaskContext,
        in_tasklist: bool,
        today: NaiveDate,
    ) -> Vec<TaskEntry> {
        let mut tasks = Vec::new();
        // Whether the previous sibling is still open, for "Next:" tasks
        let mut previous_open = false;

        for item in &list.items {
            let live = inline_text(&item.content, false);
            let is_checkbox = item.bullet.is_checkbox();

            if self.is_excluded(&live) {
                tracing::debug!("Skipping list item below excluded label '{}'", live.trim());
                previous_open = is_checkbox && item.bullet.is_open();
                continue;
            }

            let is_task = (is_checkbox && (in_tasklist || self.config.all_checkboxes))
                || self.is_task_label(&live);

            if !is_task {
                previous_open = is_checkbox && item.bullet.is_open();
                for child in &item.children {
                    tasks.extend(self.extract_list(child, context, in_tasklist, today));
                }
                continue;
            }

            let full = inline_text(&item.content, true);
            let waiting = previous_open && self.is_next(&live);
            let mut task = self.build_task(&full, item.bullet.is_open(), context, waiting, today);

            let child_context = TaskContext::from(&task);
            let children: Vec<TaskEntry> = item
                .children
                .iter()
                .flat_map(|child| self.extract_list(child, &child_context, true, today))
                .collect();

            // A checked task with unfinished subtasks is not done yet
            if !task.open && children.iter().any(|c| c.task.open) {
                task.open = true;
            }

            tracing::trace!(
                "Task item: {} (open={}, actionable={}, children={})",
                task.description,
                task.open,
                task.actionable,
                children.len()
            );
            previous_open = task.open;
            tasks.push(TaskEntry::new(task, children));
        }

        tasks
    }

    /// Parse a task-list header line, `None` if the line is not a header
    ///
    /// After the label only `@tags`, `!` marks and date annotations may
    /// follow, otherwise the line is an ordinary task line.
    fn parse_header(
        &self,
        line: &LineText,
        parent: &TaskContext,
        today: NaiveDate,
    ) -> Option<TaskContext> {
        let label = self.patterns.labels.as_ref()?.find(&line.live)?;
        let rest = ANNOTATION_RE.replace_all(&line.live[label.end()..], " ");

        let is_header = rest
            .split_whitespace()
            .map(|word| word.trim_end_matches(':'))
            .all(|word| {
                word.is_empty()
                    || (word.len() > 1 && word.starts_with('@'))
                    || word.chars().all(|c| c == '!')
            });

        if !is_header {
            return None;
        }

        tracing::debug!("Task list header '{}'", line.full.trim());
        Some(self.resolve(&line.live, parent, today))
    }

    fn build_task(
        &self,
        text: &str,
        open: bool,
        parent: &TaskContext,
        waiting: bool,
        today: NaiveDate,
    ) -> Task {
        let description = text.trim().to_string();
        let context = self.resolve(&description, parent, today);

        Task {
            open,
            actionable: context.actionable && !waiting,
            priority: context.priority,
            due: context.due,
            start: context.start,
            tags: context.tags,
            description,
        }
    }

    /// Combine the attributes written on a line with the inherited ones
    fn resolve(&self, text: &str, parent: &TaskContext, today: NaiveDate) -> TaskContext {
        let mut tags = parent.tags.clone();
        tags.extend(TAG_RE.captures_iter(text).map(|caps| caps[1].to_string()));

        let own_priority = text.chars().filter(|c| *c == '!').count() as u32;
        let priority = if own_priority > 0 {
            own_priority
        } else {
            parent.priority
        };

        let due = annotation_date(&DUE_RE, text, today).or(parent.due);
        let start = annotation_date(&START_RE, text, today).max(parent.start);

        let actionable = parent.actionable
            && !start.is_some_and(|date| date > today)
            && !self.has_nonactionable_tag(&tags);

        TaskContext {
            tags,
            priority,
            due,
            start,
            actionable,
        }
    }

    fn is_task_label(&self, text: &str) -> bool {
        self.patterns
            .labels
            .as_ref()
            .is_some_and(|re| re.is_match(text))
    }

    fn is_excluded(&self, text: &str) -> bool {
        self.patterns
            .excluded
            .as_ref()
            .is_some_and(|re| re.is_match(text))
    }

    fn is_next(&self, text: &str) -> bool {
        self.config
            .next_label
            .as_deref()
            .is_some_and(|label| text.trim_start().starts_with(label))
    }

    fn has_nonactionable_tag(&self, tags: &BTreeSet<String>) -> bool {
        !self.patterns.nonactionable_tags.is_empty()
            && tags
                .iter()
                .any(|t| self.patterns.nonactionable_tags.contains(&t.to_lowercase()))
    }
}

/// Extract tasks with the given configuration and the system date
///
/// Convenience wrapper around [`TaskExtractor`] for one-off extraction.
pub fn extract_tasks(tree: &ParseTree, config: &TaskListConfig) -> Result<Vec<TaskEntry>> {
    Ok(TaskExtractor::new(config.clone())?.extract_tasks(tree))
}

/// Parse the date of an annotation; unparsable dates count as absent
fn annotation_date(pattern: &Regex, text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let raw = pattern.captures(text)?.get(1)?.as_str();
    let date = parse_date(raw, today);
    if date.is_none() {
        tracing::debug!("Ignoring unparsable date annotation '{}'", raw);
    }
    date
}

// ============================================================================
// Paragraph flattening
// ============================================================================

/// Split a paragraph into text lines and list blocks
fn flatten_paragraph(nodes: &[Node]) -> Vec<ParagraphLine<'_>> {
    let mut builder = LineBuilder::default();
    for node in nodes {
        builder.push_node(node, true);
    }
    builder.finish()
}

#[derive(Default)]
struct LineBuilder<'a> {
    lines: Vec<ParagraphLine<'a>>,
    live: String,
    full: String,
}

impl<'a> LineBuilder<'a> {
    fn push_node(&mut self, node: &'a Node, live: bool) {
        match node {
            Node::Text(text) => {
                for (i, part) in text.split('\n').enumerate() {
                    if i > 0 {
                        self.end_line();
                    }
                    self.push_str(part, live);
                }
            }
            Node::Tag(name) => {
                self.push_str("@", live);
                self.push_str(name, live);
            }
            Node::Strike(children) => {
                for child in children {
                    self.push_node(child, false);
                }
            }
            Node::List(list) => {
                self.end_line();
                self.lines.push(ParagraphLine::List(list));
            }
            Node::Paragraph(children) => {
                self.end_line();
                for child in children {
                    self.push_node(child, live);
                }
                self.end_line();
            }
        }
    }

    fn push_str(&mut self, text: &str, live: bool) {
        if live {
            self.live.push_str(text);
        }
        self.full.push_str(text);
    }

    fn end_line(&mut self) {
        let live = std::mem::take(&mut self.live);
        let full = std::mem::take(&mut self.full);
        if !full.trim().is_empty() {
            self.lines.push(ParagraphLine::Text(LineText { live, full }));
        }
    }

    fn finish(mut self) -> Vec<ParagraphLine<'a>> {
        self.end_line();
        self.lines
    }
}

#[cfg(test)]
#[path = "task_extractor_test.rs"]
mod task_extractor_test;
