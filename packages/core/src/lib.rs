//! Tasklist Core
//!
//! This crate extracts a nested task list from a parsed wiki document. A task
//! is a checkbox item or a line starting with a task label such as `TODO:`;
//! tasks inherit tags, priority, due date and start date from the task or
//! task-list header they are nested under.
//!
//! # Architecture
//!
//! - **Read-only traversal**: the extractor borrows the [`ParseTree`] and builds
//!   a fresh [`TaskEntry`] tree on every call
//! - **Immutable context**: inherited attributes are threaded down the recursion
//!   as values, never mutated in place
//! - **Config snapshot**: [`TaskListConfig`] is compiled once into a
//!   [`TaskExtractor`] and refreshed explicitly
//!
//! # Modules
//!
//! - [`models`] - Document tree, task output and clock abstraction
//! - [`parser`] - Wiki text to [`ParseTree`] parser
//! - [`services`] - The task extractor
//! - [`config`] - Extraction preferences
//! - [`utils`] - Date parsing
//!
//! # Examples
//!
//! ```rust
//! use tasklist_core::{extract_tasks, TaskListConfig, WikiParser};
//!
//! let tree = WikiParser::new().parse("TODO: @bug !!!\n[ ] bug todo\n");
//! let tasks = extract_tasks(&tree, &TaskListConfig::default()).unwrap();
//!
//! assert_eq!(tasks.len(), 1);
//! assert_eq!(tasks[0].task.description, "bug todo");
//! assert_eq!(tasks[0].task.priority, 3);
//! assert!(tasks[0].task.tags.contains("bug"));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::TaskListConfig;
pub use error::{Result, TaskListError};
pub use models::*;
pub use parser::WikiParser;
pub use services::{extract_tasks, TaskExtractor};
pub use utils::parse_date;
