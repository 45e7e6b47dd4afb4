//! Error types for the task-list core
//!
//! Extraction itself never fails: every well-formed tree yields some (possibly
//! empty) task list. Errors only come from building an extractor out of a bad
//! configuration or from loading that configuration.

use thiserror::Error;

/// Errors raised while preparing a task extraction
#[derive(Error, Debug)]
pub enum TaskListError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A label could not be compiled into a matching pattern
    #[error("Invalid label pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaskListError>;
