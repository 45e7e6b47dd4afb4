//! Task extraction preferences
//!
//! All fields use `#[serde(default)]` so partial JSON files (or files written
//! before a field existed) deserialize without error.

use crate::error::{Result, TaskListError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Preferences controlling which nodes are recognized as tasks
///
/// # Examples
///
/// ```rust
/// use tasklist_core::TaskListConfig;
///
/// let config = TaskListConfig {
///     nonactionable_tags: TaskListConfig::parse_tag_list("@someday, @maybe"),
///     ..TaskListConfig::default()
/// };
/// assert!(config.all_checkboxes);
/// assert_eq!(config.nonactionable_tags, vec!["someday", "maybe"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListConfig {
    /// Treat every checkbox as a task, not only checkboxes below a task label
    #[serde(default = "default_all_checkboxes")]
    pub all_checkboxes: bool,

    /// Labels that mark a line (or a checkbox list header) as a task
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    /// Label for a task that waits on its previous sibling, e.g. "Next:"
    ///
    /// Also recognized as a task label.
    #[serde(default = "default_next_label")]
    pub next_label: Option<String>,

    /// Tags that make a task (and its subtasks) non-actionable
    ///
    /// Stored lower case without the leading `@`.
    #[serde(default)]
    pub nonactionable_tags: Vec<String>,

    /// Header labels of checkbox lists that never contain tasks, e.g. "Agenda:"
    #[serde(default = "default_excluded_labels")]
    pub excluded_labels: Vec<String>,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            all_checkboxes: default_all_checkboxes(),
            labels: default_labels(),
            next_label: default_next_label(),
            nonactionable_tags: Vec::new(),
            excluded_labels: default_excluded_labels(),
        }
    }
}

fn default_all_checkboxes() -> bool {
    true
}

fn default_labels() -> Vec<String> {
    vec!["TODO".to_string(), "FIXME".to_string()]
}

fn default_next_label() -> Option<String> {
    Some("Next:".to_string())
}

fn default_excluded_labels() -> Vec<String> {
    vec!["Agenda".to_string(), "Template".to_string()]
}

impl TaskListConfig {
    /// Parse a tag preference string like `"@someday, @maybe"`
    ///
    /// Tags may be separated by commas and/or whitespace; the `@` prefix is
    /// optional and tags are lower-cased.
    pub fn parse_tag_list(input: &str) -> Vec<String> {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(|t| t.trim_start_matches('@').to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// All labels that trigger task recognition, including the next label
    pub fn trigger_labels(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .map(String::as_str)
            .chain(self.next_label.as_deref())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.trigger_labels().any(|l| l.trim().is_empty()) {
            return Err(TaskListError::InvalidConfig(
                "task labels cannot be empty".to_string(),
            ));
        }

        if self.excluded_labels.iter().any(|l| l.trim().is_empty()) {
            return Err(TaskListError::InvalidConfig(
                "excluded labels cannot be empty".to_string(),
            ));
        }

        if let Some(label) = self
            .trigger_labels()
            .find(|l| self.excluded_labels.iter().any(|e| e == l))
        {
            return Err(TaskListError::InvalidConfig(format!(
                "label '{}' cannot be both a task label and an excluded label",
                label
            )));
        }

        Ok(())
    }

    /// Bring hand-written tag lists into canonical form
    fn normalize(&mut self) {
        self.nonactionable_tags = self
            .nonactionable_tags
            .iter()
            .flat_map(|t| Self::parse_tag_list(t))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TaskListConfig::default();
        assert!(config.all_checkboxes);
        assert_eq!(config.labels, vec!["TODO", "FIXME"]);
        assert_eq!(config.next_label.as_deref(), Some("Next:"));
        assert!(config.nonactionable_tags.is_empty());
        assert_eq!(config.excluded_labels, vec!["Agenda", "Template"]);
    }

    #[test]
    fn test_trigger_labels_include_next_label() {
        let config = TaskListConfig::default();
        let labels: Vec<&str> = config.trigger_labels().collect();
        assert_eq!(labels, vec!["TODO", "FIXME", "Next:"]);

        let config = TaskListConfig {
            next_label: None,
            ..TaskListConfig::default()
        };
        assert_eq!(config.trigger_labels().count(), 2);
    }

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(
            TaskListConfig::parse_tag_list("@someday, @maybe"),
            vec!["someday", "maybe"]
        );
        assert_eq!(
            TaskListConfig::parse_tag_list("Someday maybe,,waiting"),
            vec!["someday", "maybe", "waiting"]
        );
        assert!(TaskListConfig::parse_tag_list("  , ").is_empty());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TaskListConfig::default();

        // Valid config
        assert!(config.validate().is_ok());

        // Invalid: empty label
        config.labels.push("  ".to_string());
        assert!(config.validate().is_err());

        // Invalid: empty next label
        config.labels = default_labels();
        config.next_label = Some(String::new());
        assert!(config.validate().is_err());

        // Invalid: label both included and excluded
        config.next_label = None;
        config.excluded_labels.push("TODO".to_string());
        assert!(matches!(
            config.validate(),
            Err(TaskListError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_json_uses_defaults_for_missing_fields() {
        let config =
            TaskListConfig::from_json_str(r#"{"nonactionable_tags": ["@Someday, @maybe"]}"#)
                .unwrap();
        assert!(config.all_checkboxes);
        assert_eq!(config.labels, vec!["TODO", "FIXME"]);
        assert_eq!(config.nonactionable_tags, vec!["someday", "maybe"]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let result = TaskListConfig::from_json_str("{not json");
        assert!(matches!(result, Err(TaskListError::Json(_))));
    }
}
