//! Loading extractor settings from JSON files on disk

use chrono::NaiveDate;
use std::fs;
use tasklist_core::{FixedClock, TaskExtractor, TaskListConfig, TaskListError, WikiParser};
use tempfile::TempDir;

fn write_config(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("tasklist.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_load_partial_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{"all_checkboxes": false, "nonactionable_tags": ["@Someday", "maybe"]}"#,
    );

    let config = TaskListConfig::load(&path).unwrap();

    assert!(!config.all_checkboxes);
    assert_eq!(config.nonactionable_tags, vec!["someday", "maybe"]);
    assert_eq!(config.labels, TaskListConfig::default().labels);
    assert_eq!(config.next_label.as_deref(), Some("Next:"));
    assert_eq!(config.excluded_labels, vec!["Agenda", "Template"]);
}

#[test]
fn test_loaded_config_drives_extraction() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{"labels": ["HACK"], "all_checkboxes": false}"#);

    let config = TaskListConfig::load(&path).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let extractor = TaskExtractor::with_clock(config, FixedClock::new(today)).unwrap();

    let tree = WikiParser::new().parse("HACK: remove retry loop\nTODO: not a label here\n");
    let tasks = extractor.extract_tasks(&tree);

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].task.description, "HACK: remove retry loop");
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = TaskListConfig::load(dir.path().join("missing.json"));
    assert!(matches!(result, Err(TaskListError::Io(_))));
}

#[test]
fn test_load_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "{ all_checkboxes: ");
    assert!(matches!(
        TaskListConfig::load(&path),
        Err(TaskListError::Json(_))
    ));
}

#[test]
fn test_load_conflicting_labels() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{"labels": ["TODO", "Agenda"]}"#);
    assert!(matches!(
        TaskListConfig::load(&path),
        Err(TaskListError::InvalidConfig(_))
    ));
}
