//! Tests for Task and TaskEntry

#[cfg(test)]
mod tests {
    use crate::models::{Task, TaskEntry, NO_DATE};
    use chrono::NaiveDate;

    fn entry(description: &str, children: Vec<TaskEntry>) -> TaskEntry {
        TaskEntry::new(Task::new(description), children)
    }

    // ========================================================================
    // Task
    // ========================================================================

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Buy milk");
        assert!(task.open);
        assert!(task.actionable);
        assert_eq!(task.priority, 0);
        assert_eq!(task.due, None);
        assert_eq!(task.start, None);
        assert!(task.tags.is_empty());
        assert_eq!(task.description, "Buy milk");
    }

    #[test]
    fn test_due_key() {
        let mut task = Task::new("Report");
        assert_eq!(task.due_key(), NO_DATE);

        task.due = NaiveDate::from_ymd_opt(2012, 1, 5);
        assert_eq!(task.due_key(), "2012-01-05");
        assert!(task.due_key().as_str() < NO_DATE);
    }

    #[test]
    fn test_has_tag() {
        let mut task = Task::new("Fix @bug");
        task.tags.insert("bug".to_string());
        assert!(task.has_tag("bug"));
        assert!(!task.has_tag("@bug"));
    }

    #[test]
    fn test_task_serializes_dates_as_iso() {
        let mut task = Task::new("Due");
        task.due = NaiveDate::from_ymd_opt(2012, 12, 11);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["due"], "2012-12-11");
        assert!(json["start"].is_null());
    }

    // ========================================================================
    // TaskEntry
    // ========================================================================

    #[test]
    fn test_entry_count() {
        let tree = entry(
            "Main",
            vec![entry("Sub1", vec![]), entry("Sub2", vec![entry("Sub2-1", vec![])])],
        );
        assert_eq!(tree.count(), 4);
        assert_eq!(TaskEntry::leaf(Task::new("x")).count(), 1);
    }

    #[test]
    fn test_entry_iter_is_depth_first_in_document_order() {
        let tree = entry(
            "Main",
            vec![entry("Sub1", vec![entry("Sub1-1", vec![])]), entry("Sub2", vec![])],
        );
        let order: Vec<&str> = tree.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["Main", "Sub1", "Sub1-1", "Sub2"]);
    }
}
