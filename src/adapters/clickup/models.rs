//! ClickUp response models

use crate::domain::TaskRecord;
use serde::Deserialize;

/// One page of the view task endpoint
///
/// Only `tasks` is read; a body without it counts as an empty page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TasksPage {
    /// Tasks of this page, kept semi-structured
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_page() {
        let page: TasksPage = serde_json::from_str(
            r#"{"tasks": [{"name": "a", "status": {"status": "open"}}]}"#,
        )
        .unwrap();
        assert_eq!(page.tasks.len(), 1);
        assert_eq!(page.tasks[0]["name"], "a");
    }

    #[test]
    fn test_missing_tasks_is_empty_page() {
        let page: TasksPage = serde_json::from_str("{}").unwrap();
        assert!(page.tasks.is_empty());
    }
}
