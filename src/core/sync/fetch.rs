//! Paginated task fetch

use crate::adapters::clickup::TaskSource;
use crate::domain::{FetchWindow, Result, TaskRecord};

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStop {
    /// A page came back with no tasks
    EmptyPage,
    /// The source answered with a non-success status
    Status(u16),
}

/// Every task fetched for a window
#[derive(Debug, Clone)]
pub struct FetchedTasks {
    /// Tasks in page order
    pub records: Vec<TaskRecord>,

    /// Pages that returned tasks
    pub pages: u32,

    /// How pagination ended
    pub stop: PaginationStop,
}

/// Fetch pages from 0 until an empty page or a non-success status
///
/// A non-success status keeps what was fetched so far. Transport errors and
/// unreadable bodies abort.
///
/// # Errors
///
/// Returns [`crate::domain::SyncError::Fetch`] for fatal fetch errors.
pub async fn fetch_all_tasks(source: &dyn TaskSource, window: &FetchWindow) -> Result<FetchedTasks> {
    let mut records = Vec::new();
    let mut page: u32 = 0;

    let stop = loop {
        match source.fetch_page(page, window).await {
            Ok(tasks) if tasks.is_empty() => break PaginationStop::EmptyPage,
            Ok(tasks) => {
                tracing::debug!(page, tasks = tasks.len(), "Fetched task page");
                records.extend(tasks);
                page += 1;
            }
            Err(e) => match e.pagination_status() {
                Some(status) => {
                    tracing::warn!(
                        page,
                        status,
                        error = %e,
                        endpoint = source.endpoint(),
                        "Task source rejected page request, keeping tasks fetched so far"
                    );
                    break PaginationStop::Status(status);
                }
                None => {
                    tracing::error!(page, error = %e, endpoint = source.endpoint(), "Task fetch failed");
                    return Err(e.into());
                }
            },
        }
    };

    tracing::info!(
        pages = page,
        tasks = records.len(),
        window = %window,
        "Task fetch complete"
    );

    Ok(FetchedTasks {
        records,
        pages: page,
        stop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FetchError, SyncError};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::Mutex;

    /// Serves scripted page responses and records requested page numbers
    struct ScriptedSource {
        responses: Mutex<Vec<std::result::Result<Vec<TaskRecord>, FetchError>>>,
        requested: Mutex<Vec<u32>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<std::result::Result<Vec<TaskRecord>, FetchError>>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TaskSource for ScriptedSource {
        async fn fetch_page(
            &self,
            page: u32,
            _window: &FetchWindow,
        ) -> std::result::Result<Vec<TaskRecord>, FetchError> {
            self.requested.lock().unwrap().push(page);
            self.responses.lock().unwrap().pop().unwrap_or(Ok(Vec::new()))
        }

        fn endpoint(&self) -> &str {
            "scripted"
        }
    }

    fn tasks(count: usize) -> Vec<TaskRecord> {
        (0..count)
            .map(|i| json!({"name": format!("task {i}")}).as_object().cloned().unwrap())
            .collect()
    }

    fn window() -> FetchWindow {
        FetchWindow::new(
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_stops_at_first_empty_page() {
        let source = ScriptedSource::new(vec![Ok(tasks(2)), Ok(tasks(1)), Ok(Vec::new())]);
        let fetched = fetch_all_tasks(&source, &window()).await.unwrap();

        assert_eq!(fetched.records.len(), 3);
        assert_eq!(fetched.pages, 2);
        assert_eq!(fetched.stop, PaginationStop::EmptyPage);
        assert_eq!(*source.requested.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_non_success_status_keeps_accumulated_tasks() {
        let source = ScriptedSource::new(vec![
            Ok(tasks(2)),
            Err(FetchError::UnexpectedStatus {
                status: 429,
                body: "rate limited".to_string(),
            }),
        ]);
        let fetched = fetch_all_tasks(&source, &window()).await.unwrap();

        assert_eq!(fetched.records.len(), 2);
        assert_eq!(fetched.stop, PaginationStop::Status(429));
        assert_eq!(*source.requested.lock().unwrap(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_transport_error_is_fatal() {
        let source = ScriptedSource::new(vec![
            Ok(tasks(2)),
            Err(FetchError::Transport("connection reset".to_string())),
        ]);
        let result = fetch_all_tasks(&source, &window()).await;

        assert!(matches!(
            result,
            Err(SyncError::Fetch(FetchError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let source = ScriptedSource::new(vec![Ok(Vec::new())]);
        let fetched = fetch_all_tasks(&source, &window()).await.unwrap();

        assert!(fetched.records.is_empty());
        assert_eq!(fetched.pages, 0);
    }
}
