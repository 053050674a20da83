//! ClickUp HTTP client

use super::models::TasksPage;
use crate::config::SourceConfig;
use crate::domain::{FetchError, FetchWindow, Result, SyncError, TaskRecord};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Paginated task source
///
/// Pages are numbered from 0. An empty page marks the end of the data.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetch one page of tasks inside `window`
    ///
    /// # Errors
    ///
    /// - [`FetchError::UnexpectedStatus`] when the source answers with a
    ///   non-200 status
    /// - [`FetchError::Transport`] when no response was received
    /// - [`FetchError::InvalidBody`] when the body is not a task page
    async fn fetch_page(
        &self,
        page: u32,
        window: &FetchWindow,
    ) -> std::result::Result<Vec<TaskRecord>, FetchError>;

    /// Endpoint description for logs
    fn endpoint(&self) -> &str;
}

/// ClickUp view task client
///
/// # Example
///
/// ```no_run
/// use ouvidoria_sync::adapters::clickup::{ClickUpClient, TaskSource};
/// use ouvidoria_sync::config::{secret_string, SourceConfig};
/// use ouvidoria_sync::domain::FetchWindow;
/// use chrono::NaiveDate;
///
/// # async fn example() -> ouvidoria_sync::domain::Result<()> {
/// let config = SourceConfig {
///     base_url: "https://api.clickup.com/api/v2/view/12zuj6-6773/task".to_string(),
///     token: secret_string("pk_123".to_string()),
///     timeout_seconds: Some(30),
/// };
/// let client = ClickUpClient::new(&config)?;
///
/// let window = FetchWindow::new(
///     NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
/// );
/// let tasks = client.fetch_page(0, &window).await?;
/// println!("{} tasks on the first page", tasks.len());
/// # Ok(())
/// # }
/// ```
pub struct ClickUpClient {
    /// View task endpoint
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Value of the `Authorization` header
    token: String,
}

impl ClickUpClient {
    /// Create a new ClickUp client
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new();
        if let Some(seconds) = config.timeout_seconds {
            client_builder = client_builder.timeout(Duration::from_secs(seconds));
        }

        let client = client_builder
            .build()
            .map_err(|e| SyncError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
            token: config.token.expose_secret().as_str().to_string(),
        })
    }
}

#[async_trait]
impl TaskSource for ClickUpClient {
    async fn fetch_page(
        &self,
        page: u32,
        window: &FetchWindow,
    ) -> std::result::Result<Vec<TaskRecord>, FetchError> {
        let page_param = page.to_string();
        let start_param = window.start_param();
        let end_param = window.end_param();

        tracing::debug!(page, window = %window, "Requesting task page");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("page", page_param.as_str()),
                ("start_date", start_param.as_str()),
                ("end_date", end_param.as_str()),
            ])
            .header("Authorization", &self.token)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let page_body = resp
            .json::<TasksPage>()
            .await
            .map_err(|e| FetchError::InvalidBody(e.to_string()))?;

        Ok(page_body.tasks)
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
