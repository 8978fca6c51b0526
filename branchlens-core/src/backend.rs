//! Fetch facade: the only path from the selection layer to data.
//!
//! [`Backend`] is object-safe (via `async_trait`) so sessions can hold an
//! `Arc<dyn Backend>` and tests can swap in failing or slow doubles.
//! [`MockBackend`] serves a [`Dataset`] after a fixed simulated latency.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::dataset::Dataset;
use crate::edge_cases::{self, EdgeCaseRequest, STATUS_BAD_REQUEST};
use crate::error::FetchError;
use crate::types::{Branch, Explanation, FileChange, Impact, Submission, UnitTest};

/// Default simulated round-trip for lookups.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

/// Submissions take a little longer than lookups.
pub const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_millis(500);

/// Asynchronous, stateless access to history data.
///
/// Every call may run concurrently with any other. Unknown keys are not
/// errors: they produce empty collections or `None`.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_branches(&self) -> Result<Vec<Branch>, FetchError>;

    async fn list_changes(&self, commit_id: &str) -> Result<Vec<FileChange>, FetchError>;

    async fn get_explanation(&self, change_id: &str) -> Result<Option<Explanation>, FetchError>;

    async fn list_unit_tests(&self, change_id: &str) -> Result<Vec<UnitTest>, FetchError>;

    async fn list_impacts(&self, change_id: &str) -> Result<Vec<Impact>, FetchError>;

    /// Submits free-text edge cases for a change.
    ///
    /// # Errors
    ///
    /// `FetchError::Validation` when either argument is empty or blank.
    async fn submit_edge_cases(
        &self,
        change_id: &str,
        edge_cases: &str,
    ) -> Result<Submission, FetchError>;
}

/// In-memory backend with simulated network latency.
#[derive(Debug, Clone)]
pub struct MockBackend {
    dataset: Arc<Dataset>,
    latency: Duration,
    submit_latency: Duration,
}

impl MockBackend {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            latency: DEFAULT_LATENCY,
            submit_latency: DEFAULT_SUBMIT_LATENCY,
        }
    }

    /// Overrides the lookup latency. Submissions keep their extra 200 ms.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self.submit_latency = latency + (DEFAULT_SUBMIT_LATENCY - DEFAULT_LATENCY);
        self
    }

    /// Removes all simulated latency. Used by tests and `--latency-ms 0`.
    pub fn instant(mut self) -> Self {
        self.latency = Duration::ZERO;
        self.submit_latency = Duration::ZERO;
        self
    }

    async fn delay(&self, latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn list_branches(&self) -> Result<Vec<Branch>, FetchError> {
        self.delay(self.latency).await;
        Ok(self.dataset.branches().to_vec())
    }

    async fn list_changes(&self, commit_id: &str) -> Result<Vec<FileChange>, FetchError> {
        self.delay(self.latency).await;
        Ok(self.dataset.changes_for(commit_id).to_vec())
    }

    async fn get_explanation(&self, change_id: &str) -> Result<Option<Explanation>, FetchError> {
        self.delay(self.latency).await;
        Ok(self.dataset.explanation_for(change_id).cloned())
    }

    async fn list_unit_tests(&self, change_id: &str) -> Result<Vec<UnitTest>, FetchError> {
        self.delay(self.latency).await;
        Ok(self.dataset.unit_tests_for(change_id).to_vec())
    }

    async fn list_impacts(&self, change_id: &str) -> Result<Vec<Impact>, FetchError> {
        self.delay(self.latency).await;
        Ok(self.dataset.impacts_for(change_id).to_vec())
    }

    async fn submit_edge_cases(
        &self,
        change_id: &str,
        edge_cases: &str,
    ) -> Result<Submission, FetchError> {
        let body = serde_json::to_string(&EdgeCaseRequest::new(change_id, edge_cases))
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        self.delay(self.submit_latency).await;

        let response = edge_cases::handle_post(&body);
        let message = response.message().unwrap_or_default().to_owned();
        match response.status {
            s if response.is_success() => {
                tracing::debug!(status = s, change_id, "edge cases accepted");
                Ok(Submission { accepted: true, change_id: change_id.to_owned(), message })
            }
            STATUS_BAD_REQUEST => Err(FetchError::Validation(message)),
            status => Err(FetchError::Transport(format!("status {status}: {message}"))),
        }
    }
}
