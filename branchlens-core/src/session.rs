//! Executes the store's fetch requests and feeds results back.
//!
//! A [`Session`] owns the [`SelectionStore`] and a set of in-flight fetch
//! futures. Nothing is spawned: the futures are polled by whoever awaits
//! [`Session::next_settled`], typically an arm of the UI's `tokio::select!`
//! loop. Every mutation of selection state therefore happens on one task.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;

use crate::backend::Backend;
use crate::store::{Applied, Outcome, Request, SelectionStore};
use crate::types::Branch;

/// Selection store plus the fetches it is waiting on.
pub struct Session {
    store: SelectionStore,
    backend: Arc<dyn Backend>,
    in_flight: FuturesUnordered<BoxFuture<'static, Outcome>>,
}

impl Session {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { store: SelectionStore::new(), backend, in_flight: FuturesUnordered::new() }
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.backend)
    }

    /// Number of fetch futures not yet polled to completion, stale or not.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    pub fn select_commit(&mut self, commit_id: &str) {
        let requests = self.store.select_commit(commit_id);
        self.dispatch(requests);
    }

    pub fn select_change(&mut self, change_id: Option<&str>) {
        let requests = self.store.select_change(change_id);
        self.dispatch(requests);
    }

    pub fn deselect_commit(&mut self) {
        let requests = self.store.deselect_commit();
        self.dispatch(requests);
    }

    /// Waits for the next fetch to finish and applies it.
    ///
    /// Returns `None` when nothing is in flight. Callers using this inside
    /// `tokio::select!` should guard the arm with `pending() > 0`.
    pub async fn next_settled(&mut self) -> Option<Applied> {
        let outcome = self.in_flight.next().await?;
        let applied = self.store.apply(outcome);
        let follow_up = applied.follow_up.clone();
        self.dispatch(follow_up);
        Some(applied)
    }

    /// Drives every outstanding fetch, including follow-ups, to completion.
    pub async fn settle(&mut self) {
        while self.next_settled().await.is_some() {}
    }

    fn dispatch(&mut self, requests: Vec<Request>) {
        for request in requests {
            let backend = Arc::clone(&self.backend);
            self.in_flight.push(resolve(backend, request).boxed());
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}

/// Runs one request. Errors are logged and turned into the slot's empty value.
async fn resolve(backend: Arc<dyn Backend>, request: Request) -> Outcome {
    let result = match request.clone() {
        Request::Changes { ticket, commit_id } => backend
            .list_changes(&commit_id)
            .await
            .map(|changes| Outcome::Changes { ticket, commit_id, changes }),
        Request::Explanation { ticket, change_id } => backend
            .get_explanation(&change_id)
            .await
            .map(|explanation| Outcome::Explanation { ticket, change_id, explanation }),
        Request::UnitTests { ticket, change_id } => backend
            .list_unit_tests(&change_id)
            .await
            .map(|tests| Outcome::UnitTests { ticket, change_id, tests }),
        Request::Impacts { ticket, change_id } => backend
            .list_impacts(&change_id)
            .await
            .map(|impacts| Outcome::Impacts { ticket, change_id, impacts }),
    };

    result.unwrap_or_else(|e| {
        tracing::warn!(slot = ?request.slot(), key = request.key(), error = %e, "fetch failed");
        Outcome::empty_for(&request)
    })
}

/// Fetches branches through any backend, degrading to empty on failure.
pub async fn load_branches(backend: &dyn Backend) -> Vec<Branch> {
    match backend.list_branches().await {
        Ok(branches) => branches,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load branches");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::dataset::Dataset;

    fn session() -> Session {
        Session::new(Arc::new(MockBackend::new(Dataset::builtin().unwrap()).instant()))
    }

    #[tokio::test]
    async fn settle_runs_the_cascade() {
        let mut session = session();
        session.select_commit("a1b2c3d");
        assert_eq!(session.pending(), 1);
        session.settle().await;
        assert_eq!(session.pending(), 0);

        let store = session.store();
        assert_eq!(store.current_change_id(), Some("change1"));
        assert!(store.explanation().is_some());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn next_settled_is_none_when_idle() {
        let mut session = session();
        assert!(session.next_settled().await.is_none());
    }

    #[tokio::test]
    async fn branches_load() {
        let session = session();
        assert_eq!(load_branches(session.backend().as_ref()).await.len(), 5);
    }
}
