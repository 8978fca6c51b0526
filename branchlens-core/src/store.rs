//! Selection state machine.
//!
//! `SelectionStore` owns the selected commit, the current change, and
//! everything derived from them (the change set, explanation, unit tests,
//! impacts). It performs no I/O: every transition returns the [`Request`]s
//! it needs, and results come back through [`SelectionStore::apply`] as
//! [`Outcome`]s. Whoever executes the requests (see `session.rs`) decides
//! scheduling; the store decides what a result means.
//!
//! # Stale results
//!
//! Each request carries a fresh [`Ticket`]. The store remembers the live
//! ticket per slot (change set, explanation, tests, impacts) and applies an
//! outcome only when both its ticket and its key (commit or change id) match
//! the live selection. Anything else is a silent no-op, which is what makes
//! overlapping `select_commit` calls safe.
//!
//! # Ordering
//!
//! Detail fetches are only issued once the final change id is known. A commit
//! selection never fires detail requests itself; they follow from the change
//! chosen when the change set settles.

use crate::types::{Explanation, FileChange, Impact, UnitTest};

/// Identifies one issued request. Monotonic per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

/// The four independently loaded slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Changes,
    Explanation,
    UnitTests,
    Impacts,
}

/// A fetch the store wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Changes { ticket: Ticket, commit_id: String },
    Explanation { ticket: Ticket, change_id: String },
    UnitTests { ticket: Ticket, change_id: String },
    Impacts { ticket: Ticket, change_id: String },
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        match self {
            Request::Changes { ticket, .. }
            | Request::Explanation { ticket, .. }
            | Request::UnitTests { ticket, .. }
            | Request::Impacts { ticket, .. } => *ticket,
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            Request::Changes { .. } => Slot::Changes,
            Request::Explanation { .. } => Slot::Explanation,
            Request::UnitTests { .. } => Slot::UnitTests,
            Request::Impacts { .. } => Slot::Impacts,
        }
    }

    /// The commit or change id the request was issued for.
    pub fn key(&self) -> &str {
        match self {
            Request::Changes { commit_id, .. } => commit_id,
            Request::Explanation { change_id, .. }
            | Request::UnitTests { change_id, .. }
            | Request::Impacts { change_id, .. } => change_id,
        }
    }
}

/// A settled fetch, keyed like the request it answers.
///
/// Failures never reach the store: they are resolved to the empty value for
/// the slot at the point of issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Changes { ticket: Ticket, commit_id: String, changes: Vec<FileChange> },
    Explanation { ticket: Ticket, change_id: String, explanation: Option<Explanation> },
    UnitTests { ticket: Ticket, change_id: String, tests: Vec<UnitTest> },
    Impacts { ticket: Ticket, change_id: String, impacts: Vec<Impact> },
}

impl Outcome {
    /// The empty/absent result for `request`, used when a fetch fails.
    pub fn empty_for(request: &Request) -> Self {
        match request.clone() {
            Request::Changes { ticket, commit_id } => {
                Outcome::Changes { ticket, commit_id, changes: Vec::new() }
            }
            Request::Explanation { ticket, change_id } => {
                Outcome::Explanation { ticket, change_id, explanation: None }
            }
            Request::UnitTests { ticket, change_id } => {
                Outcome::UnitTests { ticket, change_id, tests: Vec::new() }
            }
            Request::Impacts { ticket, change_id } => {
                Outcome::Impacts { ticket, change_id, impacts: Vec::new() }
            }
        }
    }

    pub fn ticket(&self) -> Ticket {
        match self {
            Outcome::Changes { ticket, .. }
            | Outcome::Explanation { ticket, .. }
            | Outcome::UnitTests { ticket, .. }
            | Outcome::Impacts { ticket, .. } => *ticket,
        }
    }
}

/// What applying an outcome did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The slot that was updated, or `None` when the outcome was stale.
    pub slot: Option<Slot>,
    /// Follow-up requests (detail fetches after a change-set settles).
    pub follow_up: Vec<Request>,
}

impl Applied {
    fn stale() -> Self {
        Self { slot: None, follow_up: Vec::new() }
    }

    fn updated(slot: Slot) -> Self {
        Self { slot: Some(slot), follow_up: Vec::new() }
    }

    pub fn is_stale(&self) -> bool {
        self.slot.is_none()
    }
}

/// Conceptual state of the machine, derived from the two selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState<'a> {
    Idle,
    CommitSelected { commit_id: &'a str },
    ChangeSelected { commit_id: &'a str, change_id: &'a str },
}

/// Owner of all selection state. See the module docs.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selected_commit_id: Option<String>,
    current_change_id: Option<String>,

    changes: Vec<FileChange>,
    explanation: Option<Explanation>,
    unit_tests: Vec<UnitTest>,
    impacts: Vec<Impact>,

    next_ticket: u64,
    changes_ticket: Option<Ticket>,
    explanation_ticket: Option<Ticket>,
    unit_tests_ticket: Option<Ticket>,
    impacts_ticket: Option<Ticket>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Read side
    // -----------------------------------------------------------------------

    pub fn selected_commit_id(&self) -> Option<&str> {
        self.selected_commit_id.as_deref()
    }

    pub fn current_change_id(&self) -> Option<&str> {
        self.current_change_id.as_deref()
    }

    /// Change set of the selected commit. Empty while it is loading.
    pub fn changes(&self) -> &[FileChange] {
        &self.changes
    }

    /// The current change, if it is part of the loaded change set.
    pub fn current_change(&self) -> Option<&FileChange> {
        let id = self.current_change_id.as_deref()?;
        self.changes.iter().find(|c| c.id == id)
    }

    /// Position of the current change within the loaded change set.
    pub fn current_change_index(&self) -> Option<usize> {
        let id = self.current_change_id.as_deref()?;
        self.changes.iter().position(|c| c.id == id)
    }

    pub fn explanation(&self) -> Option<&Explanation> {
        self.explanation.as_ref()
    }

    pub fn unit_tests(&self) -> &[UnitTest] {
        &self.unit_tests
    }

    pub fn impacts(&self) -> &[Impact] {
        &self.impacts
    }

    pub fn state(&self) -> SelectionState<'_> {
        match (self.selected_commit_id.as_deref(), self.current_change_id.as_deref()) {
            (None, _) => SelectionState::Idle,
            (Some(commit_id), None) => SelectionState::CommitSelected { commit_id },
            (Some(commit_id), Some(change_id)) => {
                SelectionState::ChangeSelected { commit_id, change_id }
            }
        }
    }

    /// True while the change set is loading.
    pub fn is_loading_changes(&self) -> bool {
        self.changes_ticket.is_some()
    }

    /// True while any of the three detail fetches is outstanding.
    pub fn is_loading_details(&self) -> bool {
        self.explanation_ticket.is_some()
            || self.unit_tests_ticket.is_some()
            || self.impacts_ticket.is_some()
    }

    /// True while any fetch is outstanding. Detail data is not trustworthy
    /// for decisions while this holds.
    pub fn is_loading(&self) -> bool {
        self.is_loading_changes() || self.is_loading_details()
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Selects `commit_id` and requests its change set.
    ///
    /// The previous change set is dropped immediately; the current change is
    /// kept until the new set settles so it can be preserved if it belongs
    /// to the new set. Any in-flight change-set request becomes stale.
    pub fn select_commit(&mut self, commit_id: &str) -> Vec<Request> {
        tracing::debug!(commit_id, "select commit");
        self.selected_commit_id = Some(commit_id.to_owned());
        self.changes.clear();
        let ticket = self.issue_ticket();
        self.changes_ticket = Some(ticket);
        vec![Request::Changes { ticket, commit_id: commit_id.to_owned() }]
    }

    /// Returns to `Idle`: no commit, no change, no derived data.
    pub fn deselect_commit(&mut self) -> Vec<Request> {
        tracing::debug!("deselect commit");
        self.selected_commit_id = None;
        self.changes.clear();
        self.changes_ticket = None;
        self.transition_change(None)
    }

    /// Sets the current change directly. No change-set refetch.
    ///
    /// Selecting the change that is already current is a no-op. Passing an
    /// id outside the loaded set is allowed; its details are fetched like
    /// any other.
    pub fn select_change(&mut self, change_id: Option<&str>) -> Vec<Request> {
        if self.current_change_id.as_deref() == change_id {
            return Vec::new();
        }
        self.transition_change(change_id.map(str::to_owned))
    }

    /// Applies a settled fetch, discarding it when stale.
    pub fn apply(&mut self, outcome: Outcome) -> Applied {
        match outcome {
            Outcome::Changes { ticket, commit_id, changes } => {
                if self.changes_ticket != Some(ticket)
                    || self.selected_commit_id.as_deref() != Some(commit_id.as_str())
                {
                    tracing::debug!(commit_id, ?ticket, "discarding stale change set");
                    return Applied::stale();
                }
                self.changes_ticket = None;
                self.changes = changes;
                let follow_up = self.reconcile_current_change();
                Applied { slot: Some(Slot::Changes), follow_up }
            }
            Outcome::Explanation { ticket, change_id, explanation } => {
                if !self.is_live(self.explanation_ticket, ticket, &change_id) {
                    tracing::debug!(change_id, ?ticket, "discarding stale explanation");
                    return Applied::stale();
                }
                self.explanation_ticket = None;
                self.explanation = explanation;
                Applied::updated(Slot::Explanation)
            }
            Outcome::UnitTests { ticket, change_id, tests } => {
                if !self.is_live(self.unit_tests_ticket, ticket, &change_id) {
                    tracing::debug!(change_id, ?ticket, "discarding stale unit tests");
                    return Applied::stale();
                }
                self.unit_tests_ticket = None;
                self.unit_tests = tests;
                Applied::updated(Slot::UnitTests)
            }
            Outcome::Impacts { ticket, change_id, impacts } => {
                if !self.is_live(self.impacts_ticket, ticket, &change_id) {
                    tracing::debug!(change_id, ?ticket, "discarding stale impacts");
                    return Applied::stale();
                }
                self.impacts_ticket = None;
                self.impacts = impacts;
                Applied::updated(Slot::Impacts)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    fn is_live(&self, live: Option<Ticket>, ticket: Ticket, change_id: &str) -> bool {
        live == Some(ticket) && self.current_change_id.as_deref() == Some(change_id)
    }

    /// Chooses the current change after a change set settles: keep it if it
    /// is a member, otherwise take the first change, otherwise clear it.
    fn reconcile_current_change(&mut self) -> Vec<Request> {
        let keep = self
            .current_change_id
            .as_deref()
            .is_some_and(|id| self.changes.iter().any(|c| c.id == id));
        if keep {
            return Vec::new();
        }
        let next = self.changes.first().map(|c| c.id.clone());
        if next == self.current_change_id {
            // Both `None`: nothing selected before, nothing to select now.
            return Vec::new();
        }
        self.transition_change(next)
    }

    /// Moves to `next`, clearing detail data and invalidating every
    /// outstanding detail request. Issues the three detail fetches for a new
    /// id; an unset id needs no network.
    fn transition_change(&mut self, next: Option<String>) -> Vec<Request> {
        tracing::debug!(from = ?self.current_change_id, to = ?next, "change transition");
        self.current_change_id = next;
        self.explanation = None;
        self.unit_tests.clear();
        self.impacts.clear();

        let Some(change_id) = self.current_change_id.clone() else {
            self.explanation_ticket = None;
            self.unit_tests_ticket = None;
            self.impacts_ticket = None;
            return Vec::new();
        };

        let explanation = self.issue_ticket();
        let unit_tests = self.issue_ticket();
        let impacts = self.issue_ticket();
        self.explanation_ticket = Some(explanation);
        self.unit_tests_ticket = Some(unit_tests);
        self.impacts_ticket = Some(impacts);
        vec![
            Request::Explanation { ticket: explanation, change_id: change_id.clone() },
            Request::UnitTests { ticket: unit_tests, change_id: change_id.clone() },
            Request::Impacts { ticket: impacts, change_id },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    /// Answers a request synchronously from the built-in dataset.
    fn answer(dataset: &Dataset, request: &Request) -> Outcome {
        match request.clone() {
            Request::Changes { ticket, commit_id } => Outcome::Changes {
                ticket,
                changes: dataset.changes_for(&commit_id).to_vec(),
                commit_id,
            },
            Request::Explanation { ticket, change_id } => Outcome::Explanation {
                ticket,
                explanation: dataset.explanation_for(&change_id).cloned(),
                change_id,
            },
            Request::UnitTests { ticket, change_id } => Outcome::UnitTests {
                ticket,
                tests: dataset.unit_tests_for(&change_id).to_vec(),
                change_id,
            },
            Request::Impacts { ticket, change_id } => Outcome::Impacts {
                ticket,
                impacts: dataset.impacts_for(&change_id).to_vec(),
                change_id,
            },
        }
    }

    /// Answers requests in FIFO order until none remain.
    fn settle(store: &mut SelectionStore, dataset: &Dataset, mut queue: Vec<Request>) {
        while !queue.is_empty() {
            let request = queue.remove(0);
            let applied = store.apply(answer(dataset, &request));
            queue.extend(applied.follow_up);
        }
    }

    fn dataset() -> Dataset {
        Dataset::builtin().unwrap()
    }

    fn change_ids(store: &SelectionStore) -> Vec<&str> {
        store.changes().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn starts_idle() {
        let store = SelectionStore::new();
        assert_eq!(store.state(), SelectionState::Idle);
        assert!(!store.is_loading());
        assert!(store.changes().is_empty());
        assert!(store.explanation().is_none());
    }

    #[test]
    fn select_commit_requests_change_set_only() {
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].slot(), Slot::Changes);
        assert_eq!(requests[0].key(), "a1b2c3d");
        assert!(store.is_loading_changes());
        assert!(!store.is_loading_details());
        assert_eq!(store.state(), SelectionState::CommitSelected { commit_id: "a1b2c3d" });
    }

    #[test]
    fn settled_change_set_auto_selects_first_change() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        let applied = store.apply(answer(&data, &requests[0]));

        assert_eq!(applied.slot, Some(Slot::Changes));
        assert_eq!(change_ids(&store), ["change1", "change2"]);
        assert_eq!(store.current_change_id(), Some("change1"));
        // Detail fetches are keyed to the chosen change.
        assert_eq!(applied.follow_up.len(), 3);
        assert!(applied.follow_up.iter().all(|r| r.key() == "change1"));
        assert!(store.is_loading_details());
    }

    #[test]
    fn end_to_end_details_for_change1() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        settle(&mut store, &data, requests);

        assert!(!store.is_loading());
        assert_eq!(
            store.state(),
            SelectionState::ChangeSelected { commit_id: "a1b2c3d", change_id: "change1" }
        );
        assert_eq!(
            store.explanation().unwrap().short_description,
            "Enhanced deployment documentation for PyShop"
        );
        assert_eq!(store.unit_tests().len(), 1);
        assert_eq!(store.impacts().len(), 1);
        assert_eq!(store.impacts()[0].severity, crate::types::Severity::Medium);
        assert_eq!(store.current_change().unwrap().file_path, "README.md");
    }

    #[test]
    fn empty_change_set_clears_current_change() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        settle(&mut store, &data, requests);
        assert_eq!(store.current_change_id(), Some("change1"));

        let requests = store.select_commit("e4f5g6h");
        let applied = store.apply(answer(&data, &requests[0]));
        assert!(applied.follow_up.is_empty(), "unset change needs no network");
        assert!(store.changes().is_empty());
        assert_eq!(store.current_change_id(), None);
        assert!(store.explanation().is_none());
        assert!(store.unit_tests().is_empty());
        assert!(store.impacts().is_empty());
        assert!(!store.is_loading());
        assert_eq!(store.state(), SelectionState::CommitSelected { commit_id: "e4f5g6h" });
    }

    #[test]
    fn empty_change_set_with_no_prior_change_stays_unset() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("i7j8k9l");
        let applied = store.apply(answer(&data, &requests[0]));
        assert_eq!(applied.slot, Some(Slot::Changes));
        assert!(applied.follow_up.is_empty());
        assert_eq!(store.current_change_id(), None);
    }

    #[test]
    fn member_change_is_preserved_across_reselection() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        settle(&mut store, &data, requests);
        let requests = store.select_change(Some("change2"));
        settle(&mut store, &data, requests);
        assert_eq!(store.explanation().unwrap().feature_context, "DevOps");

        let requests = store.select_commit("a1b2c3d");
        let applied = store.apply(answer(&data, &requests[0]));
        assert!(applied.follow_up.is_empty(), "preserved change is not refetched");
        assert_eq!(store.current_change_id(), Some("change2"));
        assert_eq!(store.current_change_index(), Some(1));
        assert_eq!(store.explanation().unwrap().feature_context, "DevOps");
    }

    #[test]
    fn non_member_change_is_replaced_and_details_cleared() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        settle(&mut store, &data, requests);

        let requests = store.select_commit("q4r5s6t");
        let applied = store.apply(answer(&data, &requests[0]));
        assert_eq!(store.current_change_id(), Some("change11"));
        // Old details are gone before the new ones arrive.
        assert!(store.explanation().is_none());
        assert!(store.impacts().is_empty());

        settle(&mut store, &data, applied.follow_up);
        assert_eq!(
            store.explanation().unwrap().short_description,
            "Implemented Stripe payment processing view"
        );
        assert!(store.unit_tests().is_empty());
        assert_eq!(store.impacts()[0].severity, crate::types::Severity::High);
    }

    #[test]
    fn reselecting_same_commit_is_idempotent() {
        let data = dataset();
        let mut once = SelectionStore::new();
        let requests = once.select_commit("a1b2c3d");
        settle(&mut once, &data, requests);

        let mut twice = SelectionStore::new();
        let mut requests = twice.select_commit("a1b2c3d");
        requests.extend(twice.select_commit("a1b2c3d"));
        settle(&mut twice, &data, requests);

        assert_eq!(once.selected_commit_id(), twice.selected_commit_id());
        assert_eq!(once.current_change_id(), twice.current_change_id());
        assert_eq!(once.changes(), twice.changes());
        assert_eq!(once.explanation(), twice.explanation());
        assert_eq!(once.unit_tests(), twice.unit_tests());
        assert_eq!(once.impacts(), twice.impacts());
        assert!(!twice.is_loading());
    }

    #[test]
    fn late_response_for_superseded_commit_is_discarded() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let first = store.select_commit("a1b2c3d");
        let second = store.select_commit("q4r5s6t");

        // The newer selection settles first, then the old one arrives.
        let applied = store.apply(answer(&data, &second[0]));
        let follow_up = applied.follow_up;
        let stale = store.apply(answer(&data, &first[0]));
        assert!(stale.is_stale());

        settle(&mut store, &data, follow_up);
        assert_eq!(store.selected_commit_id(), Some("q4r5s6t"));
        assert_eq!(change_ids(&store), ["change11"]);
        assert_eq!(store.current_change_id(), Some("change11"));
    }

    #[test]
    fn early_response_for_superseded_commit_is_discarded() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let first = store.select_commit("a1b2c3d");
        let second = store.select_commit("q4r5s6t");

        assert!(store.apply(answer(&data, &first[0])).is_stale());
        assert!(store.changes().is_empty());
        assert!(store.is_loading_changes());

        let applied = store.apply(answer(&data, &second[0]));
        assert_eq!(applied.slot, Some(Slot::Changes));
        assert_eq!(change_ids(&store), ["change11"]);
    }

    #[test]
    fn stale_detail_results_are_discarded() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        let applied = store.apply(answer(&data, &requests[0]));
        let change1_details = applied.follow_up;

        let change2_details = store.select_change(Some("change2"));
        for request in &change1_details {
            assert!(store.apply(answer(&data, request)).is_stale());
        }
        assert!(store.explanation().is_none(), "change1 data must not leak into change2");

        settle(&mut store, &data, change2_details);
        assert_eq!(
            store.explanation().unwrap().short_description,
            "Added Nginx configuration for production deployment"
        );
        assert!(store.impacts().is_empty());
    }

    #[test]
    fn selecting_unknown_change_shows_its_details_not_previous() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        settle(&mut store, &data, requests);
        assert!(store.explanation().is_some());

        let requests = store.select_change(Some("change12"));
        settle(&mut store, &data, requests);
        assert_eq!(store.current_change_id(), Some("change12"));
        assert!(store.current_change().is_none(), "not part of the loaded set");
        assert_eq!(
            store.explanation().unwrap().short_description,
            "Created payment processing template with Stripe Elements"
        );
        assert!(store.unit_tests().is_empty());
        assert!(store.impacts().is_empty());
    }

    #[test]
    fn unsetting_change_clears_details_immediately() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        settle(&mut store, &data, requests);

        let requests = store.select_change(None);
        assert!(requests.is_empty());
        assert!(store.explanation().is_none());
        assert!(store.unit_tests().is_empty());
        assert!(store.impacts().is_empty());
        assert!(!store.is_loading_details());
    }

    #[test]
    fn selecting_current_change_is_noop() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        settle(&mut store, &data, requests);
        assert!(store.select_change(Some("change1")).is_empty());
        assert!(store.explanation().is_some());
    }

    #[test]
    fn deselect_returns_to_idle_and_ignores_in_flight() {
        let data = dataset();
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        let applied = store.apply(answer(&data, &requests[0]));
        assert!(store.deselect_commit().is_empty());
        assert_eq!(store.state(), SelectionState::Idle);
        for request in &applied.follow_up {
            assert!(store.apply(answer(&data, request)).is_stale());
        }
        assert!(!store.is_loading());
        assert!(store.changes().is_empty());
    }

    #[test]
    fn failed_change_set_resolves_to_empty() {
        let mut store = SelectionStore::new();
        let requests = store.select_commit("a1b2c3d");
        let applied = store.apply(Outcome::empty_for(&requests[0]));
        assert_eq!(applied.slot, Some(Slot::Changes));
        assert!(store.changes().is_empty());
        assert_eq!(store.current_change_id(), None);
        assert!(!store.is_loading());
    }

    #[test]
    fn tickets_are_unique_per_request() {
        let mut store = SelectionStore::new();
        let mut tickets: Vec<Ticket> = store.select_commit("a").iter().map(Request::ticket).collect();
        tickets.extend(store.select_change(Some("x")).iter().map(Request::ticket));
        tickets.extend(store.select_change(Some("y")).iter().map(Request::ticket));
        let mut deduped = tickets.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(tickets.len(), deduped.len());
        assert_eq!(tickets.len(), 7);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const COMMITS: [&str; 6] = ["a1b2c3d", "e4f5g6h", "i7j8k9l", "q4r5s6t", "m1n2o3p", "zzz"];

        proptest! {
            /// Whatever order outstanding requests settle in, the final state
            /// reflects only the last selected commit.
            #[test]
            fn last_selection_wins(
                picks in proptest::collection::vec(0..COMMITS.len(), 1..6),
                order in any::<u64>(),
            ) {
                let data = dataset();
                let mut store = SelectionStore::new();
                let mut queue = Vec::new();
                for &pick in &picks {
                    queue.extend(store.select_commit(COMMITS[pick]));
                }
                let mut seed = order;
                while !queue.is_empty() {
                    seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    let idx = (seed >> 33) as usize % queue.len();
                    let request = queue.remove(idx);
                    queue.extend(store.apply(answer(&data, &request)).follow_up);
                }

                let last = COMMITS[*picks.last().unwrap()];
                let expected = data.changes_for(last);
                prop_assert_eq!(store.selected_commit_id(), Some(last));
                prop_assert_eq!(store.changes(), expected);
                prop_assert_eq!(
                    store.current_change_id(),
                    expected.first().map(|c| c.id.as_str())
                );
                let expected_explanation = store
                    .current_change_id()
                    .and_then(|id| data.explanation_for(id));
                prop_assert_eq!(store.explanation(), expected_explanation);
                prop_assert!(!store.is_loading());
            }
        }
    }
}
