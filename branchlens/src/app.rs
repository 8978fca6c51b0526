//! Central application state for branchlens.
//!
//! `AppState` owns everything the UI shows: mode, focus, the branch tree,
//! scroll offsets, panel geometry, and the edge-case draft. Selection data
//! lives in the embedded [`Session`]; this module only reads it and asks it
//! to change through `select_commit` / `select_change` / `deselect_commit`.
//! No ratatui rendering happens here.

use std::sync::Arc;

use branchlens_core::diff::parse_hunks;
use branchlens_core::pager::Pager;
use branchlens_core::store::{Applied, Slot};
use branchlens_core::types::{Branch, Commit, Submission};
use branchlens_core::{Backend, FetchError, Session};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;

use crate::diff_render::{render_hunks, RenderedDiff};
use crate::highlight::tokenizer_for_path;
use crate::theme::Theme;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing an edge-case draft.
    Insert,
    HelpOverlay,
    /// Quit requested while an unsent draft exists.
    ConfirmQuit,
}

/// Which panel currently has keyboard focus.
///
/// Cycle order: `Branches` → `Diff` → `Details` → `Branches`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    #[default]
    Branches,
    Diff,
    Details,
}

impl PanelFocus {
    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Branches => PanelFocus::Details,
            PanelFocus::Diff => PanelFocus::Branches,
            PanelFocus::Details => PanelFocus::Diff,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PanelFocus::Branches => PanelFocus::Diff,
            PanelFocus::Diff => PanelFocus::Details,
            PanelFocus::Details => PanelFocus::Branches,
        }
    }
}

/// Tabs of the details panel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DetailsTab {
    #[default]
    Explanation,
    Tests,
    Impacts,
}

impl DetailsTab {
    pub const ALL: [DetailsTab; 3] = [DetailsTab::Explanation, DetailsTab::Tests, DetailsTab::Impacts];

    pub fn next(self) -> Self {
        match self {
            DetailsTab::Explanation => DetailsTab::Tests,
            DetailsTab::Tests => DetailsTab::Impacts,
            DetailsTab::Impacts => DetailsTab::Explanation,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DetailsTab::Explanation => "Explanation",
            DetailsTab::Tests => "Tests",
            DetailsTab::Impacts => "Impacts",
        }
    }

    pub fn index(self) -> usize {
        match self {
            DetailsTab::Explanation => 0,
            DetailsTab::Tests => 1,
            DetailsTab::Impacts => 2,
        }
    }
}

/// One visible row of the branch tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRow {
    Branch(usize),
    Commit { branch: usize, commit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Ok,
    Error,
}

/// Last message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Everything needed to run one edge-case submission off the UI task.
pub struct PendingSubmission {
    pub backend: Arc<dyn Backend>,
    pub change_id: String,
    pub draft: String,
}

/// All mutable UI state.
pub struct AppState {
    pub mode: Mode,
    pub focus: PanelFocus,

    /// Selection store plus in-flight fetches.
    pub session: Session,

    pub branches: Vec<Branch>,
    pub branches_loading: bool,
    /// At most one branch is expanded at a time.
    pub expanded_branch: Option<usize>,
    pub tree_state: ListState,

    pub change_pager: Pager,
    pub impact_pager: Pager,
    /// Change id whose impacts `impact_pager` indexes.
    impacts_owner: Option<String>,

    pub details_tab: DetailsTab,
    pub details_scroll: u16,
    pub help_scroll: u16,

    /// Highlighted lines of the current change's diff.
    pub diff: RenderedDiff,
    /// Change id `diff` was rendered for.
    diff_owner: Option<String>,
    pub diff_scroll: usize,
    pub hunk_cursor: usize,

    // Inner heights cached by the renderer for paging.
    pub tree_viewport_height: u16,
    pub diff_viewport_height: u16,
    pub details_viewport_height: u16,

    /// Width percentages of the three panels. Defaults 22 / 48 / 30.
    pub left_pct: u16,
    pub center_pct: u16,
    pub right_pct: u16,
    /// Outer rects of the three panels from the last frame, for mouse focus.
    pub panel_rects: [Rect; 3],

    /// Edge-case text being composed.
    pub draft: String,
    pub submitting: bool,
    pub status: Option<StatusMessage>,
    spinner_frame: usize,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            session,
            branches: Vec::new(),
            branches_loading: true,
            expanded_branch: None,
            tree_state: ListState::default(),
            change_pager: Pager::default(),
            impact_pager: Pager::default(),
            impacts_owner: None,
            details_tab: DetailsTab::default(),
            details_scroll: 0,
            help_scroll: 0,
            diff: RenderedDiff::default(),
            diff_owner: None,
            diff_scroll: 0,
            hunk_cursor: 0,
            tree_viewport_height: 0,
            diff_viewport_height: 0,
            details_viewport_height: 0,
            left_pct: 22,
            center_pct: 48,
            right_pct: 30,
            panel_rects: [Rect::default(); 3],
            draft: String::new(),
            submitting: false,
            status: None,
            spinner_frame: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Branch tree
    // -----------------------------------------------------------------------

    pub fn set_branches(&mut self, branches: Vec<Branch>) {
        tracing::debug!(count = branches.len(), "branches loaded");
        self.branches = branches;
        self.branches_loading = false;
        self.expanded_branch = None;
        self.tree_state.select(if self.branches.is_empty() { None } else { Some(0) });
    }

    /// Rows currently visible: every branch, plus the commits of the
    /// expanded one directly under it.
    pub fn tree_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for (b, branch) in self.branches.iter().enumerate() {
            rows.push(TreeRow::Branch(b));
            if self.expanded_branch == Some(b) {
                rows.extend((0..branch.commits.len()).map(|c| TreeRow::Commit { branch: b, commit: c }));
            }
        }
        rows
    }

    pub fn selected_row(&self) -> Option<TreeRow> {
        let rows = self.tree_rows();
        let idx = self.tree_state.selected()?.min(rows.len().checked_sub(1)?);
        rows.get(idx).copied()
    }

    pub fn commit_at(&self, branch: usize, commit: usize) -> Option<&Commit> {
        self.branches.get(branch)?.commits.get(commit)
    }

    /// Enter / `l` on the tree: toggles a branch or selects a commit.
    pub fn activate_tree_row(&mut self) {
        match self.selected_row() {
            Some(TreeRow::Branch(b)) => self.toggle_branch(b),
            Some(TreeRow::Commit { branch, commit }) => {
                if let Some(id) = self.commit_at(branch, commit).map(|c| c.id.clone()) {
                    self.select_commit(&id);
                }
            }
            None => {}
        }
    }

    fn toggle_branch(&mut self, branch: usize) {
        self.expanded_branch = if self.expanded_branch == Some(branch) { None } else { Some(branch) };
        // Keep the cursor on the branch header that was toggled.
        let row = self.tree_rows().iter().position(|r| *r == TreeRow::Branch(branch));
        self.tree_state.select(row);
    }

    // -----------------------------------------------------------------------
    // Selection (delegates to the session)
    // -----------------------------------------------------------------------

    pub fn select_commit(&mut self, commit_id: &str) {
        self.session.select_commit(commit_id);
        self.sync_from_store();
    }

    pub fn deselect_commit(&mut self) {
        self.session.deselect_commit();
        self.sync_from_store();
    }

    pub fn next_change(&mut self) {
        if self.change_pager.next() {
            self.select_change_at(self.change_pager.index());
        }
    }

    pub fn prev_change(&mut self) {
        if self.change_pager.previous() {
            self.select_change_at(self.change_pager.index());
        }
    }

    fn select_change_at(&mut self, index: usize) {
        let id = self.session.store().changes().get(index).map(|c| c.id.clone());
        if let Some(id) = id {
            self.session.select_change(Some(&id));
            self.details_scroll = 0;
        }
        self.sync_from_store();
    }

    pub fn next_impact(&mut self) {
        if self.impact_pager.next() {
            self.details_scroll = 0;
        }
    }

    pub fn prev_impact(&mut self) {
        if self.impact_pager.previous() {
            self.details_scroll = 0;
        }
    }

    /// Applies one settled fetch result reported by the session.
    pub fn apply_settled(&mut self, applied: Applied) {
        if applied.slot == Some(Slot::Changes) {
            self.details_scroll = 0;
        }
        self.sync_from_store();
    }

    /// Re-derives pager positions from the store.
    ///
    /// The change pager always points at the live change (or the first
    /// entry when the live change is not in the set). The impact pager resets
    /// whenever the impact list it indexes is replaced.
    fn sync_from_store(&mut self) {
        let store = self.session.store();
        self.change_pager
            .reset_to(store.changes().len(), store.current_change_index().unwrap_or(0));

        let owner = store.current_change_id().map(str::to_owned);
        let len = store.impacts().len();
        if owner != self.impacts_owner || len != self.impact_pager.len() {
            self.impact_pager.reset(len);
            self.impacts_owner = owner;
        }
    }

    // -----------------------------------------------------------------------
    // Diff panel
    // -----------------------------------------------------------------------

    /// Re-renders the diff when the current change differs from the cached one.
    pub fn ensure_diff(&mut self, theme: &Theme) {
        let store = self.session.store();
        let change = store.current_change();
        let key = change.map(|c| c.id.clone());
        if key == self.diff_owner {
            return;
        }
        self.diff = match change {
            Some(change) => {
                let hunks = parse_hunks(&change.diff);
                let mut tokenizer = tokenizer_for_path(&change.file_path);
                render_hunks(&hunks, tokenizer.as_mut(), theme)
            }
            None => RenderedDiff::default(),
        };
        self.diff_owner = key;
        self.diff_scroll = 0;
        self.hunk_cursor = 0;
    }

    /// Jumps to the previous hunk header (`[`). Stays on the first.
    pub fn prev_hunk(&mut self) {
        if self.diff.hunk_offsets.is_empty() {
            return;
        }
        self.hunk_cursor = self.hunk_cursor.saturating_sub(1);
        self.diff_scroll = self.diff.hunk_offsets[self.hunk_cursor];
    }

    /// Jumps to the next hunk header (`]`). Stays on the last.
    pub fn next_hunk(&mut self) {
        if self.diff.hunk_offsets.is_empty() {
            return;
        }
        self.hunk_cursor = (self.hunk_cursor + 1).min(self.diff.hunk_offsets.len() - 1);
        self.diff_scroll = self.diff.hunk_offsets[self.hunk_cursor];
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Branches => self.tree_state.scroll_down_by(lines),
            PanelFocus::Diff => {
                let max = self.diff.lines.len().saturating_sub(1);
                self.diff_scroll = self.diff_scroll.saturating_add(lines as usize).min(max);
            }
            PanelFocus::Details => self.details_scroll = self.details_scroll.saturating_add(lines),
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Branches => self.tree_state.scroll_up_by(lines),
            PanelFocus::Diff => self.diff_scroll = self.diff_scroll.saturating_sub(lines as usize),
            PanelFocus::Details => self.details_scroll = self.details_scroll.saturating_sub(lines),
        }
    }

    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Branches => self.tree_state.select_first(),
            PanelFocus::Diff => {
                self.diff_scroll = 0;
                self.hunk_cursor = 0;
            }
            PanelFocus::Details => self.details_scroll = 0,
        }
    }

    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::Branches => {
                let last = self.tree_rows().len().checked_sub(1);
                self.tree_state.select(last);
            }
            PanelFocus::Diff => self.diff_scroll = self.diff.lines.len().saturating_sub(1),
            // The renderer clamps to the content height.
            PanelFocus::Details => self.details_scroll = u16::MAX,
        }
    }

    fn focused_viewport_height(&self) -> u16 {
        match self.focus {
            PanelFocus::Branches => self.tree_viewport_height,
            PanelFocus::Diff => self.diff_viewport_height,
            PanelFocus::Details => self.details_viewport_height,
        }
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.focused_viewport_height() / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.focused_viewport_height() / 2).max(1));
    }

    pub fn full_page_down(&mut self) {
        self.scroll_down(self.focused_viewport_height().max(1));
    }

    pub fn full_page_up(&mut self) {
        self.scroll_up(self.focused_viewport_height().max(1));
    }

    /// Shrinks the centre panel by 5%, split between the side panels.
    /// Never below 20%.
    pub fn shrink_diff_panel(&mut self) {
        const MIN_CENTER: u16 = 20;
        const STEP: u16 = 5;
        if self.center_pct <= MIN_CENTER {
            return;
        }
        let transfer = STEP.min(self.center_pct - MIN_CENTER);
        self.center_pct -= transfer;
        let left_gain = transfer / 2;
        self.left_pct = self.left_pct.saturating_add(left_gain);
        self.right_pct = self.right_pct.saturating_add(transfer - left_gain);
    }

    /// Grows the centre panel by up to 5%, taken from the side panels.
    /// Never above 80%; side panels keep at least 5%.
    pub fn grow_diff_panel(&mut self) {
        const MAX_CENTER: u16 = 80;
        const MIN_SIDE: u16 = 5;
        const STEP: u16 = 5;
        if self.center_pct >= MAX_CENTER {
            return;
        }
        let transfer = STEP.min(MAX_CENTER - self.center_pct);
        let left_give = (transfer / 2).min(self.left_pct.saturating_sub(MIN_SIDE));
        let right_give = (transfer - transfer / 2).min(self.right_pct.saturating_sub(MIN_SIDE));
        self.left_pct -= left_give;
        self.right_pct -= right_give;
        self.center_pct += left_give + right_give;
    }

    // -----------------------------------------------------------------------
    // Details tabs
    // -----------------------------------------------------------------------

    pub fn set_tab(&mut self, tab: DetailsTab) {
        if self.details_tab != tab {
            self.details_tab = tab;
            self.details_scroll = 0;
        }
    }

    // -----------------------------------------------------------------------
    // Edge-case draft
    // -----------------------------------------------------------------------

    pub fn has_unsaved_draft(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// `e`: opens the draft input on the Tests tab.
    pub fn begin_edge_case_entry(&mut self) {
        if self.session.store().current_change_id().is_none() {
            self.set_status(StatusKind::Error, "Select a change before adding edge cases");
            return;
        }
        self.set_tab(DetailsTab::Tests);
        self.focus = PanelFocus::Details;
        self.mode = Mode::Insert;
    }

    /// Takes a snapshot of the draft for submission. `None` while a previous
    /// submission is still in flight.
    pub fn prepare_submission(&mut self) -> Option<PendingSubmission> {
        if self.submitting {
            self.set_status(StatusKind::Info, "Still sending the previous edge cases");
            return None;
        }
        self.submitting = true;
        Some(PendingSubmission {
            backend: self.session.backend(),
            change_id: self.session.store().current_change_id().unwrap_or_default().to_owned(),
            draft: self.draft.clone(),
        })
    }

    /// Shows the outcome of a submission. Accepted drafts are cleared unless
    /// the user kept typing after sending.
    pub fn apply_submission(&mut self, draft: &str, result: Result<Submission, FetchError>) {
        self.submitting = false;
        match result {
            Ok(submission) => {
                if self.draft == draft {
                    self.draft.clear();
                }
                let text = format!("{} ({})", submission.message, submission.change_id);
                self.set_status(StatusKind::Ok, text);
            }
            Err(FetchError::Validation(msg)) => {
                self.set_status(StatusKind::Error, format!("Edge cases rejected: {msg}"));
            }
            Err(e @ FetchError::Transport(_)) => {
                tracing::warn!(error = %e, "edge-case submission failed");
                self.set_status(StatusKind::Error, format!("Could not send edge cases: {e}"));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Status bar
    // -----------------------------------------------------------------------

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), kind });
    }

    /// True while anything the user is waiting on is outstanding.
    pub fn is_busy(&self) -> bool {
        self.branches_loading || self.submitting || self.session.store().is_loading()
    }

    pub fn tick(&mut self) {
        if self.is_busy() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        }
    }

    pub fn spinner(&self) -> char {
        SPINNER[self.spinner_frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchlens_core::{Dataset, MockBackend};

    fn state() -> AppState {
        let backend = Arc::new(MockBackend::new(Dataset::builtin().unwrap()).instant());
        let mut state = AppState::new(Session::new(backend));
        let branches = Dataset::builtin().unwrap().branches().to_vec();
        state.set_branches(branches);
        state
    }

    async fn settle(state: &mut AppState) {
        while let Some(applied) = state.session.next_settled().await {
            state.apply_settled(applied);
        }
    }

    #[test]
    fn focus_cycles_both_ways() {
        let f = PanelFocus::Branches;
        assert_eq!(f.next().next().next(), f);
        assert_eq!(f.prev(), PanelFocus::Details);
        assert_eq!(f.next().prev(), f);
    }

    #[test]
    fn tree_expands_one_branch_at_a_time() {
        let mut state = state();
        assert_eq!(state.tree_rows().len(), 5);

        state.activate_tree_row();
        assert_eq!(state.expanded_branch, Some(0));
        assert_eq!(state.tree_rows().len(), 8);

        // Move to feature/payment-gateway (after main's three commits).
        state.tree_state.select(Some(4));
        state.activate_tree_row();
        assert_eq!(state.expanded_branch, Some(1));
        assert_eq!(state.tree_rows().len(), 8);
        assert_eq!(state.selected_row(), Some(TreeRow::Branch(1)));

        state.activate_tree_row();
        assert_eq!(state.expanded_branch, None);
        assert_eq!(state.tree_rows().len(), 5);
    }

    #[tokio::test]
    async fn selecting_commit_row_loads_changes() {
        let mut state = state();
        state.activate_tree_row();
        state.tree_state.select(Some(1));
        assert_eq!(state.selected_row(), Some(TreeRow::Commit { branch: 0, commit: 0 }));
        state.activate_tree_row();
        assert!(state.is_busy());
        settle(&mut state).await;

        assert_eq!(state.change_pager.len(), 2);
        assert_eq!(state.change_pager.index(), 0);
        assert_eq!(state.impact_pager.len(), 1);
        assert!(!state.is_busy());
    }

    #[tokio::test]
    async fn change_pager_drives_selection() {
        let mut state = state();
        state.select_commit("a1b2c3d");
        settle(&mut state).await;

        state.next_change();
        assert_eq!(state.session.store().current_change_id(), Some("change2"));
        assert_eq!(state.impact_pager.len(), 0, "impacts cleared on change transition");
        settle(&mut state).await;
        assert!(state.session.store().impacts().is_empty());

        // Boundary: no further change.
        state.next_change();
        assert_eq!(state.change_pager.index(), 1);
        assert_eq!(state.session.pending(), 0);

        state.prev_change();
        settle(&mut state).await;
        assert_eq!(state.session.store().current_change_id(), Some("change1"));
        assert_eq!(state.impact_pager.len(), 1);
    }

    #[tokio::test]
    async fn diff_cache_follows_current_change() {
        let mut state = state();
        let theme = Theme::dark();
        state.ensure_diff(&theme);
        assert!(state.diff.lines.is_empty());

        state.select_commit("a1b2c3d");
        settle(&mut state).await;
        state.ensure_diff(&theme);
        assert!(!state.diff.lines.is_empty());
        assert_eq!(state.diff.hunk_offsets.first(), Some(&0));

        state.diff_scroll = 3;
        state.ensure_diff(&theme);
        assert_eq!(state.diff_scroll, 3, "same change keeps scroll");

        state.next_change();
        state.ensure_diff(&theme);
        assert_eq!(state.diff_scroll, 0);
    }

    #[tokio::test]
    async fn pager_resets_to_first_on_new_commit() {
        let mut state = state();
        state.select_commit("a1b2c3d");
        settle(&mut state).await;
        state.next_change();
        settle(&mut state).await;

        state.select_commit("q4r5s6t");
        assert_eq!(state.change_pager.len(), 0, "old set dropped immediately");
        settle(&mut state).await;
        assert_eq!(state.change_pager.index(), 0);
        assert_eq!(state.change_pager.len(), 1);
        assert_eq!(state.session.store().current_change_id(), Some("change11"));
    }

    #[tokio::test]
    async fn deselect_clears_everything() {
        let mut state = state();
        state.select_commit("a1b2c3d");
        settle(&mut state).await;
        state.deselect_commit();
        assert!(state.change_pager.is_empty());
        assert!(state.impact_pager.is_empty());
        assert!(state.session.store().selected_commit_id().is_none());
    }

    #[test]
    fn edge_case_entry_needs_a_change() {
        let mut state = state();
        state.begin_edge_case_entry();
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
    }

    #[tokio::test]
    async fn submission_round_trip_clears_draft() {
        let mut state = state();
        state.select_commit("a1b2c3d");
        settle(&mut state).await;
        state.begin_edge_case_entry();
        assert_eq!(state.mode, Mode::Insert);
        assert_eq!(state.details_tab, DetailsTab::Tests);

        state.draft = "test with empty cart".into();
        assert!(state.has_unsaved_draft());
        let pending = state.prepare_submission().unwrap();
        assert!(state.prepare_submission().is_none(), "one submission at a time");
        let result = pending.backend.submit_edge_cases(&pending.change_id, &pending.draft).await;
        state.apply_submission(&pending.draft, result);

        assert!(!state.submitting);
        assert!(state.draft.is_empty());
        assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Ok));
    }

    #[test]
    fn rejected_submission_keeps_draft() {
        let mut state = state();
        state.draft = "   ".into();
        state.submitting = true;
        state.apply_submission(
            "   ",
            Err(FetchError::Validation("Missing required fields: changeId and edgeCases".into())),
        );
        assert_eq!(state.draft, "   ");
        let status = state.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("rejected"));
    }

    #[test]
    fn panel_resize_respects_bounds() {
        let mut state = state();
        for _ in 0..20 {
            state.grow_diff_panel();
        }
        assert!(state.center_pct <= 80);
        assert!(state.left_pct >= 5 && state.right_pct >= 5);
        for _ in 0..20 {
            state.shrink_diff_panel();
        }
        assert_eq!(state.center_pct, 20);
        assert_eq!(state.left_pct + state.center_pct + state.right_pct, 100);
    }

    #[test]
    fn tabs_cycle() {
        let mut tab = DetailsTab::Explanation;
        for expected in [DetailsTab::Tests, DetailsTab::Impacts, DetailsTab::Explanation] {
            tab = tab.next();
            assert_eq!(tab, expected);
        }
        assert_eq!(DetailsTab::ALL[DetailsTab::Impacts.index()], DetailsTab::Impacts);
    }
}
