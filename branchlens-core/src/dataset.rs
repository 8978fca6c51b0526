//! In-memory dataset backing the mock backend.
//!
//! A dataset is a TOML document with one branch listing and four keyed
//! tables: `changes` (by commit id), `explanations`, `unit_tests` and
//! `impacts` (all by change id). The built-in PyShop dataset is embedded at
//! compile time; alternative files go through the same validation.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::DatasetError;
use crate::types::{Branch, Explanation, FileChange, Impact, UnitTest};

const BUILTIN_DATASET: &str = include_str!("../data/pyshop.toml");

/// Read-only lookup tables for branches, changes, and per-change details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    branches: Vec<Branch>,
    #[serde(default)]
    changes: HashMap<String, Vec<FileChange>>,
    #[serde(default)]
    explanations: HashMap<String, Explanation>,
    #[serde(default)]
    unit_tests: HashMap<String, Vec<UnitTest>>,
    #[serde(default)]
    impacts: HashMap<String, Vec<Impact>>,
}

impl Dataset {
    /// Parses the embedded PyShop dataset.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded document is malformed, which the test suite
    /// rules out.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_toml_str(BUILTIN_DATASET)
    }

    /// Parses and validates a dataset from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Parse` for malformed TOML or unknown enum values,
    /// and `DuplicateChangeId` / `DuplicateBranch` when the uniqueness
    /// invariants are broken.
    pub fn from_toml_str(raw: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = toml::from_str(raw)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Reads and validates a dataset file.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Io` if the file cannot be read, otherwise the
    /// same errors as [`Dataset::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<(), DatasetError> {
        let mut names = HashSet::new();
        for branch in &self.branches {
            if !names.insert(branch.name.as_str()) {
                return Err(DatasetError::DuplicateBranch(branch.name.clone()));
            }
        }

        // Change ids are the join key for every detail table, so they must be
        // unique across commits, not just within one.
        let mut ids = HashSet::new();
        for change in self.changes.values().flatten() {
            if !ids.insert(change.id.as_str()) {
                return Err(DatasetError::DuplicateChangeId(change.id.clone()));
            }
        }
        Ok(())
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Changes recorded for `commit_id`; empty for unknown commits.
    pub fn changes_for(&self, commit_id: &str) -> &[FileChange] {
        self.changes.get(commit_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn explanation_for(&self, change_id: &str) -> Option<&Explanation> {
        self.explanations.get(change_id)
    }

    pub fn unit_tests_for(&self, change_id: &str) -> &[UnitTest] {
        self.unit_tests.get(change_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn impacts_for(&self, change_id: &str) -> &[Impact] {
        self.impacts.get(change_id).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChangeKind, Severity, TestFramework};

    #[test]
    fn builtin_dataset_parses() {
        let dataset = Dataset::builtin().unwrap();
        let names: Vec<&str> = dataset.branches().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "main",
                "feature/payment-gateway",
                "bugfix/cart-session",
                "feature/user-reviews",
                "feature/inventory-management",
            ]
        );
        assert_eq!(dataset.branches()[0].commits.len(), 3);
        assert!(dataset.branches()[2].commits.is_empty());
    }

    #[test]
    fn builtin_changes_keep_display_order() {
        let dataset = Dataset::builtin().unwrap();
        let changes = dataset.changes_for("a1b2c3d");
        let ids: Vec<&str> = changes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["change1", "change2"]);
        assert_eq!(changes[0].kind, ChangeKind::Modified);
        assert_eq!(changes[1].file_path, "deployment/nginx.conf");
        assert!(changes[0].diff.starts_with("@@ -1,5 +1,15 @@"));
    }

    #[test]
    fn builtin_details_for_change1() {
        let dataset = Dataset::builtin().unwrap();
        let explanation = dataset.explanation_for("change1").unwrap();
        assert_eq!(explanation.short_description, "Enhanced deployment documentation for PyShop");
        assert_eq!(explanation.related_changes, ["change2"]);

        let tests = dataset.unit_tests_for("change1");
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].framework, TestFramework::Pytest);

        let impacts = dataset.impacts_for("change1");
        assert_eq!(impacts.len(), 1);
        assert_eq!(impacts[0].severity, Severity::Medium);
    }

    #[test]
    fn unknown_keys_yield_empty_results() {
        let dataset = Dataset::builtin().unwrap();
        assert!(dataset.changes_for("nope").is_empty());
        assert!(dataset.changes_for("e4f5g6h").is_empty());
        assert!(dataset.explanation_for("change2").is_some());
        assert!(dataset.explanation_for("change99").is_none());
        assert!(dataset.unit_tests_for("change11").is_empty());
        assert!(dataset.impacts_for("change2").is_empty());
    }

    #[test]
    fn duplicate_change_ids_are_rejected() {
        let raw = r#"
            [[changes.c1]]
            id = "x"
            file_path = "a.rs"
            kind = "added"
            diff = ""

            [[changes.c2]]
            id = "x"
            file_path = "b.rs"
            kind = "deleted"
            diff = ""
        "#;
        let err = Dataset::from_toml_str(raw).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateChangeId(id) if id == "x"));
    }

    #[test]
    fn duplicate_branch_names_are_rejected() {
        let raw = r#"
            [[branches]]
            name = "main"

            [[branches]]
            name = "main"
        "#;
        let err = Dataset::from_toml_str(raw).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateBranch(name) if name == "main"));
    }

    #[test]
    fn unknown_change_kind_is_a_parse_error() {
        let raw = r#"
            [[changes.c1]]
            id = "x"
            file_path = "a.rs"
            kind = "renamed"
            diff = ""
        "#;
        assert!(matches!(Dataset::from_toml_str(raw), Err(DatasetError::Parse(_))));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.toml");
        std::fs::write(&path, "[[branches]]\nname = \"solo\"\n").unwrap();
        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.branches().len(), 1);

        let missing = Dataset::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(DatasetError::Io(_))));
    }
}
