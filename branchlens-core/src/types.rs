use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in history with author and message metadata.
///
/// Commit ids are opaque strings; the mock dataset uses short hex-like ids
/// (`a1b2c3d`) but nothing here depends on their shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub author: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,   // URL or asset path, never fetched
}

impl Commit {
    /// Returns the first seven characters of the id, the way `git log --oneline` does.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(7) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// A named branch and its commits in display order (not necessarily chronological).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

/// How a file was touched by a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl ChangeKind {
    /// One-letter badge used by the file and change lists.
    pub fn badge(self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Modified => 'M',
            ChangeKind::Deleted => 'D',
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        })
    }
}

/// One file's modification within a commit.
///
/// The id is unique across the whole dataset, not just within its commit:
/// explanations, unit tests and impacts are looked up by change id alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub id: String,
    pub file_path: String,
    pub kind: ChangeKind,
    /// Unified diff text (`@@` hunks with `+` / `-` / context lines).
    pub diff: String,
}

/// Descriptive summary attached to a single file change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub short_description: String,
    pub feature_context: String,
    pub technical_details: String,
    pub impact: String,
    /// Ids of related changes. Informational only; they may point at changes
    /// in other commits or at nothing at all.
    #[serde(default)]
    pub related_changes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Unit,
    Integration,
    E2e,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TestKind::Unit => "unit",
            TestKind::Integration => "integration",
            TestKind::E2e => "e2e",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    Pytest,
    Unittest,
    Jest,
    Vitest,
}

impl TestFramework {
    /// File extension of the language the framework's tests are written in.
    ///
    /// Used to pick a syntax definition when highlighting `UnitTest::source`.
    pub fn source_extension(self) -> &'static str {
        match self {
            TestFramework::Pytest | TestFramework::Unittest => "py",
            TestFramework::Jest | TestFramework::Vitest => "js",
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TestFramework::Pytest => "pytest",
            TestFramework::Unittest => "unittest",
            TestFramework::Jest => "jest",
            TestFramework::Vitest => "vitest",
        })
    }
}

/// A generated test associated with a file change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTest {
    pub id: String,
    pub kind: TestKind,
    pub framework: TestFramework,
    pub description: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        })
    }
}

/// A secondary file or area flagged as potentially affected by a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Impact {
    pub id: String,
    pub file_path: String,
    /// Snippet of the impacted code, shown verbatim.
    pub code: String,
    pub description: String,
    pub severity: Severity,
}

/// Result of an accepted edge-case submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub accepted: bool,
    pub change_id: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates_to_seven_chars() {
        let commit = Commit {
            id: "0123456789abcdef".to_owned(),
            message: String::new(),
            author: String::new(),
            date: DateTime::<Utc>::default(),
            avatar: None,
        };
        assert_eq!(commit.short_id(), "0123456");

        let short = Commit { id: "abc".to_owned(), ..commit };
        assert_eq!(short.short_id(), "abc");
    }

    #[test]
    fn enums_use_lowercase_wire_names() {
        let kind: ChangeKind = serde_json::from_str("\"deleted\"").unwrap();
        assert_eq!(kind, ChangeKind::Deleted);
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"medium\"");
        assert_eq!(serde_json::to_string(&TestKind::E2e).unwrap(), "\"e2e\"");
    }

    #[test]
    fn framework_picks_source_extension() {
        assert_eq!(TestFramework::Pytest.source_extension(), "py");
        assert_eq!(TestFramework::Vitest.source_extension(), "js");
    }
}
