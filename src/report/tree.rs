use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::draft::Draft;
use crate::error::{ErrorKind, GroupError, LoadError, RuntimeValidationError};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Outcome of a report node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    Failed,
    NotRun,
}

impl Status {
    /// Combine a node's own error with its children's statuses.
    ///
    /// Any failure fails the parent; otherwise a single skipped child marks
    /// the parent as not run. A node without children passes.
    pub fn aggregate(has_error: bool, children: impl IntoIterator<Item = Status>) -> Status {
        if has_error {
            return Status::Failed;
        }
        children.into_iter().fold(Status::Passed, |acc, child| match (acc, child) {
            (Status::Failed, _) | (_, Status::Failed) => Status::Failed,
            (Status::NotRun, _) | (_, Status::NotRun) => Status::NotRun,
            _ => Status::Passed,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Passed => "PASS",
            Status::Failed => "FAIL",
            Status::NotRun => "SKIP",
        }
    }
}

/// Error detail attached at the most specific node where it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeError {
    pub kind: ErrorKind,
    pub message: String,
}

impl NodeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&LoadError> for NodeError {
    fn from(e: &LoadError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

impl From<&GroupError> for NodeError {
    fn from(e: &GroupError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

// ---------------------------------------------------------------------------
// Case
// ---------------------------------------------------------------------------

/// Why a case failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaseFailure {
    AssertionMismatch { expected: bool, actual: bool },
    RuntimeValidation { message: String },
}

impl CaseFailure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AssertionMismatch { .. } => ErrorKind::AssertionMismatch,
            Self::RuntimeValidation { .. } => ErrorKind::RuntimeValidation,
        }
    }
}

impl From<RuntimeValidationError> for CaseFailure {
    fn from(e: RuntimeValidationError) -> Self {
        Self::RuntimeValidation {
            message: e.to_string(),
        }
    }
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssertionMismatch { expected, actual } => {
                write!(f, "expected valid={expected}, actual valid={actual}")
            }
            Self::RuntimeValidation { message } => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    pub description: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CaseFailure>,
}

impl CaseReport {
    pub fn passed(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: Status::Passed,
            failure: None,
        }
    }

    pub fn failed(description: impl Into<String>, failure: CaseFailure) -> Self {
        Self {
            description: description.into(),
            status: Status::Failed,
            failure: Some(failure),
        }
    }

    pub fn not_run(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: Status::NotRun,
            failure: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    pub description: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<NodeError>,
    pub cases: Vec<CaseReport>,
}

impl GroupReport {
    pub fn new(description: impl Into<String>, cases: Vec<CaseReport>) -> Self {
        Self {
            description: description.into(),
            status: Status::aggregate(false, cases.iter().map(|c| c.status)),
            error: None,
            cases,
        }
    }

    /// A group whose session could not be built; none of its cases ran.
    pub fn errored(description: impl Into<String>, error: NodeError) -> Self {
        Self {
            description: description.into(),
            status: Status::Failed,
            error: Some(error),
            cases: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<NodeError>,
    pub groups: Vec<GroupReport>,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, groups: Vec<GroupReport>) -> Self {
        Self {
            path: path.into(),
            status: Status::aggregate(false, groups.iter().map(|g| g.status)),
            error: None,
            groups,
        }
    }

    pub fn errored(path: impl Into<PathBuf>, error: NodeError) -> Self {
        Self {
            path: path.into(),
            status: Status::Failed,
            error: Some(error),
            groups: Vec::new(),
        }
    }

    pub fn not_run(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: Status::NotRun,
            error: None,
            groups: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Suite
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub draft: Draft,
    pub remotes: usize,
    pub status: Status,
    pub summary: Summary,
    pub files: Vec<FileReport>,
}

impl SuiteReport {
    pub fn new(draft: Draft, remotes: usize, files: Vec<FileReport>) -> Self {
        Self {
            draft,
            remotes,
            status: Status::aggregate(false, files.iter().map(|f| f.status)),
            summary: Summary::of(&files),
            files,
        }
    }

    /// Every failing case, with the file and group it belongs to.
    pub fn failed_cases(&self) -> impl Iterator<Item = (&FileReport, &GroupReport, &CaseReport)> {
        self.files.iter().flat_map(|file| {
            file.groups.iter().flat_map(move |group| {
                group
                    .cases
                    .iter()
                    .filter(|case| case.status == Status::Failed)
                    .map(move |case| (file, group, case))
            })
        })
    }
}

/// Per-status counts at one level of the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub passed: usize,
    pub failed: usize,
    pub not_run: usize,
}

impl Counts {
    fn record(&mut self, status: Status) {
        match status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::NotRun => self.not_run += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.not_run
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} not run",
            self.passed, self.failed, self.not_run
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: Counts,
    pub groups: Counts,
    pub cases: Counts,
}

impl Summary {
    pub fn of(files: &[FileReport]) -> Self {
        let mut summary = Summary::default();
        for file in files {
            summary.files.record(file.status);
            for group in &file.groups {
                summary.groups.record(group.status);
                for case in &group.cases {
                    summary.cases.record(case.status);
                }
            }
        }
        summary
    }
}
