use std::time::Duration;

use tokio::time::Instant;

use crate::draft::Draft;
use crate::engine::Engine;
use crate::error::LoadError;
use crate::report::{CaseFailure, CaseReport, FileReport, GroupReport, NodeError};
use crate::session::ValidationSession;
use crate::suite::{RemoteCollection, TestCase, TestGroup, TestSuiteFile};

/// Point in time after which no new work starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// Never expires.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn after(budget: Duration) -> Self {
        Self(Some(Instant::now() + budget))
    }

    pub fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }
}

/// Everything a group needs besides the group itself.
pub struct RunContext<'a, E: Engine> {
    pub engine: &'a E,
    pub remotes: &'a RemoteCollection,
    pub draft: Draft,
    pub deadline: Deadline,
}

impl<'a, E: Engine> RunContext<'a, E> {
    pub fn new(engine: &'a E, remotes: &'a RemoteCollection, draft: Draft) -> Self {
        Self {
            engine,
            remotes,
            draft,
            deadline: Deadline::none(),
        }
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Validate one case and compare the verdict with its expectation.
pub fn run_case<E: Engine>(session: &ValidationSession<'_, E>, case: &TestCase) -> CaseReport {
    match session.validate(&case.data) {
        Ok(verdict) if verdict.is_valid == case.valid => CaseReport::passed(&case.description),
        Ok(verdict) => {
            tracing::debug!(case = %case.description, expected = case.valid, actual = verdict.is_valid, "verdict mismatch");
            CaseReport::failed(
                &case.description,
                CaseFailure::AssertionMismatch {
                    expected: case.valid,
                    actual: verdict.is_valid,
                },
            )
        }
        Err(e) => {
            tracing::debug!(case = %case.description, error = %e, "engine error");
            CaseReport::failed(&case.description, e.into())
        }
    }
}

/// Build a session for `group` and run every case through it.
///
/// If the session cannot be built the group fails and no case runs.
pub fn run_group<E: Engine>(ctx: &RunContext<'_, E>, group: &TestGroup) -> GroupReport {
    if ctx.deadline.expired() {
        return GroupReport::new(&group.description, not_run(&group.tests));
    }

    let session = match ValidationSession::build(ctx.engine, group, ctx.remotes, ctx.draft) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(group = %group.description, error = %e, "cannot build validation session");
            return GroupReport::errored(&group.description, NodeError::from(&e));
        }
    };

    let cases = group
        .tests
        .iter()
        .map(|case| {
            if ctx.deadline.expired() {
                CaseReport::not_run(&case.description)
            } else {
                run_case(&session, case)
            }
        })
        .collect();

    GroupReport::new(&group.description, cases)
}

/// Run every group of a loaded suite file, or report why it could not load.
pub fn run_file<E: Engine>(
    ctx: &RunContext<'_, E>,
    file: Result<TestSuiteFile, LoadError>,
) -> FileReport {
    let file = match file {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(error = %e, "cannot load suite file");
            return FileReport::errored(e.path(), NodeError::from(&e));
        }
    };

    let groups = file
        .groups
        .iter()
        .map(|group| run_group(ctx, group))
        .collect();

    let report = FileReport::new(file.path, groups);
    tracing::debug!(path = %report.path.display(), status = report.status.label(), "suite file done");
    report
}

fn not_run(cases: &[TestCase]) -> Vec<CaseReport> {
    cases
        .iter()
        .map(|case| CaseReport::not_run(&case.description))
        .collect()
}
