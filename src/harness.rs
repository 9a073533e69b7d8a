use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::draft::Draft;
use crate::engine::Engine;
use crate::error::ErrorKind;
use crate::report::{FileReport, NodeError, SuiteReport};
use crate::runner::{run_file, Deadline, RunContext};
use crate::suite::{load_suite_file, RemoteCollection, SuiteFiles};

/// Drives every suite file under a root through one engine.
///
/// The remote collection is loaded by the caller, once, and shared read-only
/// by all files and groups.
pub struct Harness<E: Engine + 'static> {
    engine: Arc<E>,
    remotes: Arc<RemoteCollection>,
    draft: Draft,
    jobs: usize,
    deadline: Deadline,
}

impl<E: Engine + 'static> Harness<E> {
    pub fn new(engine: E, remotes: RemoteCollection, draft: Draft) -> Self {
        Self {
            engine: Arc::new(engine),
            remotes: Arc::new(remotes),
            draft,
            jobs: 1,
            deadline: Deadline::none(),
        }
    }

    /// Maximum number of suite files processed at once. Zero is treated as one.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn remotes(&self) -> &RemoteCollection {
        &self.remotes
    }

    /// Run the suite on the calling thread, one file after another.
    pub fn run_blocking(&self, suite_root: impl AsRef<Path>) -> SuiteReport {
        let ctx = RunContext::new(self.engine.as_ref(), self.remotes.as_ref(), self.draft)
            .with_deadline(self.deadline);

        let files = SuiteFiles::new(suite_root)
            .paths()
            .map(|path| match path {
                Ok(path) if self.deadline.expired() => FileReport::not_run(path),
                Ok(path) => run_file(&ctx, load_suite_file(&path)),
                Err(e) => run_file(&ctx, Err(e)),
            })
            .collect();

        self.finish(files)
    }

    /// Run the suite with up to `jobs` files on blocking worker threads.
    ///
    /// Each file owns one result slot, filled exactly once; the report keeps
    /// walk order regardless of completion order. A worker that panics fails
    /// only its own file.
    pub async fn run(&self, suite_root: impl AsRef<Path>) -> SuiteReport {
        let mut paths: Vec<PathBuf> = Vec::new();
        let mut slots: Vec<Option<FileReport>> = Vec::new();
        let mut tasks: JoinSet<(usize, FileReport)> = JoinSet::new();

        for (index, path) in SuiteFiles::new(suite_root).paths().enumerate() {
            let path = match path {
                Ok(path) => path,
                Err(e) => {
                    let ctx = RunContext::new(self.engine.as_ref(), self.remotes.as_ref(), self.draft);
                    paths.push(e.path().to_path_buf());
                    slots.push(Some(run_file(&ctx, Err(e))));
                    continue;
                }
            };

            paths.push(path.clone());
            if self.deadline.expired() {
                slots.push(Some(FileReport::not_run(path)));
                continue;
            }
            slots.push(None);

            while tasks.len() >= self.jobs {
                collect(tasks.join_next().await, &mut slots);
            }

            let engine = Arc::clone(&self.engine);
            let remotes = Arc::clone(&self.remotes);
            let draft = self.draft;
            let deadline = self.deadline;
            tasks.spawn_blocking(move || {
                let ctx = RunContext::new(engine.as_ref(), remotes.as_ref(), draft)
                    .with_deadline(deadline);
                (index, run_file(&ctx, load_suite_file(&path)))
            });
        }

        while let Some(joined) = tasks.join_next().await {
            collect(Some(joined), &mut slots);
        }

        let files = slots
            .into_iter()
            .zip(paths)
            .map(|(slot, path)| {
                slot.unwrap_or_else(|| {
                    FileReport::errored(
                        path,
                        NodeError::new(ErrorKind::Internal, "suite file worker did not complete"),
                    )
                })
            })
            .collect();

        self.finish(files)
    }

    fn finish(&self, files: Vec<FileReport>) -> SuiteReport {
        let report = SuiteReport::new(self.draft, self.remotes.len(), files);
        let summary = &report.summary;
        tracing::info!(
            status = report.status.label(),
            files = %summary.files,
            groups = %summary.groups,
            cases = %summary.cases,
            "suite run finished"
        );
        report
    }
}

fn collect(
    joined: Option<Result<(usize, FileReport), tokio::task::JoinError>>,
    slots: &mut [Option<FileReport>],
) {
    match joined {
        Some(Ok((index, report))) => slots[index] = Some(report),
        Some(Err(e)) => tracing::warn!(error = %e, "suite file worker failed"),
        None => {}
    }
}
