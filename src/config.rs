use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::draft::Draft;

/// Default suite location, relative to the JSON Schema Test Suite checkout.
const DEFAULT_SUITE_ROOT: &str = "tests/draft7";

/// Default remote fixture location, relative to the suite checkout.
const DEFAULT_REMOTES_ROOT: &str = "remotes";

/// How the finished report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Failing nodes and the summary line.
    #[default]
    Text,
    /// Every node and the summary line.
    TextFull,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "text-full" => Ok(Self::TextFull),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "CONFORMANCE_REPORT must be one of text, text-full, json (got '{other}')"
            )),
        }
    }
}

/// Harness configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub suite_root: PathBuf,
    pub remotes_root: PathBuf,
    pub draft: Draft,
    pub jobs: usize,
    pub time_budget: Option<Duration>,
    pub report_format: ReportFormat,
    pub log_json: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            suite_root: PathBuf::from(DEFAULT_SUITE_ROOT),
            remotes_root: PathBuf::from(DEFAULT_REMOTES_ROOT),
            draft: Draft::default(),
            jobs: 1,
            time_budget: None,
            report_format: ReportFormat::default(),
            log_json: false,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from environment.
    ///
    /// - `CONFORMANCE_SUITE_ROOT` (default `tests/draft7`): suite documents
    /// - `CONFORMANCE_REMOTES_ROOT` (default `remotes`): remote schema documents
    /// - `CONFORMANCE_DRAFT` (default `draft7`): dialect of the suite
    /// - `CONFORMANCE_JOBS` (default 1): suite files processed at once
    /// - `CONFORMANCE_TIME_BUDGET_SECS` (optional): stop starting new work after this long
    /// - `CONFORMANCE_REPORT` (default `text`): `text`, `text-full` or `json`
    /// - `CONFORMANCE_LOG_JSON` (optional): `1` or `true` for JSON log lines
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = Self::default();

        let suite_root = lookup("CONFORMANCE_SUITE_ROOT")
            .map(PathBuf::from)
            .unwrap_or(defaults.suite_root);

        let remotes_root = lookup("CONFORMANCE_REMOTES_ROOT")
            .map(PathBuf::from)
            .unwrap_or(defaults.remotes_root);

        let draft = match lookup("CONFORMANCE_DRAFT") {
            Some(val) => val.parse::<Draft>()?,
            None => defaults.draft,
        };

        let jobs = match lookup("CONFORMANCE_JOBS") {
            Some(val) => positive(&val, "CONFORMANCE_JOBS")? as usize,
            None => defaults.jobs,
        };

        let time_budget = lookup("CONFORMANCE_TIME_BUDGET_SECS")
            .map(|val| positive(&val, "CONFORMANCE_TIME_BUDGET_SECS").map(Duration::from_secs))
            .transpose()?;

        let report_format = match lookup("CONFORMANCE_REPORT") {
            Some(val) => val.parse::<ReportFormat>()?,
            None => defaults.report_format,
        };

        let log_json = lookup("CONFORMANCE_LOG_JSON")
            .map(|val| matches!(val.as_str(), "1" | "true"))
            .unwrap_or(defaults.log_json);

        Ok(Self {
            suite_root,
            remotes_root,
            draft,
            jobs,
            time_budget,
            report_format,
            log_json,
        })
    }
}

fn positive(val: &str, var: &str) -> Result<u64, String> {
    match val.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{var} must be a positive integer")),
    }
}
