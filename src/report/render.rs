use std::fmt::Write;

use super::tree::{Status, SuiteReport};

/// Render the report as an indented file → group → case tree.
///
/// With `full` unset only failing nodes are printed. The summary line is
/// always last.
pub fn render_text(report: &SuiteReport, full: bool) -> String {
    let mut out = String::new();
    let shown = |status: Status| full || status == Status::Failed;

    for file in report.files.iter().filter(|f| shown(f.status)) {
        let _ = write!(out, "{} {}", file.status.label(), file.path.display());
        match &file.error {
            Some(error) => {
                let _ = writeln!(out, ": {error}");
            }
            None => out.push('\n'),
        }

        for group in file.groups.iter().filter(|g| shown(g.status)) {
            let _ = write!(out, "  {} {}", group.status.label(), group.description);
            match &group.error {
                Some(error) => {
                    let _ = writeln!(out, ": {error}");
                }
                None => out.push('\n'),
            }

            for case in group.cases.iter().filter(|c| shown(c.status)) {
                let _ = write!(out, "    {} {}", case.status.label(), case.description);
                match &case.failure {
                    Some(failure) => {
                        let _ = writeln!(out, ": {}: {failure}", failure.kind().as_str());
                    }
                    None => out.push('\n'),
                }
            }
        }
    }

    let summary = &report.summary;
    let _ = writeln!(
        out,
        "{} {} ({} remotes) | files: {} | groups: {} | cases: {}",
        report.status.label(),
        report.draft,
        report.remotes,
        summary.files,
        summary.groups,
        summary.cases,
    );
    out
}

pub fn render_json(report: &SuiteReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
