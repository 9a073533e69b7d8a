use std::fs;
use std::path::PathBuf;

use jsonschema_conformance::draft::Draft;
use jsonschema_conformance::engine::JsonSchemaEngine;
use jsonschema_conformance::harness::Harness;
use jsonschema_conformance::report::{render_text, Status};
use jsonschema_conformance::suite::load_remotes;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/golden/fixtures")
}

fn read_expected(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/expected")
        .join(name);
    fs::read_to_string(path).expect("expected file missing")
}

fn golden_harness(jobs: usize) -> Harness<JsonSchemaEngine> {
    let remotes = load_remotes(fixtures_root().join("remotes")).expect("fixture remotes must load");
    Harness::new(JsonSchemaEngine::new(Draft::Draft7), remotes, Draft::Draft7).with_jobs(jobs)
}

#[tokio::test]
async fn golden_full_text_report() {
    let root = fixtures_root();
    let report = golden_harness(2).run(root.join("draft7")).await;

    assert_eq!(report.status, Status::Failed);

    let text = render_text(&report, true).replace(&root.display().to_string(), "<root>");
    assert_eq!(text, read_expected("report.txt"), "Golden report mismatch");
}

#[test]
fn golden_report_is_identical_across_runs() {
    let root = fixtures_root().join("draft7");
    let first = golden_harness(1).run_blocking(&root);
    let second = golden_harness(1).run_blocking(&root);
    assert_eq!(first, second, "Two runs over the same fixtures must agree");
}
