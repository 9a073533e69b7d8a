use jsonschema_conformance::config::{HarnessConfig, ReportFormat};
use jsonschema_conformance::engine::JsonSchemaEngine;
use jsonschema_conformance::harness::Harness;
use jsonschema_conformance::report::{render_json, render_text, Status};
use jsonschema_conformance::runner::Deadline;
use jsonschema_conformance::suite::load_remotes;
use tracing_subscriber::EnvFilter;

/// Configuration errors and unusable remote fixtures.
const EXIT_FATAL: i32 = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match HarnessConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("jsonschema-conformance: configuration error: {e}");
            std::process::exit(EXIT_FATAL);
        }
    };

    init_tracing(config.log_json);

    // No test group is meaningful without the complete reference set.
    let remotes = match load_remotes(&config.remotes_root) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "cannot load remote schemas");
            std::process::exit(EXIT_FATAL);
        }
    };

    let deadline = config
        .time_budget
        .map_or_else(Deadline::none, Deadline::after);

    let harness = Harness::new(JsonSchemaEngine::new(config.draft), remotes, config.draft)
        .with_jobs(config.jobs)
        .with_deadline(deadline);

    let report = harness.run(&config.suite_root).await;

    match config.report_format {
        ReportFormat::Text => print!("{}", render_text(&report, false)),
        ReportFormat::TextFull => print!("{}", render_text(&report, true)),
        ReportFormat::Json => match render_json(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "cannot serialize report");
                std::process::exit(EXIT_FATAL);
            }
        },
    }

    std::process::exit(match report.status {
        Status::Passed => 0,
        Status::Failed => 1,
        Status::NotRun => 2,
    });
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
