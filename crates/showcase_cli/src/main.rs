//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `showcase_core` linkage without any UI shell.
//! - Run one in-memory add/search/export round with deterministic output.
//! - Write core logs when `SHOWCASE_LOG_DIR` names an absolute directory.

use showcase_core::{ProjectDraft, ProjectService, SearchState, ShowcaseConfig, SubmitOutcome};

const LOG_DIR_ENV: &str = "SHOWCASE_LOG_DIR";

fn main() {
    println!("showcase_core version={}", showcase_core::core_version());

    let config = ShowcaseConfig::ephemeral();
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        match config.start_logging(&log_dir) {
            Ok(()) => println!("logging level={} dir={log_dir}", config.log_level),
            Err(err) => eprintln!("logging disabled: {err}"),
        }
    }

    let mut service = match ProjectService::bootstrap(&config, None) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("bootstrap failed: {err}");
            std::process::exit(1);
        }
    };
    for (title, description) in [
        ("React App", "A React application"),
        ("Vue App", "A Vue application"),
        ("", "missing title"),
    ] {
        match service.submit(&ProjectDraft::new(title, description)) {
            SubmitOutcome::Added(project) => println!("added title={}", project.title()),
            SubmitOutcome::Rejected(report) => {
                for message in report.errors.values() {
                    println!("rejected reason={message}");
                }
            }
            SubmitOutcome::Failed(message) => println!("failed reason={message}"),
        }
    }

    let mut search = SearchState::new();
    search.set_term("vue");
    let visible = service.visible_projects(&search);
    println!("search term={} hits={}", search.term(), visible.len());
    println!("export bytes={}", service.export_json().len());
}
