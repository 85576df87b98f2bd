//! Studio Binary - Headless client driver
//!
//! Restores the persisted editing session against a running backend and
//! prints the resulting project snapshot. With a message argument it also
//! applies one conversational edit and waits for the render to finish.
//! It wires up:
//! - HTTP adapters for the planner and renderer backend
//! - Filesystem session store
//! - The studio orchestrator

use avea_studio::adapters::http::{HttpPlanner, HttpRenderer};
use avea_studio::adapters::local::FsSessionStore;
use avea_studio::application::StudioOrchestrator;
use avea_studio::config::StudioConfig;
use avea_studio::domain::jobs::JobState;

#[tokio::main]
async fn main() {
    let config = StudioConfig::from_env();

    tracing_subscriber::fmt::init();

    // 1. Adapters
    let planner = HttpPlanner::new(config.api_base_url.as_str());
    let renderer = HttpRenderer::new(config.api_base_url.as_str());
    let store = FsSessionStore::new(config.session_path.clone());

    // 2. Application Service
    let orchestrator = StudioOrchestrator::new(planner, renderer, store, config.poll.clone());

    if let Err(e) = orchestrator.initialize().await {
        eprintln!("Failed to restore session: {e}");
        std::process::exit(1);
    }

    // 3. Optional one-shot edit
    if let Some(message) = std::env::args().nth(1) {
        if let Err(e) = orchestrator.apply_edit(&message).await {
            eprintln!("Edit failed: {e}");
            std::process::exit(1);
        }
        while orchestrator.snapshot().job.is_live() {
            tokio::time::sleep(config.poll.interval).await;
        }
        if let JobState::Failed { message } = orchestrator.snapshot().job {
            eprintln!("Render failed: {message}");
            std::process::exit(1);
        }
    }

    let snapshot = orchestrator.snapshot();
    let json = serde_json::to_string_pretty(&snapshot).expect("snapshot serializes");
    println!("{json}");
}
