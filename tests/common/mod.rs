// Common test utilities and helpers

pub mod client;
pub mod providers;

use axum::Router;
use fieldscope_api::common::state::AppState;
use fieldscope_api::config::Config;
use fieldscope_api::imagery::ImageryProvider;
use fieldscope_api::routes::build_router;
use fieldscope_api::routes::fields::store::JsonFileStore;
use std::sync::Arc;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize test environment (logging, etc.)
pub fn init() {
    INIT.call_once(|| {
        // Initialize tracing for tests
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Builds a router over a fresh flat-file store and the given imagery
/// provider. The TempDir keeps the store alive for the test's duration.
pub fn setup_test_app(provider: Arc<dyn ImageryProvider>) -> (Router, TempDir) {
    init();

    let dir = TempDir::new().expect("failed to create temp dir for record store");
    let store = Arc::new(JsonFileStore::new(dir.path().join("fields_db.json")));
    let state = AppState::new(Config::for_tests(), store, provider);
    (build_router(&state), dir)
}
