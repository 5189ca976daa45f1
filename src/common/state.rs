use crate::config::Config;
use crate::imagery::ImageryProvider;
use crate::routes::fields::store::FieldStore;
use std::sync::Arc;

/// Shared application state handed to every router.
///
/// The imagery provider and the record store live behind trait objects so
/// tests can swap in fakes without touching the handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn FieldStore>,
    pub provider: Arc<dyn ImageryProvider>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn FieldStore>, provider: Arc<dyn ImageryProvider>) -> Self {
        Self {
            config,
            store,
            provider,
        }
    }
}
