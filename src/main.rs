use fieldscope_api::common::state::AppState;
use fieldscope_api::config::Config;
use fieldscope_api::imagery::sentinel::SentinelHubProvider;
use fieldscope_api::routes;
use fieldscope_api::routes::fields::store::JsonFileStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load config to validate runtime environment used later in app
    let config = Config::from_env();

    let store = Arc::new(JsonFileStore::new(&config.fields_db_path));
    let provider = Arc::new(SentinelHubProvider::new(&config));
    let state = AppState::new(config.clone(), store, provider);

    let addr: std::net::SocketAddr = config.bind_address.parse().unwrap();
    info!(%addr, "Listening");

    let router = routes::build_router(&state);
    axum::serve(
        tokio::net::TcpListener::bind(addr).await.unwrap(),
        router.into_make_service(),
    )
    .await
    .unwrap();
}
