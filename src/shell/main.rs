use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use golf_seasons::shared::core::primitives::{SystemClock, UuidV7Ids};
use golf_seasons::shared::infrastructure::golf_store::in_memory::InMemoryGolfStore;
use golf_seasons::shared::infrastructure::golf_store::json_file::JsonFileGolfStore;
use golf_seasons::shell::config::{AppConfig, StoreBackend};
use golf_seasons::shell::http::router;
use golf_seasons::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;
    let clock = Arc::new(SystemClock);
    let ids = Arc::new(UuidV7Ids);

    let state = match &config.store {
        StoreBackend::Memory => {
            tracing::info!("using in-memory golf store");
            AppState::new(Arc::new(InMemoryGolfStore::new()), clock, ids)
        }
        StoreBackend::File(path) => {
            tracing::info!(path = %path.display(), "using json file golf store");
            AppState::new(Arc::new(JsonFileGolfStore::open(path)?), clock, ids)
        }
    };

    let app = router(state);

    tracing::info!("REST endpoints on http://{}", config.bind_addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
