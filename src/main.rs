use std::sync::Arc;

use share2solve::{AppState, Config, app, problems::store};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(&config.database_url)
        .await?;
    store::migrate(&db_pool).await?;

    let address = format!("0.0.0.0:{}", config.port);
    let state = AppState {
        db_pool,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("listening on {address}");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
