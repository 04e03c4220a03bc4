pub mod admin;
pub mod client;
pub mod config;
pub mod error;
pub mod problems;

use std::sync::Arc;

use axum::{
    Json, Router, debug_handler,
    extract::FromRef,
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use config::Config;
pub use error::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<Config>,
}

/// The full HTTP stack. The server binary and the integration tests both
/// serve exactly this router.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .merge(problems::router())
        .merge(admin::router())
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
}

#[debug_handler]
async fn health() -> AppResult<Json<Value>> {
    Ok(Json(json!({
        "status": "ok",
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339)?,
    })))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
