use std::sync::Arc;

use axum::{Json, Router, debug_handler, extract::State, http::StatusCode, routing::post};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppError, AppResult, AppState, Config};

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/login", post(login))
}

/// The shared-secret gate behind every mutating admin operation. Takes
/// the credential as an argument; nothing holds it ambiently.
pub fn authorize(config: &Config, supplied: Option<&str>) -> AppResult<()> {
    if supplied.is_some_and(|password| password == config.admin_password) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginBody {
    password: Option<String>,
}

/// Pure check, no session created. The client keeps the credential and
/// sends it with each admin request.
#[debug_handler]
pub(crate) async fn login(
    State(config): State<Arc<Config>>,
    Json(body): Json<LoginBody>,
) -> (StatusCode, Json<Value>) {
    match authorize(&config, body.password.as_deref()) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Authentication successful" })),
        ),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid password" })),
        ),
    }
}
