use std::sync::Arc;

use axum::{
    Json, debug_handler,
    extract::{Path, State},
};
use serde::Deserialize;
use sqlx::SqlitePool;

use super::{Problem, Status, store};
use crate::{AppError, AppResult, AppState, Config, admin};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBody {
    status: Option<String>,
    admin_password: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn update_status(
    State(db_pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Json<Problem>> {
    admin::authorize(&config, body.admin_password.as_deref())?;

    let status = body
        .status
        .as_deref()
        .and_then(Status::parse)
        .ok_or(AppError::InvalidStatus)?;

    let updated = store::update_status(&db_pool, &id, status)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}
