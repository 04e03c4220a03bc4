use std::sync::Arc;

use axum::{
    Json, debug_handler,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::{Problem, store};
use crate::{AppError, AppResult, AppState, Config, admin};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteBody {
    admin_password: Option<String>,
}

/// The deleted record rides along so the dashboard can offer undo by
/// resubmitting it.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteResponse {
    message: &'static str,
    problem: Problem,
}

#[debug_handler(state = AppState)]
pub(crate) async fn delete_problem(
    State(db_pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
    Path(id): Path<String>,
    Json(body): Json<DeleteBody>,
) -> AppResult<Json<DeleteResponse>> {
    admin::authorize(&config, body.admin_password.as_deref())?;

    let record = store::delete(&db_pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!("deleted problem {}", record.id);

    Ok(Json(DeleteResponse {
        message: "Problem deleted",
        problem: record,
    }))
}
