use axum::{Json, debug_handler, extract::State, http::StatusCode};
use serde::Deserialize;
use sqlx::SqlitePool;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use super::{Problem, store, validate};
use crate::{AppError, AppResult};

/// Fields are optional so that absence surfaces as our own validation
/// error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateBody {
    email: Option<String>,
    problem: Option<String>,
    timestamp: Option<String>,
}

#[debug_handler]
pub(crate) async fn create_problem(
    State(db_pool): State<SqlitePool>,
    Json(body): Json<CreateBody>,
) -> AppResult<(StatusCode, Json<Problem>)> {
    let (email, problem) =
        validate::validate_submission(body.email.as_deref(), body.problem.as_deref())?;

    let timestamp = match body.timestamp.as_deref() {
        Some(raw) => {
            OffsetDateTime::parse(raw, &Rfc3339).map_err(|_| AppError::InvalidTimestamp)?
        }
        None => OffsetDateTime::now_utc(),
    };

    let record = store::insert(&db_pool, email, problem, timestamp).await?;
    tracing::info!("stored problem {} from {}", record.id, record.email);

    Ok((StatusCode::CREATED, Json(record)))
}
