mod create;
mod delete;
mod list;
mod update;

pub mod store;
pub mod validate;

use axum::{
    Router,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/problems",
            get(list::list_problems).post(create::create_problem),
        )
        .route(
            "/problems/{id}",
            patch(update::update_status).delete(delete::delete_problem),
        )
}

/// A stored problem submission. `email` and `problem` are immutable once
/// written; only `status` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub email: String,
    pub problem: String,
    pub status: Status,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Resolved,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Resolved => "resolved",
        }
    }

    /// `None` for anything outside the enum; callers decide whether that
    /// means "ignore the filter" or "reject the request".
    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "pending" => Some(Status::Pending),
            "resolved" => Some(Status::Resolved),
            _ => None,
        }
    }

    pub fn toggled(self) -> Status {
        match self {
            Status::Pending => Status::Resolved,
            Status::Resolved => Status::Pending,
        }
    }
}

/// Ordering applied by both the list endpoint and the dashboard pipeline.
/// The two must agree, so there is exactly one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Email,
    Status,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Email => "email",
            SortKey::Status => "status",
        }
    }

    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "newest" => Some(SortKey::Newest),
            "oldest" => Some(SortKey::Oldest),
            "email" => Some(SortKey::Email),
            "status" => Some(SortKey::Status),
            _ => None,
        }
    }
}
