use axum::{
    Json, debug_handler,
    extract::{Query, State},
};
use serde::Deserialize;
use sqlx::SqlitePool;

use super::{Problem, SortKey, Status, store};
use crate::AppResult;

/// Raw query params, all taken as text so junk values can be coerced the
/// way the contract wants instead of being bounced by the extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListQuery {
    search: Option<String>,
    status: Option<String>,
    sort_by: Option<String>,
    limit: Option<String>,
}

impl ListQuery {
    /// Coercion rules: unknown status is ignored, unknown sortBy falls
    /// back to newest, non-numeric or non-positive limit falls back to
    /// the default.
    fn into_filter(self) -> store::ListFilter {
        store::ListFilter {
            search: self.search.filter(|s| !s.trim().is_empty()),
            status: self.status.as_deref().and_then(Status::parse),
            sort: self
                .sort_by
                .as_deref()
                .and_then(SortKey::parse)
                .unwrap_or_default(),
            limit: self
                .limit
                .and_then(|raw| raw.parse::<i64>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(store::DEFAULT_LIMIT),
        }
    }
}

#[debug_handler]
pub(crate) async fn list_problems(
    State(db_pool): State<SqlitePool>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Problem>>> {
    let filter = query.into_filter();
    Ok(Json(store::list(&db_pool, &filter).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_an_empty_query() {
        let filter = ListQuery::default().into_filter();
        assert_eq!(filter.search, None);
        assert_eq!(filter.status, None);
        assert_eq!(filter.sort, SortKey::Newest);
        assert_eq!(filter.limit, store::DEFAULT_LIMIT);
    }

    #[test]
    fn invalid_status_is_ignored() {
        let filter = ListQuery {
            status: Some("escalated".to_owned()),
            ..Default::default()
        }
        .into_filter();
        assert_eq!(filter.status, None);
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        let filter = ListQuery {
            sort_by: Some("priority".to_owned()),
            ..Default::default()
        }
        .into_filter();
        assert_eq!(filter.sort, SortKey::Newest);
    }

    #[test]
    fn limit_coercion_matches_the_contract() {
        let coerce = |raw: &str| {
            ListQuery {
                limit: Some(raw.to_owned()),
                ..Default::default()
            }
            .into_filter()
            .limit
        };

        assert_eq!(coerce("25"), 25);
        assert_eq!(coerce("abc"), store::DEFAULT_LIMIT);
        assert_eq!(coerce("0"), store::DEFAULT_LIMIT);
        assert_eq!(coerce("-3"), store::DEFAULT_LIMIT);
    }

    #[test]
    fn blank_search_is_dropped() {
        let filter = ListQuery {
            search: Some("   ".to_owned()),
            ..Default::default()
        }
        .into_filter();
        assert_eq!(filter.search, None);
    }
}
