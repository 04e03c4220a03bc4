use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Problem, SortKey, Status};
use crate::AppResult;

pub const DEFAULT_LIMIT: i64 = 1000;

/// List filters, already coerced by the handler: `status` only holds a
/// valid value, `sort` has its default applied, `limit` is positive.
#[derive(Debug, Clone)]
pub struct ListFilter {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub sort: SortKey,
    pub limit: i64,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            sort: SortKey::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

pub async fn migrate(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS problems (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            problem TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            timestamp INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_problems_status_ts
         ON problems (status, timestamp DESC)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_problems_ts ON problems (timestamp DESC)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list(pool: &SqlitePool, filter: &ListFilter) -> AppResult<Vec<Problem>> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id,email,problem,status,timestamp FROM problems");
    let mut has_where = false;

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let needle = format!("%{}%", escape_like(&search.to_lowercase()));
        qb.push(" WHERE (LOWER(email) LIKE ");
        qb.push_bind(needle.clone());
        qb.push(" ESCAPE '\\' OR LOWER(problem) LIKE ");
        qb.push_bind(needle);
        qb.push(" ESCAPE '\\')");
        has_where = true;
    }

    if let Some(status) = filter.status {
        qb.push(if has_where { " AND status = " } else { " WHERE status = " });
        qb.push_bind(status.as_str());
    }

    qb.push(match filter.sort {
        SortKey::Newest => " ORDER BY timestamp DESC",
        SortKey::Oldest => " ORDER BY timestamp ASC",
        SortKey::Email => " ORDER BY email ASC",
        // Pending sorts before resolved; newest first within each group.
        SortKey::Status => " ORDER BY status ASC, timestamp DESC",
    });

    qb.push(" LIMIT ");
    qb.push_bind(filter.limit);

    let rows: Vec<Row> = qb.build_query_as().fetch_all(pool).await?;
    rows.into_iter().map(from_row).collect()
}

pub async fn insert(
    pool: &SqlitePool,
    email: String,
    problem: String,
    timestamp: OffsetDateTime,
) -> AppResult<Problem> {
    let record = Problem {
        id: Uuid::now_v7(),
        email,
        problem,
        status: Status::Pending,
        // The store keeps millisecond precision; the returned record must
        // match what a later fetch would see.
        timestamp: from_millis(to_millis(timestamp))?,
    };

    sqlx::query("INSERT INTO problems (id,email,problem,status,timestamp) VALUES (?,?,?,?,?)")
        .bind(record.id.to_string())
        .bind(&record.email)
        .bind(&record.problem)
        .bind(record.status.as_str())
        .bind(to_millis(record.timestamp))
        .execute(pool)
        .await?;

    Ok(record)
}

pub async fn fetch(pool: &SqlitePool, id: &str) -> AppResult<Option<Problem>> {
    let row: Option<Row> =
        sqlx::query_as("SELECT id,email,problem,status,timestamp FROM problems WHERE id=?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    row.map(from_row).transpose()
}

pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    status: Status,
) -> AppResult<Option<Problem>> {
    let result = sqlx::query("UPDATE problems SET status=? WHERE id=?")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    fetch(pool, id).await
}

/// Removes the record and hands back its prior content, so the caller can
/// offer undo-by-reinsertion.
pub async fn delete(pool: &SqlitePool, id: &str) -> AppResult<Option<Problem>> {
    let Some(record) = fetch(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM problems WHERE id=?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(Some(record))
}

type Row = (String, String, String, String, i64);

fn from_row((id, email, problem, status, timestamp): Row) -> AppResult<Problem> {
    Ok(Problem {
        id: Uuid::parse_str(&id)?,
        email,
        problem,
        status: Status::parse(&status)
            .ok_or_else(|| anyhow::anyhow!("unknown status in store: {status}"))?,
        timestamp: from_millis(timestamp)?,
    })
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn to_millis(ts: OffsetDateTime) -> i64 {
    (ts.unix_timestamp_nanos() / 1_000_000) as i64
}

fn from_millis(ms: i64) -> AppResult<OffsetDateTime> {
    Ok(OffsetDateTime::from_unix_timestamp_nanos(
        i128::from(ms) * 1_000_000,
    )?)
}
