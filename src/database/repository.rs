// Generic fetch-with-projection execution.
//
// Every read statement in this crate projects a single `record` column
// holding the row's JSON object; writes use CTEs that return the touched row
// the same way. Parameters arrive as JSON values and are bound by shape.

use serde_json::Value;
use sqlx::{postgres::PgArguments, PgPool, Row};

use super::StoreError;
use crate::projection::SqlResult;

/// Fetch all rows of a compiled statement as JSON objects.
pub async fn fetch_rows(pool: &PgPool, sql: &SqlResult) -> Result<Vec<Value>, StoreError> {
    let mut query = sqlx::query(&sql.query);
    for param in &sql.params {
        query = bind_param(query, param);
    }
    let rows = query.fetch_all(pool).await?;
    rows.iter()
        .map(|row| row.try_get::<Value, _>("record").map_err(StoreError::from))
        .collect()
}

/// Fetch at most one row; `None` when nothing matches.
pub async fn fetch_optional(pool: &PgPool, sql: &SqlResult) -> Result<Option<Value>, StoreError> {
    let mut query = sqlx::query(&sql.query);
    for param in &sql.params {
        query = bind_param(query, param);
    }
    let row = query.fetch_optional(pool).await?;
    row.map(|r| r.try_get::<Value, _>("record").map_err(StoreError::from))
        .transpose()
}

/// Fetch exactly one row, e.g. the RETURNING row of an insert or update.
pub async fn fetch_one(pool: &PgPool, sql: &SqlResult) -> Result<Value, StoreError> {
    let mut query = sqlx::query(&sql.query);
    for param in &sql.params {
        query = bind_param(query, param);
    }
    let row = query.fetch_one(pool).await?;
    Ok(row.try_get::<Value, _>("record")?)
}

/// Execute a statement without reading rows back.
pub async fn execute(pool: &PgPool, sql: &SqlResult) -> Result<u64, StoreError> {
    let mut query = sqlx::query(&sql.query);
    for param in &sql.params {
        query = bind_param(query, param);
    }
    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

/// Execute a statement that must touch at least one row (update/delete by id).
pub async fn execute_expecting(pool: &PgPool, sql: &SqlResult) -> Result<(), StoreError> {
    if execute(pool, sql).await? == 0 {
        return Err(StoreError::NothingAffected);
    }
    Ok(())
}

fn bind_param<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    value: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match value {
        Value::Null => {
            let none: Option<String> = None;
            query.bind(none)
        }
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(f) = n.as_f64() {
                query.bind(f)
            } else {
                query.bind(n.to_string())
            }
        }
        Value::String(s) => query.bind(s),
        // Arrays and objects bind as JSONB
        other => query.bind(other.clone()),
    }
}
