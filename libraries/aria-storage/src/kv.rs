//! Shared helpers for the key/value tables
//!
//! Table names come from compile-time constants in the store modules, never
//! from caller input, so formatting them into the SQL is safe.

use crate::error::Result;
use sqlx::sqlite::Sqlite;
use sqlx::Row;
use std::str::FromStr;

pub(crate) async fn get<'e, E>(executor: E, table: &str, key: &str) -> Result<Option<String>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT value FROM {table} WHERE key = ?");

    let row = sqlx::query(&sql).bind(key).fetch_optional(executor).await?;

    Ok(row.map(|r| r.get("value")))
}

pub(crate) async fn put<'e, E>(executor: E, table: &str, key: &str, value: &str) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "INSERT INTO {table} (key, value, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(key)
         DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"
    );

    sqlx::query(&sql)
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().timestamp())
        .execute(executor)
        .await?;

    Ok(())
}

pub(crate) async fn delete<'e, E>(executor: E, table: &str, key: &str) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!("DELETE FROM {table} WHERE key = ?");

    sqlx::query(&sql).bind(key).execute(executor).await?;

    Ok(())
}

/// Parse a stored value, falling back when the key is missing or the stored
/// text does not parse
pub(crate) fn parse_or<T: FromStr>(value: Option<String>, fallback: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(fallback)
}
