use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use addonctl_core::{CoreError, CoreResult};

use crate::MIGRATOR;

/// Creates a SQLite connection pool configured for metadata workloads.
pub async fn create_sqlite_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
}

/// Runs all outstanding migrations against the provided connection pool.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Maps a sqlx error to the canonical core error for the given entity.
pub(crate) fn map_sqlx_error(entity: &'static str, id: String, err: sqlx::Error) -> CoreError {
    match err.as_database_error() {
        Some(db_err) if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation => {
            CoreError::already_exists(entity, id)
        }
        _ => CoreError::internal(err.to_string()),
    }
}

/// Formats a timestamp as the canonical RFC 3339 string stored in SQLite.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored RFC 3339 timestamp back into UTC.
pub(crate) fn parse_timestamp(raw: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| CoreError::internal(e.to_string()))
}
