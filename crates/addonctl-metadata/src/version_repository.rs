//! SQLite implementation of the version repository.

use async_trait::async_trait;
use sqlx::{query, Row, SqlitePool};

use addonctl_core::{AddonId, CoreError, CoreResult, Version, VersionId, VersionRepository};

use crate::util::{format_timestamp, map_sqlx_error, parse_timestamp};

/// SQLite-backed repository for add-on versions.
pub struct SqliteVersionRepository {
    pool: SqlitePool,
}

impl SqliteVersionRepository {
    /// Creates a new repository backed by the provided pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionRepository for SqliteVersionRepository {
    async fn create(&self, version: &Version) -> CoreResult<()> {
        query(
            "INSERT INTO versions (version_id, addon_id, version, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(version.version_id.to_bytes().to_vec())
        .bind(version.addon_id.to_bytes().to_vec())
        .bind(&version.version)
        .bind(format_timestamp(version.created_at))
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(|err| map_sqlx_error("version", version.version_id.to_string(), err))
    }

    async fn get(&self, version_id: VersionId) -> CoreResult<Option<Version>> {
        let row = query(
            "SELECT version_id, addon_id, version, created_at
             FROM versions WHERE version_id = ?1",
        )
        .bind(version_id.to_bytes().to_vec())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

        row.as_ref().map(parse_version_row).transpose()
    }

    async fn list_by_addon(&self, addon_id: AddonId) -> CoreResult<Vec<Version>> {
        let rows = query(
            "SELECT version_id, addon_id, version, created_at
             FROM versions WHERE addon_id = ?1 ORDER BY created_at, rowid",
        )
        .bind(addon_id.to_bytes().to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

        rows.iter().map(parse_version_row).collect()
    }
}

/// Parse a version row from SQLite.
fn parse_version_row(row: &sqlx::sqlite::SqliteRow) -> CoreResult<Version> {
    let version_id_bytes: Vec<u8> = row
        .try_get("version_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let addon_id_bytes: Vec<u8> = row
        .try_get("addon_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let version: String = row
        .try_get("version")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let created_at_str: String = row
        .try_get("created_at")
        .map_err(|e| CoreError::internal(e.to_string()))?;

    Ok(Version {
        version_id: VersionId::from_bytes(&version_id_bytes)
            .map_err(|e| CoreError::internal(e.to_string()))?,
        addon_id: AddonId::from_bytes(&addon_id_bytes)
            .map_err(|e| CoreError::internal(e.to_string()))?,
        version,
        created_at: parse_timestamp(&created_at_str)?,
    })
}
