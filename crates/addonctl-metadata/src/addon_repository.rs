//! SQLite implementation of the add-on repository.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{query, Row, SqlitePool};

use addonctl_core::{Addon, AddonId, AddonRepository, AddonStatus, CoreError, CoreResult};

use crate::util::{format_timestamp, map_sqlx_error, parse_timestamp};

/// SQLite-backed repository for add-on listings.
pub struct SqliteAddonRepository {
    pool: SqlitePool,
}

impl SqliteAddonRepository {
    /// Creates a new repository backed by the provided pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddonRepository for SqliteAddonRepository {
    async fn create(&self, addon: &Addon) -> CoreResult<()> {
        query(
            "INSERT INTO addons (addon_id, guid, name, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(addon.addon_id.to_bytes().to_vec())
        .bind(&addon.guid)
        .bind(&addon.name)
        .bind(addon.status.as_str())
        .bind(format_timestamp(addon.created_at))
        .bind(format_timestamp(addon.updated_at))
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(|err| map_sqlx_error("addon", addon.guid.clone(), err))
    }

    async fn get(&self, addon_id: AddonId) -> CoreResult<Option<Addon>> {
        let row = query(
            "SELECT addon_id, guid, name, status, created_at, updated_at
             FROM addons WHERE addon_id = ?1",
        )
        .bind(addon_id.to_bytes().to_vec())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

        row.as_ref().map(parse_addon_row).transpose()
    }

    async fn get_by_guid(&self, guid: &str) -> CoreResult<Option<Addon>> {
        let row = query(
            "SELECT addon_id, guid, name, status, created_at, updated_at
             FROM addons WHERE guid = ?1",
        )
        .bind(guid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

        row.as_ref().map(parse_addon_row).transpose()
    }

    async fn update(&self, addon: &Addon) -> CoreResult<()> {
        let result = query(
            "UPDATE addons
                SET guid = ?2, name = ?3, status = ?4, updated_at = ?5
              WHERE addon_id = ?1",
        )
        .bind(addon.addon_id.to_bytes().to_vec())
        .bind(&addon.guid)
        .bind(&addon.name)
        .bind(addon.status.as_str())
        .bind(format_timestamp(addon.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|err| map_sqlx_error("addon", addon.guid.clone(), err))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("addon", addon.addon_id.to_string()));
        }
        Ok(())
    }

    async fn list(&self) -> CoreResult<Vec<Addon>> {
        let rows = query(
            "SELECT addon_id, guid, name, status, created_at, updated_at
             FROM addons ORDER BY created_at, rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

        rows.iter().map(parse_addon_row).collect()
    }
}

/// Parse an add-on row from SQLite.
pub(crate) fn parse_addon_row(row: &sqlx::sqlite::SqliteRow) -> CoreResult<Addon> {
    let addon_id_bytes: Vec<u8> = row
        .try_get("addon_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let guid: String = row
        .try_get("guid")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let created_at_str: String = row
        .try_get("created_at")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let updated_at_str: String = row
        .try_get("updated_at")
        .map_err(|e| CoreError::internal(e.to_string()))?;

    let addon_id =
        AddonId::from_bytes(&addon_id_bytes).map_err(|e| CoreError::internal(e.to_string()))?;
    let status = AddonStatus::from_str(&status_str)
        .map_err(|()| CoreError::invalid_state(format!("invalid addon status: {status_str}")))?;

    Ok(Addon {
        addon_id,
        guid,
        name,
        status,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}
