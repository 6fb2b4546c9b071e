//! SQLite implementation of the audit log repository.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{query, Row, SqlitePool};

use addonctl_core::{
    AddonId, AuditAction, AuditLogEntry, AuditLogId, AuditLogRepository, CoreError, CoreResult,
    FileId, UserId,
};

use crate::util::{format_timestamp, parse_timestamp};

/// SQLite implementation of the audit log repository.
pub struct SqliteAuditLogRepository {
    pool: SqlitePool,
}

impl SqliteAuditLogRepository {
    /// Creates a new SQLite audit log repository.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for SqliteAuditLogRepository {
    async fn create(&self, entry: &AuditLogEntry) -> CoreResult<()> {
        query(
            "INSERT INTO audit_logs (audit_log_id, addon_id, file_id, user_id, action, comments, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(entry.audit_log_id.to_bytes().to_vec())
        .bind(entry.addon_id.to_bytes().to_vec())
        .bind(entry.file_id.map(|id| id.to_bytes().to_vec()))
        .bind(entry.user_id.to_bytes().to_vec())
        .bind(entry.action.as_str())
        .bind(&entry.comments)
        .bind(format_timestamp(entry.created_at))
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(|e| CoreError::internal(e.to_string()))
    }

    async fn list_by_addon(&self, addon_id: AddonId) -> CoreResult<Vec<AuditLogEntry>> {
        let rows = query(
            "SELECT audit_log_id, addon_id, file_id, user_id, action, comments, created_at
             FROM audit_logs WHERE addon_id = ?1 ORDER BY created_at, rowid",
        )
        .bind(addon_id.to_bytes().to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

        rows.iter().map(parse_audit_log_row).collect()
    }
}

/// Parse an audit log row from SQLite.
fn parse_audit_log_row(row: &sqlx::sqlite::SqliteRow) -> CoreResult<AuditLogEntry> {
    let audit_log_id_bytes: Vec<u8> = row
        .try_get("audit_log_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let addon_id_bytes: Vec<u8> = row
        .try_get("addon_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let file_id_bytes: Option<Vec<u8>> = row
        .try_get("file_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let user_id_bytes: Vec<u8> = row
        .try_get("user_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let action_str: String = row
        .try_get("action")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let comments: Option<String> = row
        .try_get("comments")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let created_at_str: String = row
        .try_get("created_at")
        .map_err(|e| CoreError::internal(e.to_string()))?;

    let audit_log_id = AuditLogId::from_bytes(&audit_log_id_bytes)
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let addon_id =
        AddonId::from_bytes(&addon_id_bytes).map_err(|e| CoreError::internal(e.to_string()))?;
    let file_id = file_id_bytes
        .map(|bytes| FileId::from_bytes(&bytes))
        .transpose()
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let user_id =
        UserId::from_bytes(&user_id_bytes).map_err(|e| CoreError::internal(e.to_string()))?;
    let action = AuditAction::from_str(&action_str).map_err(CoreError::invalid_state)?;

    Ok(AuditLogEntry {
        audit_log_id,
        addon_id,
        file_id,
        user_id,
        action,
        comments,
        created_at: parse_timestamp(&created_at_str)?,
    })
}
