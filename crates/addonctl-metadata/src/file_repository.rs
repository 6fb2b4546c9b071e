//! SQLite implementation of the file repository, including the review
//! eligibility query used by bulk approval.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{query, Row, SqlitePool};

use addonctl_core::{
    Addon, AddonId, AddonStatus, CoreError, CoreResult, File, FileId, FileRepository, FileStatus,
    ReviewCandidate, VersionId,
};

use crate::util::{format_timestamp, map_sqlx_error, parse_timestamp};

/// SQLite-backed repository for downloadable files.
pub struct SqliteFileRepository {
    pool: SqlitePool,
}

impl SqliteFileRepository {
    /// Creates a new repository backed by the provided pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for SqliteFileRepository {
    async fn create(&self, file: &File) -> CoreResult<()> {
        query(
            "INSERT INTO files (file_id, version_id, filename, status, is_signed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(file.file_id.to_bytes().to_vec())
        .bind(file.version_id.to_bytes().to_vec())
        .bind(&file.filename)
        .bind(file.status.as_str())
        .bind(i64::from(file.is_signed))
        .bind(format_timestamp(file.created_at))
        .bind(format_timestamp(file.updated_at))
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(|err| map_sqlx_error("file", file.file_id.to_string(), err))
    }

    async fn get(&self, file_id: FileId) -> CoreResult<Option<File>> {
        let row = query(
            "SELECT file_id, version_id, filename, status, is_signed, created_at, updated_at
             FROM files WHERE file_id = ?1",
        )
        .bind(file_id.to_bytes().to_vec())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

        row.as_ref().map(parse_file_row).transpose()
    }

    async fn update(&self, file: &File) -> CoreResult<()> {
        let result = query(
            "UPDATE files
                SET filename = ?2, status = ?3, is_signed = ?4, updated_at = ?5
              WHERE file_id = ?1",
        )
        .bind(file.file_id.to_bytes().to_vec())
        .bind(&file.filename)
        .bind(file.status.as_str())
        .bind(i64::from(file.is_signed))
        .bind(format_timestamp(file.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|err| map_sqlx_error("file", file.file_id.to_string(), err))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("file", file.file_id.to_string()));
        }
        Ok(())
    }

    async fn list_by_version(&self, version_id: VersionId) -> CoreResult<Vec<File>> {
        let rows = query(
            "SELECT file_id, version_id, filename, status, is_signed, created_at, updated_at
             FROM files WHERE version_id = ?1 ORDER BY created_at, rowid",
        )
        .bind(version_id.to_bytes().to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

        rows.iter().map(parse_file_row).collect()
    }

    async fn list_awaiting_review(&self, guids: &[String]) -> CoreResult<Vec<ReviewCandidate>> {
        if guids.is_empty() {
            return Ok(Vec::new());
        }

        // Incomplete add-ons contribute no files regardless of file status.
        let placeholders = (1..=guids.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT f.file_id, f.version_id, f.filename, f.status, f.is_signed,
                    f.created_at, f.updated_at,
                    a.addon_id AS addon_id, a.guid AS addon_guid, a.name AS addon_name,
                    a.status AS addon_status, a.created_at AS addon_created_at,
                    a.updated_at AS addon_updated_at
               FROM files f
               JOIN versions v ON v.version_id = f.version_id
               JOIN addons a ON a.addon_id = v.addon_id
              WHERE a.guid IN ({placeholders})
                AND a.status != 'incomplete'
                AND f.status = 'awaiting-review'
              ORDER BY f.created_at, f.rowid"
        );

        let mut q = query(&sql);
        for guid in guids {
            q = q.bind(guid);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CoreError::internal(e.to_string()))?;

        rows.iter().map(parse_candidate_row).collect()
    }
}

/// Parse a file row from SQLite.
fn parse_file_row(row: &sqlx::sqlite::SqliteRow) -> CoreResult<File> {
    let file_id_bytes: Vec<u8> = row
        .try_get("file_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let version_id_bytes: Vec<u8> = row
        .try_get("version_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let filename: String = row
        .try_get("filename")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let is_signed: i64 = row
        .try_get("is_signed")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let created_at_str: String = row
        .try_get("created_at")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let updated_at_str: String = row
        .try_get("updated_at")
        .map_err(|e| CoreError::internal(e.to_string()))?;

    let status = FileStatus::from_str(&status_str)
        .map_err(|()| CoreError::invalid_state(format!("invalid file status: {status_str}")))?;

    Ok(File {
        file_id: FileId::from_bytes(&file_id_bytes)
            .map_err(|e| CoreError::internal(e.to_string()))?,
        version_id: VersionId::from_bytes(&version_id_bytes)
            .map_err(|e| CoreError::internal(e.to_string()))?,
        filename,
        status,
        is_signed: is_signed != 0,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}

/// Parse a joined file + add-on row from the eligibility query.
fn parse_candidate_row(row: &sqlx::sqlite::SqliteRow) -> CoreResult<ReviewCandidate> {
    let file = parse_file_row(row)?;

    let addon_id_bytes: Vec<u8> = row
        .try_get("addon_id")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let guid: String = row
        .try_get("addon_guid")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let name: String = row
        .try_get("addon_name")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let status_str: String = row
        .try_get("addon_status")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let created_at_str: String = row
        .try_get("addon_created_at")
        .map_err(|e| CoreError::internal(e.to_string()))?;
    let updated_at_str: String = row
        .try_get("addon_updated_at")
        .map_err(|e| CoreError::internal(e.to_string()))?;

    let status = AddonStatus::from_str(&status_str)
        .map_err(|()| CoreError::invalid_state(format!("invalid addon status: {status_str}")))?;

    let addon = Addon {
        addon_id: AddonId::from_bytes(&addon_id_bytes)
            .map_err(|e| CoreError::internal(e.to_string()))?,
        guid,
        name,
        status,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    };

    Ok(ReviewCandidate { file, addon })
}
