//! Audit log domain model for review and signing traceability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ids::{AddonId, AuditLogId, FileId, UserId};

/// Audit log entry recording an administrative action against an add-on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub audit_log_id: AuditLogId,
    pub addon_id: AddonId,
    pub file_id: Option<FileId>,
    pub user_id: UserId,
    pub action: AuditAction,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Administrative action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// A file was approved for public distribution.
    Approve,
    /// A signing run was dispatched for the add-on.
    Sign,
}

impl AuditLogEntry {
    /// Create a new audit log entry attributed to the given user.
    #[must_use]
    pub fn new(addon_id: AddonId, user_id: UserId, action: AuditAction) -> Self {
        Self {
            audit_log_id: AuditLogId::new(),
            addon_id,
            file_id: None,
            user_id,
            action,
            comments: None,
            created_at: Utc::now(),
        }
    }

    /// Scope the entry to a specific file of the add-on.
    #[must_use]
    pub fn with_file(mut self, file_id: FileId) -> Self {
        self.file_id = Some(file_id);
        self
    }

    /// Attach a free-text comment describing the action.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

impl AuditAction {
    /// Convert the action to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Approve => "approve",
            AuditAction::Sign => "sign",
        }
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(AuditAction::Approve),
            "sign" => Ok(AuditAction::Sign),
            _ => Err(format!("invalid audit action: {s}")),
        }
    }
}
