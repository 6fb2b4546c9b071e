use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ids::{FileId, VersionId};

/// Review status of a single downloadable file.
///
/// Correlated with, but independent of, the owning add-on's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
    /// File is queued for review and not yet distributable.
    AwaitingReview,
    /// File is approved and publicly distributable.
    Public,
    /// File has been disabled and must not be served.
    Disabled,
}

impl FileStatus {
    /// Returns the canonical kebab-case string stored in SQLite.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingReview => "awaiting-review",
            Self::Public => "public",
            Self::Disabled => "disabled",
        }
    }
}

impl Default for FileStatus {
    fn default() -> Self {
        Self::AwaitingReview
    }
}

impl FromStr for FileStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awaiting-review" => Ok(Self::AwaitingReview),
            "public" => Ok(Self::Public),
            "disabled" => Ok(Self::Disabled),
            _ => Err(()),
        }
    }
}

/// A concrete downloadable artifact belonging to a version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    /// Stable file identifier.
    pub file_id: FileId,
    /// Owning version identifier.
    pub version_id: VersionId,
    /// Package filename served to clients.
    pub filename: String,
    /// Review status of this file.
    pub status: FileStatus,
    /// Whether the package has already been cryptographically signed.
    pub is_signed: bool,
    /// Creation timestamp in UTC.
    pub created_at: DateTime<Utc>,
    /// Update timestamp in UTC.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Creates a new file owned by the given version.
    #[must_use]
    pub fn new(version_id: VersionId, filename: impl Into<String>, status: FileStatus) -> Self {
        let now = Utc::now();
        Self {
            file_id: FileId::new(),
            version_id,
            filename: filename.into(),
            status,
            is_signed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the file status and updates the modification timestamp.
    pub fn transition_to(&mut self, status: FileStatus) {
        self.status = status;
        self.touch();
    }

    /// Updates the `updated_at` timestamp to the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            FileStatus::AwaitingReview,
            FileStatus::Public,
            FileStatus::Disabled,
        ] {
            assert_eq!(status.as_str().parse::<FileStatus>(), Ok(status));
        }
    }

    #[test]
    fn transition_updates_timestamp() {
        let mut file = File::new(VersionId::new(), "ext-1.0.xpi", FileStatus::AwaitingReview);
        let before = file.updated_at;
        file.transition_to(FileStatus::Public);
        assert_eq!(file.status, FileStatus::Public);
        assert!(file.updated_at >= before);
    }
}
