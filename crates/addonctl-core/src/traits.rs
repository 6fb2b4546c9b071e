use async_trait::async_trait;

use crate::addon::Addon;
use crate::audit::AuditLogEntry;
use crate::error::CoreResult;
use crate::file::File;
use crate::ids::{AddonId, FileId, VersionId};
use crate::review::ReviewCandidate;
use crate::version::Version;

/// Repository interface for add-on listings.
#[async_trait]
pub trait AddonRepository: Send + Sync {
    /// Persists a newly created add-on.
    async fn create(&self, addon: &Addon) -> CoreResult<()>;

    /// Fetches an add-on by its identifier.
    async fn get(&self, addon_id: AddonId) -> CoreResult<Option<Addon>>;

    /// Fetches an add-on by its external guid.
    async fn get_by_guid(&self, guid: &str) -> CoreResult<Option<Addon>>;

    /// Updates an existing add-on.
    async fn update(&self, addon: &Addon) -> CoreResult<()>;

    /// Returns all add-ons ordered by creation time.
    async fn list(&self) -> CoreResult<Vec<Addon>>;
}

/// Repository interface for add-on versions.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Persists a newly created version.
    async fn create(&self, version: &Version) -> CoreResult<()>;

    /// Fetches a version by its identifier.
    async fn get(&self, version_id: VersionId) -> CoreResult<Option<Version>>;

    /// Lists all versions of an add-on ordered by creation time.
    async fn list_by_addon(&self, addon_id: AddonId) -> CoreResult<Vec<Version>>;
}

/// Repository interface for downloadable files.
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Persists a newly created file.
    async fn create(&self, file: &File) -> CoreResult<()>;

    /// Fetches a file by its identifier.
    async fn get(&self, file_id: FileId) -> CoreResult<Option<File>>;

    /// Updates an existing file.
    async fn update(&self, file: &File) -> CoreResult<()>;

    /// Lists all files of a version ordered by creation time.
    async fn list_by_version(&self, version_id: VersionId) -> CoreResult<Vec<File>>;

    /// Returns files awaiting review that belong to add-ons matching the
    /// given guids, paired with their owning add-on.
    ///
    /// Incomplete add-ons contribute no files and unknown guids contribute an
    /// empty result rather than an error. Ordering follows creation time.
    async fn list_awaiting_review(&self, guids: &[String]) -> CoreResult<Vec<ReviewCandidate>>;
}

/// Repository interface for audit log entries.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Creates a new audit log entry.
    async fn create(&self, entry: &AuditLogEntry) -> CoreResult<()>;

    /// Lists audit logs recorded against an add-on ordered by creation time.
    async fn list_by_addon(&self, addon_id: AddonId) -> CoreResult<Vec<AuditLogEntry>>;
}
