use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AddonId, VersionId};

/// A released build of an add-on. Owns the downloadable files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    /// Stable version identifier.
    pub version_id: VersionId,
    /// Owning add-on identifier.
    pub addon_id: AddonId,
    /// Version string as declared by the developer (e.g. `"1.2.0"`).
    pub version: String,
    /// Creation timestamp in UTC.
    pub created_at: DateTime<Utc>,
}

impl Version {
    /// Creates a new version owned by the given add-on.
    #[must_use]
    pub fn new(addon_id: AddonId, version: impl Into<String>) -> Self {
        Self {
            version_id: VersionId::new(),
            addon_id,
            version: version.into(),
            created_at: Utc::now(),
        }
    }
}
