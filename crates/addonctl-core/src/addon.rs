use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ids::AddonId;

/// Review lifecycle status of an add-on listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddonStatus {
    /// Listing is missing required pieces and cannot enter review.
    Incomplete,
    /// Developer nominated the add-on for its first full review.
    Nominated,
    /// Listing is queued for review without a nomination.
    AwaitingReview,
    /// Add-on is approved and publicly listed.
    Public,
    /// Add-on has been disabled by an admin or the developer.
    Disabled,
}

impl AddonStatus {
    /// Returns the canonical kebab-case string stored in SQLite.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Nominated => "nominated",
            Self::AwaitingReview => "awaiting-review",
            Self::Public => "public",
            Self::Disabled => "disabled",
        }
    }

    /// Returns `true` when approving one of this add-on's files counts as a
    /// full review (initial for nominated listings, update for public ones).
    #[must_use]
    pub const fn is_review_candidate(&self) -> bool {
        matches!(self, Self::Nominated | Self::Public)
    }
}

impl Default for AddonStatus {
    fn default() -> Self {
        Self::Incomplete
    }
}

impl FromStr for AddonStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incomplete" => Ok(Self::Incomplete),
            "nominated" => Ok(Self::Nominated),
            "awaiting-review" => Ok(Self::AwaitingReview),
            "public" => Ok(Self::Public),
            "disabled" => Ok(Self::Disabled),
            _ => Err(()),
        }
    }
}

/// An add-on listing tracked by the metadata store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Addon {
    /// Stable add-on identifier.
    pub addon_id: AddonId,
    /// Globally unique external identifier declared in the package manifest.
    pub guid: String,
    /// Human-readable add-on name.
    pub name: String,
    /// Review lifecycle status of the listing.
    pub status: AddonStatus,
    /// Creation timestamp in UTC.
    pub created_at: DateTime<Utc>,
    /// Update timestamp in UTC.
    pub updated_at: DateTime<Utc>,
}

impl Addon {
    /// Creates a new add-on in the given status.
    #[must_use]
    pub fn new(guid: impl Into<String>, name: impl Into<String>, status: AddonStatus) -> Self {
        let now = Utc::now();
        Self {
            addon_id: AddonId::new(),
            guid: guid.into(),
            name: name.into(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the add-on status and updates the modification timestamp.
    pub fn transition_to(&mut self, status: AddonStatus) {
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
            AddonStatus::Incomplete,
            AddonStatus::Nominated,
            AddonStatus::AwaitingReview,
            AddonStatus::Public,
            AddonStatus::Disabled,
        ] {
            assert_eq!(status.as_str().parse::<AddonStatus>(), Ok(status));
        }
    }

    #[test]
    fn review_candidates_are_nominated_and_public() {
        assert!(AddonStatus::Nominated.is_review_candidate());
        assert!(AddonStatus::Public.is_review_candidate());
        assert!(!AddonStatus::Incomplete.is_review_candidate());
        assert!(!AddonStatus::AwaitingReview.is_review_candidate());
        assert!(!AddonStatus::Disabled.is_review_candidate());
    }
}
