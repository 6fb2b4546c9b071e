//! Review classification for files awaiting approval.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::addon::Addon;
use crate::file::{File, FileStatus};

/// Kind of review that approving a file represents.
///
/// Approving a file of a nominated add-on is an initial full review and
/// approving one of an already-public add-on is an update full review; both
/// are recorded under the single `full` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    /// Full review (initial or update).
    Full,
}

impl ReviewType {
    /// Returns the canonical lowercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
        }
    }
}

impl FromStr for ReviewType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            _ => Err(()),
        }
    }
}

/// A file paired with its owning add-on, as returned by the eligibility
/// query. The add-on status drives the review classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCandidate {
    pub file: File,
    pub addon: Addon,
}

impl ReviewCandidate {
    /// Classifies the review an approval of this file would represent.
    ///
    /// Returns `None` when the file needs no approval action (it is not
    /// awaiting review) or when the owning add-on is not a review candidate.
    #[must_use]
    pub fn review_type(&self) -> Option<ReviewType> {
        if self.file.status != FileStatus::AwaitingReview {
            return None;
        }
        if self.addon.status.is_review_candidate() {
            Some(ReviewType::Full)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::AddonStatus;
    use crate::ids::VersionId;

    fn candidate(addon_status: AddonStatus, file_status: FileStatus) -> ReviewCandidate {
        let addon = Addon::new("{ext@example.com}", "Example", addon_status);
        let file = File::new(VersionId::new(), "example-1.0.xpi", file_status);
        ReviewCandidate { addon, file }
    }

    #[test]
    fn nominated_awaiting_review_is_full() {
        let c = candidate(AddonStatus::Nominated, FileStatus::AwaitingReview);
        assert_eq!(c.review_type(), Some(ReviewType::Full));
    }

    #[test]
    fn public_addon_with_awaiting_file_is_full() {
        let c = candidate(AddonStatus::Public, FileStatus::AwaitingReview);
        assert_eq!(c.review_type(), Some(ReviewType::Full));
    }

    #[test]
    fn already_public_file_needs_no_review() {
        let c = candidate(AddonStatus::Public, FileStatus::Public);
        assert_eq!(c.review_type(), None);
    }

    #[test]
    fn incomplete_addon_never_classifies() {
        let c = candidate(AddonStatus::Incomplete, FileStatus::AwaitingReview);
        assert_eq!(c.review_type(), None);
    }
}
