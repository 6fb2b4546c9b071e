//! Bulk approval workflow for the `approve-addons` command.

use addonctl_core::{
    AuditAction, AuditLogEntry, AuditLogRepository, CoreResult, FileRepository, FileStatus,
    ReviewCandidate, ReviewType, UserId,
};

/// Comment recorded on every automated approval.
pub const BULK_APPROVAL_COMMENT: &str = "bulk approval";

/// Returns the files awaiting review for the add-ons matching `guids`.
///
/// Unknown guids contribute nothing and incomplete add-ons are excluded by
/// the underlying query; an empty result is not an error.
pub async fn get_files(
    files: &dyn FileRepository,
    guids: &[String],
) -> CoreResult<Vec<ReviewCandidate>> {
    let candidates = files.list_awaiting_review(guids).await?;
    tracing::debug!(
        guids = guids.len(),
        candidates = candidates.len(),
        "resolved files awaiting review"
    );
    Ok(candidates)
}

/// Approves each candidate that carries a review type.
///
/// Candidates paired with `None` are skipped entirely: no status change and
/// no audit entry. Approved files transition to public and one audit entry
/// per file is attributed to the task user. Pairs are processed in input
/// order and the first failure aborts the batch.
///
/// Returns the number of files approved.
pub async fn approve_files(
    files: &dyn FileRepository,
    audit_logs: &dyn AuditLogRepository,
    task_user: UserId,
    pairs: Vec<(ReviewCandidate, Option<ReviewType>)>,
) -> CoreResult<usize> {
    let mut approved = 0;

    for (candidate, review_type) in pairs {
        let Some(review_type) = review_type else {
            tracing::debug!(
                file = %candidate.file.file_id,
                "skipping file that needs no approval"
            );
            continue;
        };

        let mut file = candidate.file;
        file.transition_to(FileStatus::Public);
        files.update(&file).await?;

        let entry = AuditLogEntry::new(candidate.addon.addon_id, task_user, AuditAction::Approve)
            .with_file(file.file_id)
            .with_comments(BULK_APPROVAL_COMMENT);
        audit_logs.create(&entry).await?;

        tracing::info!(
            addon = %candidate.addon.guid,
            file = %file.file_id,
            review_type = review_type.as_str(),
            "approved file"
        );
        approved += 1;
    }

    Ok(approved)
}
