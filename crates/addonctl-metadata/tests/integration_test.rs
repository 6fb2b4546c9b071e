use std::path::PathBuf;

use addonctl_core::{
    Addon, AddonRepository, AddonStatus, AuditAction, AuditLogEntry, AuditLogRepository,
    CoreError, File, FileRepository, FileStatus, UserId, Version, VersionRepository,
};
use addonctl_metadata::{
    create_sqlite_pool, run_migrations, SqliteAddonRepository, SqliteAuditLogRepository,
    SqliteFileRepository, SqliteVersionRepository,
};
use uuid::Uuid;

struct TestContext {
    addons: SqliteAddonRepository,
    versions: SqliteVersionRepository,
    files: SqliteFileRepository,
    audit_logs: SqliteAuditLogRepository,
}

async fn setup_context() -> TestContext {
    let db_path = temp_db_path();
    let database_url = format!("sqlite://{}", db_path.display());
    let pool = create_sqlite_pool(&database_url)
        .await
        .expect("failed to create pool");
    run_migrations(&pool).await.expect("failed migrations");

    TestContext {
        addons: SqliteAddonRepository::new(pool.clone()),
        versions: SqliteVersionRepository::new(pool.clone()),
        files: SqliteFileRepository::new(pool.clone()),
        audit_logs: SqliteAuditLogRepository::new(pool),
    }
}

fn temp_db_path() -> PathBuf {
    let filename = format!("addonctl-metadata-test-{}.db", Uuid::now_v7());
    std::env::temp_dir().join(filename)
}

/// Creates an add-on with one version and one awaiting-review file.
async fn addon_with_file(
    ctx: &TestContext,
    guid: &str,
    addon_status: AddonStatus,
    file_status: FileStatus,
) -> (Addon, Version, File) {
    let addon = Addon::new(guid, format!("Addon {guid}"), addon_status);
    ctx.addons.create(&addon).await.expect("create addon");

    let version = Version::new(addon.addon_id, "1.0");
    ctx.versions.create(&version).await.expect("create version");

    let file = File::new(version.version_id, format!("{guid}-1.0.xpi"), file_status);
    ctx.files.create(&file).await.expect("create file");

    (addon, version, file)
}

#[tokio::test]
async fn create_and_fetch_addon() {
    let ctx = setup_context().await;
    let addon = Addon::new("ext@example.com", "Example", AddonStatus::Nominated);
    ctx.addons.create(&addon).await.expect("create addon");

    let fetched = ctx
        .addons
        .get(addon.addon_id)
        .await
        .expect("get addon")
        .expect("addon present");
    assert_eq!(fetched.guid, "ext@example.com");
    assert_eq!(fetched.status, AddonStatus::Nominated);
}

#[tokio::test]
async fn fetch_addon_by_guid() {
    let ctx = setup_context().await;
    let addon = Addon::new("guid@example.com", "By Guid", AddonStatus::Public);
    ctx.addons.create(&addon).await.expect("create addon");

    let fetched = ctx
        .addons
        .get_by_guid("guid@example.com")
        .await
        .expect("get by guid")
        .expect("addon present");
    assert_eq!(fetched.addon_id, addon.addon_id);

    let missing = ctx
        .addons
        .get_by_guid("nope@example.com")
        .await
        .expect("lookup");
    assert!(missing.is_none());
}

#[tokio::test]
async fn enforce_unique_guid_constraint() {
    let ctx = setup_context().await;
    let first = Addon::new("dup@example.com", "First", AddonStatus::Public);
    let second = Addon::new("dup@example.com", "Second", AddonStatus::Public);

    ctx.addons.create(&first).await.expect("first insert");
    let err = ctx
        .addons
        .create(&second)
        .await
        .expect_err("duplicate guid");
    assert!(matches!(err, CoreError::AlreadyExists { .. }));
}

#[tokio::test]
async fn update_addon_status() {
    let ctx = setup_context().await;
    let mut addon = Addon::new("status@example.com", "Status", AddonStatus::Nominated);
    ctx.addons.create(&addon).await.expect("create addon");

    addon.transition_to(AddonStatus::Public);
    ctx.addons.update(&addon).await.expect("update addon");

    let updated = ctx
        .addons
        .get(addon.addon_id)
        .await
        .expect("fetch addon")
        .expect("addon exists");
    assert_eq!(updated.status, AddonStatus::Public);
}

#[tokio::test]
async fn list_versions_and_files() {
    let ctx = setup_context().await;
    let (addon, version, file) = addon_with_file(
        &ctx,
        "tree@example.com",
        AddonStatus::Public,
        FileStatus::Public,
    )
    .await;

    let versions = ctx
        .versions
        .list_by_addon(addon.addon_id)
        .await
        .expect("list versions");
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version_id, version.version_id);

    let files = ctx
        .files
        .list_by_version(version.version_id)
        .await
        .expect("list files");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_id, file.file_id);
    assert!(!files[0].is_signed);
}

#[tokio::test]
async fn persist_file_status_transition() {
    let ctx = setup_context().await;
    let (_, _, mut file) = addon_with_file(
        &ctx,
        "transition@example.com",
        AddonStatus::Nominated,
        FileStatus::AwaitingReview,
    )
    .await;

    file.transition_to(FileStatus::Public);
    ctx.files.update(&file).await.expect("update file");

    let fetched = ctx
        .files
        .get(file.file_id)
        .await
        .expect("get file")
        .expect("file present");
    assert_eq!(fetched.status, FileStatus::Public);
}

#[tokio::test]
async fn awaiting_review_excludes_incomplete_addons() {
    let ctx = setup_context().await;
    addon_with_file(
        &ctx,
        "incomplete@example.com",
        AddonStatus::Incomplete,
        FileStatus::AwaitingReview,
    )
    .await;

    let candidates = ctx
        .files
        .list_awaiting_review(&["incomplete@example.com".to_string()])
        .await
        .expect("eligibility query");
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn awaiting_review_excludes_other_guids() {
    let ctx = setup_context().await;
    let (_, _, foo_file) = addon_with_file(
        &ctx,
        "foo@example.com",
        AddonStatus::Nominated,
        FileStatus::AwaitingReview,
    )
    .await;
    addon_with_file(
        &ctx,
        "bar@example.com",
        AddonStatus::Nominated,
        FileStatus::AwaitingReview,
    )
    .await;

    let candidates = ctx
        .files
        .list_awaiting_review(&["foo@example.com".to_string()])
        .await
        .expect("eligibility query");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].file.file_id, foo_file.file_id);
    assert_eq!(candidates[0].addon.guid, "foo@example.com");
}

#[tokio::test]
async fn awaiting_review_returns_files_in_creation_order() {
    let ctx = setup_context().await;
    let (_, version, first) = addon_with_file(
        &ctx,
        "ordered@example.com",
        AddonStatus::Nominated,
        FileStatus::AwaitingReview,
    )
    .await;
    let second = File::new(
        version.version_id,
        "ordered-1.0-linux.xpi",
        FileStatus::AwaitingReview,
    );
    ctx.files.create(&second).await.expect("second file");

    let candidates = ctx
        .files
        .list_awaiting_review(&["ordered@example.com".to_string()])
        .await
        .expect("eligibility query");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].file.file_id, first.file_id);
    assert_eq!(candidates[1].file.file_id, second.file_id);
}

#[tokio::test]
async fn awaiting_review_skips_public_files() {
    let ctx = setup_context().await;
    addon_with_file(
        &ctx,
        "published@example.com",
        AddonStatus::Public,
        FileStatus::Public,
    )
    .await;

    let candidates = ctx
        .files
        .list_awaiting_review(&["published@example.com".to_string()])
        .await
        .expect("eligibility query");
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn record_and_list_audit_entries() {
    let ctx = setup_context().await;
    let (addon, _, file) = addon_with_file(
        &ctx,
        "audited@example.com",
        AddonStatus::Nominated,
        FileStatus::AwaitingReview,
    )
    .await;

    let reviewer = UserId::new();
    let entry = AuditLogEntry::new(addon.addon_id, reviewer, AuditAction::Approve)
        .with_file(file.file_id)
        .with_comments("bulk approval");
    ctx.audit_logs.create(&entry).await.expect("create entry");

    let entries = ctx
        .audit_logs
        .list_by_addon(addon.addon_id)
        .await
        .expect("list entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, reviewer);
    assert_eq!(entries[0].file_id, Some(file.file_id));
    assert_eq!(entries[0].action, AuditAction::Approve);
    assert_eq!(entries[0].comments.as_deref(), Some("bulk approval"));
}
