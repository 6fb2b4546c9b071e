//! SQLite metadata adapters for the addonctl admin toolchain.

mod addon_repository;
mod audit_repository;
mod file_repository;
mod util;
mod version_repository;

pub use addon_repository::SqliteAddonRepository;
pub use audit_repository::SqliteAuditLogRepository;
pub use file_repository::SqliteFileRepository;
pub use util::{create_sqlite_pool, run_migrations};
pub use version_repository::SqliteVersionRepository;

/// Embedded SQL migrations for the metadata database.
pub const MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
