//! Core domain types and traits for the addonctl admin toolchain.

pub mod addon;
pub mod audit;
pub mod config;
pub mod error;
pub mod file;
pub mod ids;
pub mod review;
pub mod signing;
pub mod traits;
pub mod version;

pub use addon::{Addon, AddonStatus};
pub use audit::{AuditAction, AuditLogEntry};
pub use config::{AddonctlConfig, DatabaseConfig, ReviewConfig, SigningConfig};
pub use error::{CoreError, CoreResult};
pub use file::{File, FileStatus};
pub use ids::{AddonId, AuditLogId, FileId, UserId, VersionId};
pub use review::{ReviewCandidate, ReviewType};
pub use signing::{SignRequest, SigningBackend};
pub use traits::{AddonRepository, AuditLogRepository, FileRepository, VersionRepository};
pub use version::Version;
