//! Workflow logic behind the `addonctl` admin commands.
//!
//! Kept as a library so the signing dispatch and bulk approval paths can be
//! driven directly from tests with injected repositories and backends.

pub mod approve;
pub mod backend;
pub mod sign;
