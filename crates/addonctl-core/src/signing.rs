//! Signing backend interface.
//!
//! The signing service itself is external; this crate only dispatches to it.
//! The backend is an explicit trait so tests can substitute a recording
//! implementation instead of patching globals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::ids::AddonId;

/// Resolved options passed through to the signing backend unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignRequest {
    /// Alternate signing service URL. `None` means the backend uses its own
    /// configured default.
    pub endpoint: Option<String>,
    /// Re-sign packages even when they are already signed.
    pub force: bool,
    /// Free-text audit string recorded alongside the signing run.
    pub reason: Option<String>,
}

/// External signing service invoked with a batch of add-on identifiers.
///
/// Failure semantics are the backend's own: errors propagate unchanged and
/// no retry or interpretation happens on this side.
#[async_trait]
pub trait SigningBackend: Send + Sync {
    /// Signs the latest packages of the given add-ons.
    async fn sign_addons(&self, ids: &[AddonId], request: &SignRequest) -> CoreResult<()>;
}
