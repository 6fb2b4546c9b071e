//! Signing dispatch for the `sign-addons` command.

use addonctl_core::{AddonId, CoreError, CoreResult, SignRequest, SigningBackend};

/// Options accepted by the `sign-addons` command before resolution.
#[derive(Debug, Clone, Default)]
pub struct SignOptions {
    /// Alternate signing service URL for this invocation.
    pub signing_server: Option<String>,
    /// Re-sign packages even when they are already signed.
    pub force: bool,
    /// Free-text audit string recorded alongside the signing run.
    pub reason: Option<String>,
}

/// Resolves command options against the configured default signing server.
///
/// An explicit `--signing-server` wins over the configured default; with
/// neither, the endpoint stays unset and the backend uses its own default.
#[must_use]
pub fn resolve_request(options: &SignOptions, default_server: Option<&str>) -> SignRequest {
    SignRequest {
        endpoint: options
            .signing_server
            .clone()
            .or_else(|| default_server.map(str::to_owned)),
        force: options.force,
        reason: options.reason.clone(),
    }
}

/// Dispatches a signing run for the given add-ons.
///
/// Pure delegation: identifiers and resolved options pass through to the
/// backend unchanged and backend failures propagate without retry.
pub async fn sign_addons(
    backend: &dyn SigningBackend,
    ids: &[AddonId],
    request: &SignRequest,
) -> CoreResult<()> {
    if ids.is_empty() {
        return Err(CoreError::invalid_state(
            "sign-addons requires at least one add-on id",
        ));
    }

    tracing::info!(
        count = ids.len(),
        force = request.force,
        endpoint = request.endpoint.as_deref().unwrap_or("<backend default>"),
        "dispatching signing run"
    );
    backend.sign_addons(ids, request).await
}
