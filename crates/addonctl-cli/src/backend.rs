//! HTTP implementation of the signing backend.

use async_trait::async_trait;
use serde_json::json;

use addonctl_core::{AddonId, CoreError, CoreResult, SignRequest, SigningBackend};

/// Signing backend that POSTs signing requests to an HTTP signing service.
pub struct HttpSigningBackend {
    client: reqwest::Client,
    default_endpoint: Option<String>,
}

impl HttpSigningBackend {
    /// Creates a backend with an optional default endpoint, used when a
    /// request carries no endpoint override.
    #[must_use]
    pub fn new(default_endpoint: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            default_endpoint,
        }
    }
}

#[async_trait]
impl SigningBackend for HttpSigningBackend {
    async fn sign_addons(&self, ids: &[AddonId], request: &SignRequest) -> CoreResult<()> {
        let endpoint = request
            .endpoint
            .as_deref()
            .or(self.default_endpoint.as_deref())
            .ok_or_else(|| CoreError::invalid_state("no signing server configured"))?;

        let payload = json!({
            "addon_ids": ids,
            "force": request.force,
            "reason": request.reason,
        });

        let response = self
            .client
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CoreError::signing(e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| CoreError::signing(e.to_string()))?;

        Ok(())
    }
}
