//! Configuration for the addonctl toolchain.
//!
//! Supports file sources, `ADDONCTL`-prefixed environment overrides, and
//! defaults, with validation after loading.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::UserId;

/// Root configuration structure for addonctl.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AddonctlConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub signing: SigningConfig,

    #[serde(default)]
    pub review: ReviewConfig,
}

/// Metadata store settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite database URL (e.g. `sqlite:///var/lib/addonctl/metadata.db`).
    pub url: String,
}

/// Signing dispatch settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SigningConfig {
    /// Default signing service URL. Unset means the backend decides; the
    /// `--signing-server` CLI flag overrides it per invocation.
    #[serde(default)]
    pub server: Option<String>,
}

/// Bulk review settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReviewConfig {
    /// Service account that automated approvals are attributed to.
    #[serde(default)]
    pub task_user_id: Option<Uuid>,
}

impl AddonctlConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file specified by ADDONCTL_CONFIG env var
    /// 3. ./config/addonctl.yaml
    /// 4. /etc/addonctl/addonctl.yaml
    /// 5. Hardcoded defaults (lowest priority)
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("database.url", "sqlite://addonctl.db")?;

        if let Ok(config_path) = std::env::var("ADDONCTL_CONFIG") {
            builder = builder.add_source(File::with_name(&config_path).required(false));
        }

        builder = builder
            .add_source(File::with_name("./config/addonctl").required(false))
            .add_source(File::with_name("/etc/addonctl/addonctl").required(false));

        // Example override: ADDONCTL_SIGNING__SERVER=https://signer.internal
        builder = builder.add_source(
            Environment::with_prefix("ADDONCTL")
                .separator("__")
                .try_parsing(true),
        );

        let config: AddonctlConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.is_empty() {
            return Err(ConfigError::Message(
                "database.url must not be empty".to_string(),
            ));
        }

        if let Some(server) = &self.signing.server {
            if !server.starts_with("http://") && !server.starts_with("https://") {
                return Err(ConfigError::Message(
                    "signing.server must be an http(s) URL".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Returns the configured task user, if any.
    #[must_use]
    pub fn task_user(&self) -> Option<UserId> {
        self.review.task_user_id.map(UserId::from_uuid)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://addonctl.db".to_string(),
        }
    }
}
