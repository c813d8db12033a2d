//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use intake_core::{Config, EmailProvider, StorageBackend};

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.is_production() && config.uses_development_api_key() {
        return Err(anyhow::anyhow!(
            "API_KEY must be set in production; the development key is not accepted"
        ));
    }

    if config.max_body_size_bytes() == 0 {
        return Err(anyhow::anyhow!("MAX_BODY_SIZE_MB cannot be 0"));
    }

    match config.storage_backend() {
        StorageBackend::S3 => {
            if config.s3_bucket().trim().is_empty() {
                return Err(anyhow::anyhow!("S3_BUCKET must be set when using S3 storage"));
            }
        }
        StorageBackend::Local => {
            if config.local_storage_path().is_none() || config.local_storage_base_url().is_none() {
                return Err(anyhow::anyhow!(
                    "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL must be set when using local storage"
                ));
            }
        }
    }

    if config.email_enabled() {
        if config.email_from().is_none() || config.email_to().is_empty() {
            tracing::warn!("EMAIL_FROM or EMAIL_TO not set - submission emails will not be sent");
        }
        if config.email_provider() == EmailProvider::Smtp && config.smtp_host().is_none() {
            tracing::warn!("SMTP_HOST not set - submission emails will not be sent");
        }
    }

    Ok(())
}
