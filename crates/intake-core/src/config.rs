//! Configuration module
//!
//! Settings are read once at startup from the process environment (after
//! loading an optional `.env` file) and shared read-only afterwards.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_BODY_SIZE_MB: usize = 10;
const SMTP_PORT: u16 = 587;
const S3_BUCKET: &str = "quote-intake-documents";
const SES_REGION: &str = "us-east-2";
const EMAIL_SUBJECT: &str = "New Quote Submission Received";

/// API key accepted when `API_KEY` is not set. Rejected at startup in production.
pub const DEVELOPMENT_API_KEY: &str = "dev-intake-api-key";

/// Email transport used by the notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailProvider {
    Ses,
    Smtp,
}

impl FromStr for EmailProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ses" => Ok(EmailProvider::Ses),
            "smtp" => Ok(EmailProvider::Smtp),
            _ => Err(anyhow::anyhow!("Invalid email provider: {}", s)),
        }
    }
}

impl Display for EmailProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            EmailProvider::Ses => write!(f, "ses"),
            EmailProvider::Smtp => write!(f, "smtp"),
        }
    }
}

/// Process-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub max_body_size_bytes: usize,
    pub log_format: String,
}

/// Intake service configuration
#[derive(Clone, Debug)]
pub struct IntakeConfig {
    pub base: BaseConfig,
    pub api_key: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: String,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Email notifications
    pub email_enabled: bool,
    pub email_provider: EmailProvider,
    pub email_from: Option<String>,
    pub email_to: Vec<String>,
    pub email_subject: String,
    pub ses_region: String,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_tls: bool,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<IntakeConfig>);

impl Config {
    fn inner(&self) -> &IntakeConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = IntakeConfig::from_vars(lookup)?;
        Ok(Config(Box::new(config)))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.inner().base.max_body_size_bytes
    }

    pub fn log_format(&self) -> &str {
        &self.inner().base.log_format
    }

    pub fn api_key(&self) -> &str {
        &self.inner().api_key
    }

    pub fn uses_development_api_key(&self) -> bool {
        self.inner().api_key == DEVELOPMENT_API_KEY
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> &str {
        &self.inner().s3_bucket
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.inner().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn email_enabled(&self) -> bool {
        self.inner().email_enabled
    }

    pub fn email_provider(&self) -> EmailProvider {
        self.inner().email_provider
    }

    pub fn email_from(&self) -> Option<&str> {
        self.inner().email_from.as_deref()
    }

    pub fn email_to(&self) -> &[String] {
        &self.inner().email_to
    }

    pub fn email_subject(&self) -> &str {
        &self.inner().email_subject
    }

    pub fn ses_region(&self) -> &str {
        &self.inner().ses_region
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.inner().smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> u16 {
        self.inner().smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.inner().smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.inner().smtp_password.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.inner().smtp_tls
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v.trim().to_lowercase())
        .and_then(|v| match v.as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn parse_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl IntakeConfig {
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_port: match lookup("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            environment,
            max_body_size_bytes: lookup("MAX_BODY_SIZE_MB")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(MAX_BODY_SIZE_MB)
                * 1024
                * 1024,
            log_format: lookup("LOG_FORMAT")
                .map(|s| s.to_lowercase())
                .unwrap_or_else(|| "compact".to_string()),
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };

        let email_provider = match lookup("EMAIL_PROVIDER") {
            Some(value) => value.parse()?,
            None => EmailProvider::Ses,
        };

        Ok(IntakeConfig {
            base,
            api_key: non_empty(lookup("API_KEY")).unwrap_or_else(|| DEVELOPMENT_API_KEY.to_string()),
            storage_backend,
            s3_bucket: non_empty(lookup("S3_BUCKET")).unwrap_or_else(|| S3_BUCKET.to_string()),
            s3_region: non_empty(lookup("S3_REGION")),
            s3_endpoint: non_empty(lookup("S3_ENDPOINT")),
            aws_region: non_empty(lookup("AWS_REGION")),
            local_storage_path: non_empty(lookup("LOCAL_STORAGE_PATH")),
            local_storage_base_url: non_empty(lookup("LOCAL_STORAGE_BASE_URL")),
            email_enabled: parse_bool(lookup("EMAIL_ENABLED"), true),
            email_provider,
            email_from: non_empty(lookup("EMAIL_FROM")),
            email_to: parse_list(lookup("EMAIL_TO")),
            email_subject: non_empty(lookup("EMAIL_SUBJECT"))
                .unwrap_or_else(|| EMAIL_SUBJECT.to_string()),
            ses_region: non_empty(lookup("SES_REGION")).unwrap_or_else(|| SES_REGION.to_string()),
            smtp_host: non_empty(lookup("SMTP_HOST")),
            smtp_port: lookup("SMTP_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(SMTP_PORT),
            smtp_user: non_empty(lookup("SMTP_USER")),
            smtp_password: non_empty(lookup("SMTP_PASSWORD")),
            smtp_tls: parse_bool(lookup("SMTP_TLS"), true),
        })
    }
}
