//! Notification channel setup
//!
//! Missing email settings disable notifications instead of failing startup.

use crate::services::{
    EmailChannel, Notifier, SesEmailChannel, SmtpEmailChannel, SmtpSettings,
};
use intake_core::{Config, EmailProvider};
use std::sync::Arc;

pub async fn setup_notifier(config: &Config) -> Notifier {
    if !config.email_enabled() {
        tracing::info!("Email notifications disabled (EMAIL_ENABLED=false)");
        return Notifier::disabled();
    }

    let Some(from) = config.email_from() else {
        tracing::warn!("EMAIL_FROM not set, email notifications disabled");
        return Notifier::disabled();
    };
    if config.email_to().is_empty() {
        tracing::warn!("EMAIL_TO not set, email notifications disabled");
        return Notifier::disabled();
    }

    let channel: Arc<dyn EmailChannel> = match config.email_provider() {
        EmailProvider::Ses => {
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.ses_region().to_string()))
                .load()
                .await;
            tracing::info!(region = %config.ses_region(), "SES email channel initialized");
            Arc::new(SesEmailChannel::new(aws_sdk_sesv2::Client::new(&aws_config)))
        }
        EmailProvider::Smtp => {
            let Some(host) = config.smtp_host() else {
                tracing::warn!("SMTP_HOST not set, email notifications disabled");
                return Notifier::disabled();
            };
            let settings = SmtpSettings {
                host: host.to_string(),
                port: config.smtp_port(),
                user: config.smtp_user().map(String::from),
                password: config.smtp_password().map(String::from),
                tls: config.smtp_tls(),
            };
            match SmtpEmailChannel::new(&settings) {
                Ok(channel) => Arc::new(channel),
                Err(e) => {
                    tracing::warn!(error = %e, "SMTP setup failed, email notifications disabled");
                    return Notifier::disabled();
                }
            }
        }
    };

    Notifier::new(
        channel,
        from,
        config.email_to().to_vec(),
        config.email_subject(),
    )
}
