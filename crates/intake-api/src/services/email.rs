//! Email channels used by the submission notifier.
//!
//! SES is the default transport; SMTP covers deployments outside AWS.

use async_trait::async_trait;
use aws_sdk_sesv2 as ses;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message as SesMessage};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("SES request failed: {0}")]
    Ses(String),

    #[error("SMTP request failed: {0}")]
    Smtp(String),

    #[error("Invalid email address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Failed to build email: {0}")]
    Build(String),
}

/// A transport able to report its health and deliver HTML mail.
#[async_trait]
pub trait EmailChannel: Send + Sync {
    /// Whether the account is currently allowed to send.
    async fn sending_enabled(&self) -> Result<bool, EmailError>;

    /// Whether `sender` is a verified sending identity.
    async fn sender_verified(&self, sender: &str) -> Result<bool, EmailError>;

    async fn send_html(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        html: &str,
    ) -> Result<(), EmailError>;

    fn name(&self) -> &'static str;
}

/// Amazon SES (v2 API)
#[derive(Clone, Debug)]
pub struct SesEmailChannel {
    client: ses::Client,
}

impl SesEmailChannel {
    pub fn new(client: ses::Client) -> Self {
        Self { client }
    }
}

fn ses_content(data: &str) -> Result<Content, EmailError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| EmailError::Build(e.to_string()))
}

#[async_trait]
impl EmailChannel for SesEmailChannel {
    async fn sending_enabled(&self) -> Result<bool, EmailError> {
        let account = self
            .client
            .get_account()
            .send()
            .await
            .map_err(|e| EmailError::Ses(e.to_string()))?;
        Ok(account.sending_enabled())
    }

    async fn sender_verified(&self, sender: &str) -> Result<bool, EmailError> {
        let identity = self
            .client
            .get_email_identity()
            .email_identity(sender)
            .send()
            .await
            .map_err(|e| EmailError::Ses(e.to_string()))?;
        Ok(identity.verified_for_sending_status())
    }

    async fn send_html(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        html: &str,
    ) -> Result<(), EmailError> {
        let mut destination = Destination::builder().build();
        destination.to_addresses = Some(to.to_vec());

        let message = SesMessage::builder()
            .subject(ses_content(subject)?)
            .body(Body::builder().html(ses_content(html)?).build())
            .build();

        self.client
            .send_email()
            .from_email_address(from)
            .destination(destination)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| EmailError::Ses(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ses"
    }
}

/// SMTP relay settings
#[derive(Clone, Debug)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub tls: bool,
}

/// SMTP relay via lettre. A successful connection test stands in for the
/// account flag; a sender that parses as a mailbox counts as verified.
#[derive(Clone)]
pub struct SmtpEmailChannel {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailChannel {
    pub fn new(settings: &SmtpSettings) -> Result<Self, EmailError> {
        let builder = if settings.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| EmailError::Smtp(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        let builder = builder.port(settings.port);
        let builder = match (&settings.user, &settings.password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        tracing::info!(
            host = %settings.host,
            port = settings.port,
            tls = settings.tls,
            "SMTP email channel initialized"
        );

        Ok(Self {
            mailer: builder.build(),
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address.parse().map_err(|e: lettre::address::AddressError| EmailError::InvalidAddress {
        address: address.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl EmailChannel for SmtpEmailChannel {
    async fn sending_enabled(&self) -> Result<bool, EmailError> {
        self.mailer
            .test_connection()
            .await
            .map_err(|e| EmailError::Smtp(e.to_string()))
    }

    async fn sender_verified(&self, sender: &str) -> Result<bool, EmailError> {
        Ok(parse_mailbox(sender).is_ok())
    }

    async fn send_html(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        html: &str,
    ) -> Result<(), EmailError> {
        let mut builder = Message::builder().from(parse_mailbox(from)?).subject(subject);
        for recipient in to {
            builder = builder.to(parse_mailbox(recipient)?);
        }

        let email = builder
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| EmailError::Smtp(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
