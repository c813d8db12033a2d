use async_trait::async_trait;
use intake_api::services::{EmailChannel, EmailError};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Email channel with scripted health answers that records what it sends.
pub struct ScriptedEmailChannel {
    pub sending_enabled: bool,
    pub sender_verified: bool,
    pub fail_send: bool,
    sent: Mutex<Vec<SentEmail>>,
}

impl ScriptedEmailChannel {
    pub fn healthy() -> Self {
        Self {
            sending_enabled: true,
            sender_verified: true,
            fail_send: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn unverified() -> Self {
        Self {
            sender_verified: false,
            ..Self::healthy()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_send: true,
            ..Self::healthy()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailChannel for ScriptedEmailChannel {
    async fn sending_enabled(&self) -> Result<bool, EmailError> {
        Ok(self.sending_enabled)
    }

    async fn sender_verified(&self, _sender: &str) -> Result<bool, EmailError> {
        Ok(self.sender_verified)
    }

    async fn send_html(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        html: &str,
    ) -> Result<(), EmailError> {
        if self.fail_send {
            return Err(EmailError::Ses("MessageRejected".to_string()));
        }
        self.sent.lock().unwrap().push(SentEmail {
            from: from.to_string(),
            to: to.to_vec(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
