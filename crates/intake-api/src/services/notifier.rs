//! Submission notification email
//!
//! Best-effort: an unhealthy channel or a failed send is logged and reported
//! as `false`, never as an error.

use crate::services::email::EmailChannel;
use intake_core::{Submission, UploadResult};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct Notifier {
    channel: Option<Arc<dyn EmailChannel>>,
    from: String,
    to: Vec<String>,
    subject: String,
}

impl Notifier {
    pub fn new(
        channel: Arc<dyn EmailChannel>,
        from: impl Into<String>,
        to: Vec<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            channel: Some(channel),
            from: from.into(),
            to,
            subject: subject.into(),
        }
    }

    /// A notifier that never sends.
    pub fn disabled() -> Self {
        Self {
            channel: None,
            from: String::new(),
            to: Vec::new(),
            subject: String::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.channel.is_some()
    }

    /// Send the submission summary. Returns whether an email went out.
    pub async fn notify(
        &self,
        submission: &Submission,
        uploads: &BTreeMap<String, UploadResult>,
    ) -> bool {
        let Some(channel) = &self.channel else {
            tracing::debug!(submission_id = %submission.submission_id, "Email notifications disabled");
            return false;
        };

        if !self.channel_ready(channel.as_ref()).await {
            return false;
        }

        let subject = format!("{} - {}", self.subject, submission.submission_id);
        let html = render_html(&self.subject, submission, uploads);

        match channel.send_html(&self.from, &self.to, &subject, &html).await {
            Ok(()) => {
                tracing::info!(
                    submission_id = %submission.submission_id,
                    channel = channel.name(),
                    recipients = self.to.len(),
                    "Submission notification sent"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    submission_id = %submission.submission_id,
                    channel = channel.name(),
                    "Submission notification failed"
                );
                false
            }
        }
    }

    /// Account sending flag and sender verification must both hold.
    async fn channel_ready(&self, channel: &dyn EmailChannel) -> bool {
        let enabled = match channel.sending_enabled().await {
            Ok(enabled) => enabled,
            Err(e) => {
                tracing::warn!(error = %e, channel = channel.name(), "Email channel check failed");
                return false;
            }
        };
        if !enabled {
            tracing::warn!(channel = channel.name(), "Email sending is disabled for the account");
            return false;
        }

        match channel.sender_verified(&self.from).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(sender = %self.from, channel = channel.name(), "Email sender is not verified");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, channel = channel.name(), "Email sender check failed");
                false
            }
        }
    }
}

/// HTML summary of a submission.
pub fn render_html(
    title: &str,
    submission: &Submission,
    uploads: &BTreeMap<String, UploadResult>,
) -> String {
    let fields: String = submission
        .string_fields()
        .iter()
        .map(|(key, value)| format!("<li>{}: {}</li>", escape_html(key), escape_html(value)))
        .collect();

    let files = if uploads.is_empty() {
        "<p>No files uploaded.</p>".to_string()
    } else {
        let items: String = uploads
            .values()
            .map(|upload| {
                format!(
                    "<li>{} ({} bytes)</li>",
                    escape_html(&upload.filename),
                    upload.size
                )
            })
            .collect();
        format!("<ul>{}</ul>", items)
    };

    format!(
        "<html><body>\n\
         <h2>{title}</h2>\n\
         <p><strong>Submission ID:</strong> {id}</p>\n\
         <p><strong>Submission Date:</strong> {date}</p>\n\
         <p><strong>TPA ID:</strong> {tpa}</p>\n\
         <p><strong>Broker ID:</strong> {broker}</p>\n\
         <p><strong>Employer ID:</strong> {employer}</p>\n\
         <h3>Fields</h3><ul>{fields}</ul>\n\
         <h3>Files</h3>{files}\n\
         </body></html>",
        title = escape_html(title),
        id = escape_html(&submission.submission_id),
        date = escape_html(&submission.submission_date),
        tpa = escape_html(&submission.tpa_id),
        broker = escape_html(&submission.broker_id),
        employer = escape_html(&submission.employer_id),
        fields = fields,
        files = files,
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
