pub mod email;
pub mod intake;
pub mod notifier;

pub use email::{EmailChannel, EmailError, SesEmailChannel, SmtpEmailChannel, SmtpSettings};
pub use intake::{IntakeService, QuoteScope, SubmissionReceipt};
pub use notifier::Notifier;
