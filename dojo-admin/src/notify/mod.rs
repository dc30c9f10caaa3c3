//! Outbound notification collaborator
//!
//! The verification and welcome emails are best-effort: sends run on a
//! spawned task and a relay failure is logged, never propagated to the
//! request that queued it.

pub mod mailer;
pub mod templates;

pub use mailer::Mailer;
pub use templates::Message;

use tracing::{info, warn};

#[derive(Clone)]
pub struct Notifier {
    mailer: Mailer,
}

impl Notifier {
    pub fn new(mailer: Mailer) -> Self {
        Self { mailer }
    }

    /// Queue a message for asynchronous delivery.
    pub fn queue(&self, to: String, message: Message) {
        let mailer = self.mailer.clone();
        tokio::spawn(async move {
            match mailer.send(&to, &message).await {
                Ok(()) => info!("Sent '{}' to {}", message.subject, to),
                Err(e) => warn!("Failed to send '{}' to {}: {}", message.subject, to, e),
            }
        });
    }
}
