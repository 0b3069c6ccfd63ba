use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::{errors::AppResult, models::domain::User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Outbound mail transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> AppResult<()>;
}

/// Transport that hands messages to the logger instead of an SMTP relay.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutboundEmail) -> AppResult<()> {
        log::info!(
            "Mail queued from={} to={} subject={:?} ({} bytes)",
            email.from,
            email.to,
            email.subject,
            email.html_body.len()
        );
        Ok(())
    }
}

/// Welcome message for a freshly registered identity. Never includes the password.
pub fn welcome_email(from: &str, user: &User) -> OutboundEmail {
    OutboundEmail {
        from: from.to_string(),
        to: user.email.clone(),
        subject: "Welcome to EduPortal!".to_string(),
        html_body: format!(
            "<h3>Hello {name},</h3>\
             <p>Your account has been successfully created as <strong>{role}</strong> in EduPortal.</p>\
             <p>You can sign in with <strong>{email}</strong> and the password set during registration.</p>\
             <br><p>EduPortal Team</p>",
            name = user.name,
            role = user.role,
            email = user.email,
        ),
    }
}

/// Sends in the background. Failures are logged and go no further.
pub fn dispatch(mailer: Arc<dyn Mailer>, email: OutboundEmail) -> JoinHandle<()> {
    tokio::spawn(async move {
        let recipient = email.to.clone();
        match mailer.send(email).await {
            Ok(()) => log::info!("Welcome email sent to {}", recipient),
            Err(err) => log::error!("Email send error for {}: {}", recipient, err),
        }
    })
}
