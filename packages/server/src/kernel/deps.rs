//! Server dependencies (using traits for testability).
//!
//! The central dependency container shared by resolvers and background
//! tasks. External services sit behind trait objects so tests can swap
//! them out.

use anyhow::Result;
use async_trait::async_trait;
use mailer::models::EmailMessage;
use mailer::MailerService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::pending_review::PendingReviewHandle;

// =============================================================================
// EmailSender trait + adapters
// =============================================================================

/// Outbound email boundary. The portal only ever needs fire-and-forget
/// plain-text sends.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Wrapper around the hosted send-email function client.
pub struct MailerAdapter(pub Arc<MailerService>);

impl MailerAdapter {
    pub fn new(service: Arc<MailerService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl EmailSender for MailerAdapter {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = EmailMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };
        let response = self
            .0
            .send(&message)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        if !response.accepted() {
            anyhow::bail!("Mailer rejected message: {}", response.status);
        }
        Ok(())
    }
}

/// Stand-in sender used when no mailer endpoint is configured (local dev,
/// tests): logs the send and succeeds.
pub struct LoggingMailer;

#[async_trait]
impl EmailSender for LoggingMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<()> {
        tracing::info!(to, subject, "Email suppressed (no mailer configured)");
        Ok(())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies accessible to resolvers and background tasks.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub mailer: Arc<dyn EmailSender>,
    pub pending_review: PendingReviewHandle,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        mailer: Arc<dyn EmailSender>,
        pending_review: PendingReviewHandle,
    ) -> Self {
        Self {
            db_pool,
            mailer,
            pending_review,
        }
    }
}
