//! Mailer writing outgoing messages to the log.

use application::error::Result;
use application::ports::outbound::Mailer;
use async_trait::async_trait;
use domain::identity::IdentityId;

/// Logs welcome messages instead of delivering them.
///
/// Stands in for a real transport; delivery is outside this service.
#[derive(Default)]
pub struct TracingMailer;

impl TracingMailer {
    /// Create a new [`TracingMailer`].
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    async fn send_welcome(&self, id: &IdentityId) -> Result<()> {
        tracing::info!(identity = %id, template = "welcome", "email queued");
        Ok(())
    }
}
