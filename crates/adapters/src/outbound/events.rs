//! In-process identity events.

use std::sync::Arc;

use application::ports::outbound::{EventPublisher, Mailer};
use domain::identity::IdentityEvent;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

/// Publishes events on an unbounded tokio channel.
///
/// Publishing never blocks the caller; a closed channel drops the event.
#[derive(Clone)]
pub struct ChannelEventPublisher {
    sender: UnboundedSender<IdentityEvent>,
}

impl ChannelEventPublisher {
    /// Create a publisher and the receiving end for its consumer.
    pub fn new() -> (Self, UnboundedReceiver<IdentityEvent>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EventPublisher for ChannelEventPublisher {
    fn publish(&self, event: IdentityEvent) {
        if let Err(err) = self.sender.send(event) {
            tracing::warn!(identity = %err.0.identity_id(), "event channel closed, event dropped");
        }
    }
}

/// Spawn the task sending a welcome email for every created identity.
///
/// Mailer failures are logged and never reach the creator. The task ends
/// once every publisher is dropped.
pub fn spawn_welcome_notifier(
    mut receiver: UnboundedReceiver<IdentityEvent>,
    mailer: Arc<dyn Mailer>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            match &event {
                IdentityEvent::Created { id, origin } => {
                    if let Err(err) = mailer.send_welcome(id).await {
                        tracing::error!(
                            identity = %id,
                            origin = origin.as_str(),
                            %err,
                            "welcome email failed"
                        );
                    }
                },
            }
        }

        tracing::debug!("welcome notifier stopped");
    })
}
