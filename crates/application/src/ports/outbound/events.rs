//! Interface for identity events.

use domain::identity::IdentityEvent;

/// Port for publishing identity events.
///
/// Publishing never fails from the caller's point of view: consumers are
/// best-effort and their failures stay on their side.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: IdentityEvent);
}
