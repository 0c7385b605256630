//! Events emitted after identity state changes.

use crate::identity::id::IdentityId;

/// How an identity came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityOrigin {
    /// Created from an email address alone.
    Guest,
    /// Created from an external provider callback.
    Provider,
    /// Registered with a login and a password.
    Local,
}

impl IdentityOrigin {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            IdentityOrigin::Guest => "guest",
            IdentityOrigin::Provider => "provider",
            IdentityOrigin::Local => "local",
        }
    }
}

/// Something that happened to an identity, for best-effort consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    /// A record was persisted for the first time.
    Created {
        id: IdentityId,
        origin: IdentityOrigin,
    },
}

impl IdentityEvent {
    /// Identity the event is about.
    pub fn identity_id(&self) -> &IdentityId {
        match self {
            IdentityEvent::Created { id, .. } => id,
        }
    }
}
