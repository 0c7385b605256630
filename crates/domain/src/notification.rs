//! Notifications addressed to an identity.

use std::fmt;

use crate::identity::id::IdentityId;

/// Notification identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Create a new [`NotificationId`].
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Underlying integer.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NotificationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A notification as last seen by the caller.
///
/// `read` only ever goes from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub owner: IdentityId,
    pub read: bool,
    pub created_at: u64,
}

impl Notification {
    /// Create a new unread [`Notification`].
    pub fn new(id: impl Into<NotificationId>, owner: IdentityId, now: u64) -> Self {
        Self {
            id: id.into(),
            owner,
            read: false,
            created_at: now,
        }
    }
}

/// Ids of the notifications still unread in `batch`, in input order.
pub fn unread_ids(batch: &[Notification]) -> Vec<NotificationId> {
    batch.iter().filter(|n| !n.read).map(|n| n.id).collect()
}
