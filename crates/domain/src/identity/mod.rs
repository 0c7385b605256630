//! Identity domain.

pub mod binding;
pub mod builder;
pub mod email;
pub mod event;
pub mod id;
pub mod login;
pub mod record;

pub use binding::ProviderBinding;
pub use builder::IdentityBuilder;
pub use event::{IdentityEvent, IdentityOrigin};
pub use id::IdentityId;
pub use record::{AccountState, IdentityRecord};
