//! These traits define what the application needs from the outside world.

pub mod clock;
pub mod crypto;
pub mod events;
pub mod identity;
pub mod mailer;
pub mod notification;
pub mod telemetry;

pub use clock::*;
pub use crypto::*;
pub use events::*;
pub use identity::*;
pub use mailer::*;
pub use notification::*;
pub use telemetry::*;
