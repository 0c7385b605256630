//! These traits define what the application can do.

pub mod delete_account;
pub mod local_account;
pub mod read_notifications;
pub mod resolve_account;
pub mod update_profile;

pub use delete_account::*;
pub use local_account::*;
pub use read_notifications::*;
pub use resolve_account::*;
pub use update_profile::*;
