//! Interface for observability.

use domain::identity::{IdentityId, IdentityOrigin};

use crate::error::ApplicationError;

/// Port for telemetry/observability operations.
pub trait TelemetryPort: Send + Sync {
    /// Record a new identity.
    fn record_identity_created(&self, id: &IdentityId, origin: IdentityOrigin);

    /// Record a failed resolution or persistence, with its details.
    fn record_resolution_failure(&self, operation: &str, error: &ApplicationError);

    /// Record a provider linked to an existing identity.
    fn record_provider_bound(&self, id: &IdentityId, provider: &str);

    /// Record notifications flipped to read.
    fn record_notifications_read(&self, owner: &IdentityId, count: u64);
}
