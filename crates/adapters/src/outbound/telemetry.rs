//! Telemetry adapters - Observability implementations.

use application::error::ApplicationError;
use application::ports::outbound::TelemetryPort;
use domain::identity::{IdentityId, IdentityOrigin};
use metrics::Unit;

const IDENTITIES_CREATED: &str = "identities_created_total";
const RESOLUTION_FAILURES: &str = "identity_resolution_failures_total";
const PROVIDERS_BOUND: &str = "identity_providers_bound_total";
const NOTIFICATIONS_READ: &str = "notifications_read_total";

/// Tracing-based telemetry adapter, also feeding `metrics` counters.
///
/// Counters are no-ops until a recorder is installed.
#[derive(Default)]
pub struct TracingTelemetry;

impl TracingTelemetry {
    /// Create a new [`TracingTelemetry`].
    pub fn new() -> Self {
        metrics::describe_counter!(
            IDENTITIES_CREATED,
            Unit::Count,
            "Identities created, by origin."
        );
        metrics::describe_counter!(
            RESOLUTION_FAILURES,
            Unit::Count,
            "Failed identity resolutions, by operation."
        );
        metrics::describe_counter!(
            PROVIDERS_BOUND,
            Unit::Count,
            "Provider bindings added to existing identities."
        );
        metrics::describe_counter!(
            NOTIFICATIONS_READ,
            Unit::Count,
            "Notifications flipped to read."
        );

        Self
    }
}

fn error_kind(error: &ApplicationError) -> &'static str {
    match error {
        ApplicationError::Domain(_) => "domain",
        ApplicationError::Validation(_) => "validation",
        ApplicationError::Duplicate { .. } => "duplicate",
        ApplicationError::Authentication => "authentication",
        ApplicationError::IdentityNotFound => "not_found",
        ApplicationError::Internal(_) => "internal",
    }
}

impl TelemetryPort for TracingTelemetry {
    fn record_identity_created(&self, id: &IdentityId, origin: IdentityOrigin) {
        tracing::info!(identity = %id, origin = origin.as_str(), "identity created");
        metrics::counter!(IDENTITIES_CREATED, "origin" => origin.as_str()).increment(1);
    }

    fn record_resolution_failure(&self, operation: &str, error: &ApplicationError) {
        let kind = error_kind(error);
        match error {
            ApplicationError::Validation(errors) => {
                tracing::warn!(operation, kind, %errors, "identity resolution failed");
            },
            ApplicationError::Internal(source) => {
                tracing::error!(operation, kind, %source, "identity resolution failed");
            },
            _ => tracing::warn!(operation, kind, %error, "identity resolution failed"),
        }

        metrics::counter!(
            RESOLUTION_FAILURES,
            "operation" => operation.to_string(),
            "kind" => kind
        )
        .increment(1);
    }

    fn record_provider_bound(&self, id: &IdentityId, provider: &str) {
        tracing::info!(identity = %id, provider, "provider bound");
        metrics::counter!(PROVIDERS_BOUND, "provider" => provider.to_string())
            .increment(1);
    }

    fn record_notifications_read(&self, owner: &IdentityId, count: u64) {
        tracing::debug!(identity = %owner, count, "notifications marked as read");
        metrics::counter!(NOTIFICATIONS_READ).increment(count);
    }
}
