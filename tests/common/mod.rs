//! Shared fixtures: in-memory stores, a settable clock and recorders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use adapters::outbound::crypto::Argon2PasswordHasher;
use adapters::outbound::persistence::memory::{
    InMemoryIdentityRepository, InMemoryNotificationRepository,
};
use application::error::ApplicationError;
use application::ports::outbound::{
    Clock, EventPublisher, IdentityRepository, PasswordHasher, TelemetryPort,
};
use application::usecases::{
    AccountResolver, DeleteAccountUseCase, LocalAccountUseCase,
    NotificationReadTracker, UpdateProfileUseCase,
};
use domain::identity::{IdentityEvent, IdentityId, IdentityOrigin};

pub const NOW: u64 = 1_700_000_000;

/// Clock returning a settable timestamp.
pub struct FixedClock(AtomicU64);

impl FixedClock {
    pub fn new(timestamp: u64) -> Self {
        Self(AtomicU64::new(timestamp))
    }

    pub fn set(&self, timestamp: u64) {
        self.0.store(timestamp, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct RecordingEvents(Mutex<Vec<IdentityEvent>>);

impl RecordingEvents {
    pub fn created(&self) -> Vec<(IdentityId, IdentityOrigin)> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .map(|event| match event {
                IdentityEvent::Created { id, origin } => (id.clone(), *origin),
            })
            .collect()
    }
}

impl EventPublisher for RecordingEvents {
    fn publish(&self, event: IdentityEvent) {
        self.0.lock().unwrap().push(event);
    }
}

#[derive(Default)]
pub struct RecordingTelemetry {
    pub failures: Mutex<Vec<String>>,
    pub notifications_read: AtomicU64,
}

impl TelemetryPort for RecordingTelemetry {
    fn record_identity_created(&self, _id: &IdentityId, _origin: IdentityOrigin) {}

    fn record_resolution_failure(&self, operation: &str, _error: &ApplicationError) {
        self.failures.lock().unwrap().push(operation.to_string());
    }

    fn record_provider_bound(&self, _id: &IdentityId, _provider: &str) {}

    fn record_notifications_read(&self, _owner: &IdentityId, count: u64) {
        self.notifications_read.fetch_add(count, Ordering::SeqCst);
    }
}

/// Every use case wired on the same in-memory stores.
pub struct Harness {
    pub identities: Arc<InMemoryIdentityRepository>,
    pub notifications: Arc<InMemoryNotificationRepository>,
    pub clock: Arc<FixedClock>,
    pub events: Arc<RecordingEvents>,
    pub telemetry: Arc<RecordingTelemetry>,
    pub hasher: Arc<Argon2PasswordHasher>,
    pub resolver: AccountResolver,
    pub profiles: UpdateProfileUseCase,
    pub accounts: LocalAccountUseCase,
    pub reads: NotificationReadTracker,
    pub deletion: DeleteAccountUseCase,
}

impl Harness {
    pub fn new() -> Self {
        let identities = Arc::new(InMemoryIdentityRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let clock = Arc::new(FixedClock::new(NOW));
        let events = Arc::new(RecordingEvents::default());
        let telemetry = Arc::new(RecordingTelemetry::default());
        let hasher = Arc::new(Argon2PasswordHasher::new(1024, 1, 1).unwrap());

        Self {
            resolver: AccountResolver::new(
                identities.clone(),
                events.clone(),
                telemetry.clone(),
                clock.clone(),
            ),
            profiles: UpdateProfileUseCase::new(
                identities.clone(),
                hasher.clone(),
                clock.clone(),
            ),
            accounts: LocalAccountUseCase::new(
                identities.clone(),
                hasher.clone(),
                events.clone(),
                telemetry.clone(),
                clock.clone(),
            ),
            reads: NotificationReadTracker::new(notifications.clone(), telemetry.clone()),
            deletion: DeleteAccountUseCase::new(
                identities.clone(),
                notifications.clone(),
                clock.clone(),
            ),
            identities,
            notifications,
            clock,
            events,
            telemetry,
            hasher,
        }
    }

    pub fn failures(&self) -> Vec<String> {
        self.telemetry.failures.lock().unwrap().clone()
    }

    pub async fn stored(&self, id: &IdentityId) -> domain::identity::IdentityRecord {
        self.identities.find_by_id(id).await.unwrap().unwrap()
    }

    pub fn hash(&self, password: &str) -> domain::auth::password::PasswordHash {
        let password = domain::auth::password::Password::new(password).unwrap();
        self.hasher.hash(&password).unwrap()
    }
}
