//! Agora is the identity core of a community platform: it maps sign-in
//! signals to accounts and tracks what their owners have read.

#![forbid(unsafe_code)]

pub mod config;
mod database;
pub mod telemetry;

use std::sync::Arc;

use adapters::outbound::clock::SystemClock;
use adapters::outbound::crypto::Argon2PasswordHasher;
use adapters::outbound::events::{ChannelEventPublisher, spawn_welcome_notifier};
use adapters::outbound::mail::TracingMailer;
use adapters::outbound::persistence::memory::{
    InMemoryIdentityRepository, InMemoryNotificationRepository,
};
use adapters::outbound::persistence::postgres::{
    PgIdentityRepository, PgNotificationRepository,
};
use adapters::outbound::telemetry::TracingTelemetry;
use application::error::Result;
use application::ports::inbound::{
    DeleteAccount, LocalAccount, ReadNotifications, ResolveAccount, UpdateProfile,
};
use application::ports::outbound::{
    Clock, IdentityRepository, Mailer, NotificationRepository, TelemetryPort,
};
use application::usecases::{
    AccountResolver, DeleteAccountUseCase, LocalAccountUseCase,
    NotificationReadTracker, UpdateProfileUseCase,
};
use domain::auth::trust::TrustPolicy;

use crate::config::Configuration;

/// State sharing between callers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Configuration>,
    pub trust: Arc<TrustPolicy>,
    pub resolver: Arc<dyn ResolveAccount>,
    pub profiles: Arc<dyn UpdateProfile>,
    pub accounts: Arc<dyn LocalAccount>,
    pub notifications: Arc<dyn ReadNotifications>,
    pub deletion: Arc<dyn DeleteAccount>,
}

/// Storage backends behind the use cases.
#[derive(Clone)]
pub struct Stores {
    pub identities: Arc<dyn IdentityRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

impl Stores {
    /// Fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            identities: Arc::new(InMemoryIdentityRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
        }
    }
}

/// Wire the use cases on top of `stores`.
///
/// Spawns the welcome notifier, so a tokio runtime must be running.
pub fn build_state(
    config: Arc<Configuration>,
    stores: Stores,
    clock: Arc<dyn Clock>,
    mailer: Arc<dyn Mailer>,
) -> Result<AppState> {
    let argon2 = config.argon2.clone().unwrap_or_default();
    let hasher = Arc::new(Argon2PasswordHasher::new(
        argon2.memory_cost,
        argon2.iterations,
        argon2.parallelism,
    )?);
    let telemetry: Arc<dyn TelemetryPort> = Arc::new(TracingTelemetry::new());

    let (publisher, receiver) = ChannelEventPublisher::new();
    let events = Arc::new(publisher);
    spawn_welcome_notifier(receiver, mailer);

    let Stores {
        identities,
        notifications,
    } = stores;

    Ok(AppState {
        trust: Arc::new(TrustPolicy::new(config.admins())),
        resolver: Arc::new(AccountResolver::new(
            Arc::clone(&identities),
            events.clone(),
            Arc::clone(&telemetry),
            Arc::clone(&clock),
        )),
        profiles: Arc::new(UpdateProfileUseCase::new(
            Arc::clone(&identities),
            hasher.clone(),
            Arc::clone(&clock),
        )),
        accounts: Arc::new(LocalAccountUseCase::new(
            Arc::clone(&identities),
            hasher,
            events,
            Arc::clone(&telemetry),
            Arc::clone(&clock),
        )),
        notifications: Arc::new(NotificationReadTracker::new(
            Arc::clone(&notifications),
            telemetry,
        )),
        deletion: Arc::new(DeleteAccountUseCase::new(identities, notifications, clock)),
        config,
    })
}

/// Initialize the application state.
pub async fn initialize_state(
    config: Arc<Configuration>,
) -> std::result::Result<AppState, Box<dyn std::error::Error>> {
    let stores = match config.postgres {
        Some(ref postgres) => {
            let pool = database::connect(postgres).await?;
            Stores {
                identities: Arc::new(PgIdentityRepository::new(pool.clone())),
                notifications: Arc::new(PgNotificationRepository::new(pool)),
            }
        },
        None => {
            tracing::warn!(
                "missing `postgres` entry on `config.yaml` file, data will not survive a restart"
            );
            Stores::in_memory()
        },
    };

    let state = build_state(
        config,
        stores,
        Arc::new(SystemClock::new()),
        Arc::new(TracingMailer::new()),
    )?;

    Ok(state)
}
