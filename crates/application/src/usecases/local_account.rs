//! Local account use case implementation.

use std::sync::Arc;

use async_trait::async_trait;
use domain::auth::password::Password;
use domain::auth::policy::{UpdateContext, check_credentials};
use domain::identity::{IdentityBuilder, IdentityEvent, IdentityOrigin, IdentityRecord};
use validator::Validate;

use crate::dto::{AuthRequestDto, RegisterRequestDto};
use crate::error::{ApplicationError, Result};
use crate::ports::inbound::LocalAccount;
use crate::ports::outbound::{
    Clock, EventPublisher, IdentityRepository, PasswordHasher, TelemetryPort,
};
use crate::usecases::persist::{IdentityWriter, PersistPolicy};

/// Local account use case service.
pub struct LocalAccountUseCase {
    identities: Arc<dyn IdentityRepository>,
    writer: IdentityWriter,
    hasher: Arc<dyn PasswordHasher>,
    events: Arc<dyn EventPublisher>,
    telemetry: Arc<dyn TelemetryPort>,
    clock: Arc<dyn Clock>,
}

impl LocalAccountUseCase {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        hasher: Arc<dyn PasswordHasher>,
        events: Arc<dyn EventPublisher>,
        telemetry: Arc<dyn TelemetryPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            writer: IdentityWriter::new(Arc::clone(&identities)),
            identities,
            hasher,
            events,
            telemetry,
            clock,
        }
    }
}

#[async_trait]
impl LocalAccount for LocalAccountUseCase {
    async fn register(&self, request: RegisterRequestDto) -> Result<IdentityRecord> {
        request.validate()?;

        let password = check_credentials(&UpdateContext {
            password: Some(&request.password),
            password_confirmation: request.password_confirmation.as_deref(),
        })?;
        let password_hash = self.hasher.hash(&password)?;

        let record = IdentityBuilder::new(self.clock.now())
            .login(request.login)
            .email(request.email)
            .password(password_hash)
            .build();

        if let Err(err) = self.writer.insert(&record, PersistPolicy::Validate).await {
            self.telemetry.record_resolution_failure("register", &err);
            return Err(err);
        }

        self.telemetry
            .record_identity_created(&record.id, IdentityOrigin::Local);
        self.events.publish(IdentityEvent::Created {
            id: record.id.clone(),
            origin: IdentityOrigin::Local,
        });

        Ok(record)
    }

    async fn authenticate(&self, request: AuthRequestDto) -> Result<IdentityRecord> {
        let identity = self
            .identities
            .find_by_email(&request.email)
            .await?
            .ok_or(ApplicationError::Authentication)?;

        let stored = identity
            .password_hash
            .as_ref()
            .ok_or(ApplicationError::Authentication)?;
        let password = Password::new(request.password)
            .map_err(|_| ApplicationError::Authentication)?;
        self.hasher.verify(&password, stored)?;

        Ok(identity)
    }
}
