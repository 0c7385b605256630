//! Account resolution use case implementation.

use std::sync::Arc;

use async_trait::async_trait;
use domain::identity::{
    IdentityBuilder, IdentityEvent, IdentityId, IdentityOrigin, IdentityRecord,
    ProviderBinding, login,
};

use crate::dto::{ProviderCallbackDto, ProviderProfileDto};
use crate::error::{ApplicationError, Result};
use crate::ports::inbound::ResolveAccount;
use crate::ports::outbound::{
    Clock, EventPublisher, IdentityRepository, TelemetryPort,
};
use crate::usecases::persist::{IdentityWriter, PersistPolicy};
use crate::usecases::rejected;

/// Account resolution use case service.
pub struct AccountResolver {
    identities: Arc<dyn IdentityRepository>,
    writer: IdentityWriter,
    events: Arc<dyn EventPublisher>,
    telemetry: Arc<dyn TelemetryPort>,
    clock: Arc<dyn Clock>,
}

impl AccountResolver {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        events: Arc<dyn EventPublisher>,
        telemetry: Arc<dyn TelemetryPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            writer: IdentityWriter::new(Arc::clone(&identities)),
            identities,
            events,
            telemetry,
            clock,
        }
    }

    fn observe<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.telemetry.record_resolution_failure(operation, err);
        }
        result
    }

    fn created(&self, identity: &IdentityRecord, origin: IdentityOrigin) {
        self.telemetry.record_identity_created(&identity.id, origin);
        self.events.publish(IdentityEvent::Created {
            id: identity.id.clone(),
            origin,
        });
    }

    async fn guest(&self, email: &str) -> Result<IdentityRecord> {
        if !email.trim().is_empty() {
            if let Some(identity) = self.identities.find_by_email(email).await? {
                return Ok(identity);
            }
        }

        let record = IdentityBuilder::new(self.clock.now())
            .login(login::from_email(email))
            .email(email)
            .guest()
            .build();

        match self.writer.insert(&record, PersistPolicy::Validate).await {
            Ok(()) => {
                self.created(&record, IdentityOrigin::Guest);
                Ok(record)
            },
            // A concurrent request may have created the same guest between
            // our lookup and our write. Its record is the answer.
            Err(
                err @ (ApplicationError::Duplicate { .. }
                | ApplicationError::Validation(_)),
            ) => match self.identities.find_by_email(email).await? {
                Some(identity) if !email.trim().is_empty() => Ok(identity),
                _ => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    /// Login derived from the provider handle, or a synthetic one when the
    /// handle is unusable or already taken.
    async fn provider_login(
        &self,
        info: &ProviderProfileDto,
        now: u64,
    ) -> Result<String> {
        let handle = info
            .nickname
            .as_deref()
            .filter(|nickname| !nickname.trim().is_empty())
            .or(info.username.as_deref())
            .unwrap_or_default();

        let candidate = login::normalize(handle);
        if candidate.is_empty()
            || self.identities.find_by_login(&candidate).await?.is_some()
        {
            return Ok(login::synthetic(now));
        }

        Ok(candidate)
    }

    async fn create_from_provider(
        &self,
        payload: ProviderCallbackDto,
    ) -> Result<IdentityRecord> {
        if payload.provider.trim().is_empty() || payload.uid.trim().is_empty() {
            return Err(rejected(
                "authorizations",
                "presence",
                "provider and uid can't be blank",
            ));
        }

        if self
            .identities
            .find_binding_owner(&payload.provider, &payload.uid)
            .await?
            .is_some()
        {
            return Err(ApplicationError::Duplicate {
                field: "authorizations",
            });
        }

        let now = self.clock.now();
        let login = self.provider_login(&payload.info, now).await?;
        let ProviderProfileDto {
            email,
            location,
            description,
            urls,
            ..
        } = payload.info;

        let record = IdentityBuilder::new(now)
            .login(login)
            .email(email.unwrap_or_default())
            .location(location)
            .tagline(description)
            .website(urls.into_iter().next().map(|(_, url)| url))
            .binding(ProviderBinding::new(payload.provider, payload.uid))
            .build();

        // The binding travels with the record, so it exists iff the insert
        // succeeded.
        self.writer
            .insert(&record, PersistPolicy::SkipValidation)
            .await?;
        self.created(&record, IdentityOrigin::Provider);

        Ok(record)
    }

    async fn sign_in(&self, payload: ProviderCallbackDto) -> Result<IdentityRecord> {
        if let Some(identity) = self
            .identities
            .find_binding_owner(&payload.provider, &payload.uid)
            .await?
        {
            return Ok(identity);
        }

        let provider = payload.provider.clone();
        let uid = payload.uid.clone();
        match self.create_from_provider(payload).await {
            Err(err @ ApplicationError::Duplicate { .. }) => self
                .identities
                .find_binding_owner(&provider, &uid)
                .await?
                .ok_or(err),
            result => result,
        }
    }

    async fn bind(
        &self,
        id: &IdentityId,
        provider: &str,
        external_id: &str,
    ) -> Result<IdentityRecord> {
        let mut identity = self
            .identities
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::IdentityNotFound)?;

        if let Some(owner) =
            self.identities.find_binding_owner(provider, external_id).await?
        {
            if owner.id == identity.id {
                return Ok(identity);
            }

            return Err(rejected(
                "authorizations",
                "taken",
                format!("this {provider} account is linked to someone else"),
            ));
        }

        let binding = ProviderBinding::new(provider, external_id);
        if identity.bind(binding.clone()).is_err() {
            return Err(rejected(
                "authorizations",
                "taken",
                format!("already linked to another {provider} account"),
            ));
        }

        self.identities.attach_binding(&identity.id, &binding).await?;
        self.telemetry.record_provider_bound(&identity.id, provider);

        Ok(identity)
    }
}

#[async_trait]
impl ResolveAccount for AccountResolver {
    async fn find_or_create_guest(&self, email: &str) -> Result<IdentityRecord> {
        let result = self.guest(email).await;
        self.observe("find_or_create_guest", result)
    }

    async fn find_by_provider_binding(
        &self,
        provider: &str,
        external_id: &str,
    ) -> Result<Option<IdentityRecord>> {
        let result =
            self.identities.find_binding_owner(provider, external_id).await;
        self.observe("find_by_provider_binding", result)
    }

    async fn create_from_provider_callback(
        &self,
        payload: ProviderCallbackDto,
    ) -> Result<IdentityRecord> {
        let result = self.create_from_provider(payload).await;
        self.observe("create_from_provider_callback", result)
    }

    async fn sign_in_with_provider(
        &self,
        payload: ProviderCallbackDto,
    ) -> Result<IdentityRecord> {
        let result = self.sign_in(payload).await;
        self.observe("sign_in_with_provider", result)
    }

    async fn bind_provider(
        &self,
        id: &IdentityId,
        provider: &str,
        external_id: &str,
    ) -> Result<IdentityRecord> {
        let result = self.bind(id, provider, external_id).await;
        self.observe("bind_provider", result)
    }
}
