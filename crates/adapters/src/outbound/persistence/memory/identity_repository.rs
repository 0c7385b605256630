//! In-memory implementation for identity repository.

use std::collections::HashMap;

use application::error::{ApplicationError, Result};
use application::ports::outbound::IdentityRepository;
use async_trait::async_trait;
use domain::identity::login::canonical;
use domain::identity::{IdentityId, IdentityRecord, ProviderBinding};
use tokio::sync::RwLock;

type BindingKey = (String, String);

fn binding_key(provider: &str, external_id: &str) -> BindingKey {
    (provider.to_string(), external_id.to_string())
}

#[derive(Default)]
struct Tables {
    records: HashMap<IdentityId, IdentityRecord>,
    /// Canonical login to live owner.
    logins: HashMap<String, IdentityId>,
    /// `(provider, external id)` to owner. Released on deletion.
    bindings: HashMap<BindingKey, IdentityId>,
}

impl Tables {
    fn live(&self, id: &IdentityId) -> Option<&IdentityRecord> {
        self.records.get(id).filter(|record| !record.is_deleted())
    }
}

/// In-memory identity repository.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    tables: RwLock<Tables>,
}

impl InMemoryIdentityRepository {
    /// Create a new empty [`InMemoryIdentityRepository`].
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<IdentityRecord>> {
        Ok(self.tables.read().await.live(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>> {
        let tables = self.tables.read().await;

        // Oldest first, like the SQL store.
        Ok(tables
            .records
            .values()
            .filter(|record| !record.is_deleted() && record.email == email)
            .min_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)))
            .cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<IdentityRecord>> {
        let tables = self.tables.read().await;

        Ok(tables
            .logins
            .get(&canonical(login))
            .and_then(|id| tables.live(id))
            .cloned())
    }

    async fn find_binding_owner(
        &self,
        provider: &str,
        external_id: &str,
    ) -> Result<Option<IdentityRecord>> {
        let tables = self.tables.read().await;

        Ok(tables
            .bindings
            .get(&binding_key(provider, external_id))
            .and_then(|id| tables.live(id))
            .cloned())
    }

    async fn insert(&self, record: &IdentityRecord) -> Result<()> {
        let mut tables = self.tables.write().await;

        let login = canonical(&record.login);
        if tables.logins.contains_key(&login) {
            return Err(ApplicationError::Duplicate { field: "login" });
        }
        if record.bindings().iter().any(|binding| {
            tables
                .bindings
                .contains_key(&binding_key(binding.provider(), binding.external_id()))
        }) {
            return Err(ApplicationError::Duplicate {
                field: "authorizations",
            });
        }
        if tables.records.contains_key(&record.id) {
            return Err(ApplicationError::Duplicate { field: "id" });
        }

        tables.logins.insert(login, record.id.clone());
        for binding in record.bindings() {
            tables.bindings.insert(
                binding_key(binding.provider(), binding.external_id()),
                record.id.clone(),
            );
        }
        tables.records.insert(record.id.clone(), record.clone());

        Ok(())
    }

    async fn update(&self, record: &IdentityRecord) -> Result<()> {
        let mut tables = self.tables.write().await;

        let Some(stored) = tables.live(&record.id) else {
            return Err(ApplicationError::IdentityNotFound);
        };
        let previous_login = canonical(&stored.login);
        // Bindings only change through `attach_binding`.
        let bindings = stored.bindings().to_vec();

        let login = canonical(&record.login);
        if login != previous_login {
            if tables.logins.contains_key(&login) {
                return Err(ApplicationError::Duplicate { field: "login" });
            }
            tables.logins.remove(&previous_login);
            tables.logins.insert(login, record.id.clone());
        }

        let mut updated = record.clone();
        updated.restore_bindings(bindings);
        tables.records.insert(record.id.clone(), updated);

        Ok(())
    }

    async fn attach_binding(
        &self,
        id: &IdentityId,
        binding: &ProviderBinding,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;

        let key = binding_key(binding.provider(), binding.external_id());
        match tables.bindings.get(&key) {
            Some(owner) if owner == id => return Ok(()),
            Some(_) => {
                return Err(ApplicationError::Duplicate {
                    field: "authorizations",
                });
            },
            None => {},
        }

        let record = tables
            .records
            .get_mut(id)
            .filter(|record| !record.is_deleted())
            .ok_or(ApplicationError::IdentityNotFound)?;
        record.bind(binding.clone())?;

        tables.bindings.insert(key, id.clone());

        Ok(())
    }

    async fn delete(&self, id: &IdentityId, deleted_at: u64) -> Result<()> {
        let mut tables = self.tables.write().await;

        let record = tables
            .records
            .get_mut(id)
            .filter(|record| !record.is_deleted())
            .ok_or(ApplicationError::IdentityNotFound)?;
        record.deleted_at = Some(deleted_at);
        let login = canonical(&record.login);

        tables.logins.remove(&login);
        tables.bindings.retain(|_, owner| owner != id);

        Ok(())
    }
}
