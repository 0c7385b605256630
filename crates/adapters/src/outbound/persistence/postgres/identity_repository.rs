//! PostgreSQL implementation for identity repository.

use application::error::{ApplicationError, Result, ToInternal};
use application::ports::outbound::IdentityRepository;
use async_trait::async_trait;
use domain::identity::{IdentityId, IdentityRecord, ProviderBinding};
use sqlx::PgPool;
use sqlx::postgres::PgQueryResult;

use super::models::{IdentityRow, to_db_time};

const SELECT_IDENTITY: &str = r#"
    SELECT
        i.id, i.login, i.email, i.password, i.guest, i.verified, i.state,
        i.replies_count, i.location, i.bio, i.tagline, i.website, i.github,
        i.created_at, i.updated_at, i.deleted_at,
        COALESCE(
            (
                SELECT jsonb_agg(
                    jsonb_build_object('provider', b.provider, 'uid', b.external_id)
                    ORDER BY b.created_at
                )
                FROM identity_bindings b
                WHERE b.identity_id = i.id
            ),
            '[]'::jsonb
        ) AS bindings
    FROM identities i
"#;

/// Maps unique violations to [`ApplicationError::Duplicate`].
fn conflict(err: sqlx::Error) -> ApplicationError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            let field = match db.constraint() {
                Some("identities_login_key") => "login",
                Some("identities_pkey") => "id",
                _ => "authorizations",
            };
            ApplicationError::Duplicate { field }
        },
        _ => ApplicationError::internal(err),
    }
}

/// PostgreSQL identity repository.
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    /// Create a new [`PgIdentityRepository`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Oldest live identity matching `condition`.
    async fn fetch(
        &self,
        condition: &str,
        params: &[&str],
    ) -> Result<Option<IdentityRecord>> {
        let sql = format!(
            "{SELECT_IDENTITY} WHERE i.deleted_at IS NULL AND {condition} \
             ORDER BY i.created_at, i.id LIMIT 1"
        );

        let mut query = sqlx::query_as::<_, IdentityRow>(&sql);
        for param in params {
            query = query.bind(*param);
        }

        query
            .fetch_optional(&self.pool)
            .await
            .catch()?
            .map(IdentityRow::try_into_record)
            .transpose()
    }
}

#[async_trait]
impl IdentityRepository for PgIdentityRepository {
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<IdentityRecord>> {
        self.fetch("i.id = $1", &[id.as_str()]).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>> {
        self.fetch("i.email = $1", &[email]).await
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<IdentityRecord>> {
        self.fetch("lower(i.login) = lower($1)", &[login]).await
    }

    async fn find_binding_owner(
        &self,
        provider: &str,
        external_id: &str,
    ) -> Result<Option<IdentityRecord>> {
        self.fetch(
            "i.id = (SELECT identity_id FROM identity_bindings \
             WHERE provider = $1 AND external_id = $2)",
            &[provider, external_id],
        )
        .await
    }

    async fn insert(&self, record: &IdentityRecord) -> Result<()> {
        let mut tx = self.pool.begin().await.catch()?;

        sqlx::query(
            r#"
            INSERT INTO identities (
                id, login, email, password, guest, verified, state,
                replies_count, location, bio, tagline, website, github,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(record.id.as_str())
        .bind(&record.login)
        .bind(&record.email)
        .bind(record.password_hash.as_ref().map(|hash| hash.as_str()))
        .bind(record.guest)
        .bind(record.verified)
        .bind(record.state.code())
        .bind(i32::try_from(record.replies_count).catch()?)
        .bind(&record.location)
        .bind(&record.bio)
        .bind(&record.tagline)
        .bind(&record.website)
        .bind(&record.github)
        .bind(to_db_time(record.created_at)?)
        .bind(to_db_time(record.updated_at)?)
        .execute(&mut *tx)
        .await
        .map_err(conflict)?;

        // Same transaction: a record never exists without its bindings.
        for binding in record.bindings() {
            sqlx::query(
                r#"
                INSERT INTO identity_bindings (provider, external_id, identity_id, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(binding.provider())
            .bind(binding.external_id())
            .bind(record.id.as_str())
            .bind(to_db_time(record.created_at)?)
            .execute(&mut *tx)
            .await
            .map_err(conflict)?;
        }

        tx.commit().await.catch()?;

        Ok(())
    }

    async fn update(&self, record: &IdentityRecord) -> Result<()> {
        let result: PgQueryResult = sqlx::query(
            r#"
            UPDATE identities
            SET
                login = $2,
                email = $3,
                password = $4,
                guest = $5,
                verified = $6,
                state = $7,
                replies_count = $8,
                location = $9,
                bio = $10,
                tagline = $11,
                website = $12,
                github = $13,
                updated_at = $14
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(record.id.as_str())
        .bind(&record.login)
        .bind(&record.email)
        .bind(record.password_hash.as_ref().map(|hash| hash.as_str()))
        .bind(record.guest)
        .bind(record.verified)
        .bind(record.state.code())
        .bind(i32::try_from(record.replies_count).catch()?)
        .bind(&record.location)
        .bind(&record.bio)
        .bind(&record.tagline)
        .bind(&record.website)
        .bind(&record.github)
        .bind(to_db_time(record.updated_at)?)
        .execute(&self.pool)
        .await
        .map_err(conflict)?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::IdentityNotFound);
        }

        Ok(())
    }

    async fn attach_binding(
        &self,
        id: &IdentityId,
        binding: &ProviderBinding,
    ) -> Result<()> {
        let result: PgQueryResult = sqlx::query(
            r#"
            INSERT INTO identity_bindings (provider, external_id, identity_id, created_at)
            SELECT $1, $2, id, EXTRACT(EPOCH FROM now())::BIGINT
            FROM identities
            WHERE id = $3 AND deleted_at IS NULL
            ON CONFLICT (provider, external_id) DO UPDATE
                SET identity_id = identity_bindings.identity_id
                WHERE identity_bindings.identity_id = EXCLUDED.identity_id
            "#,
        )
        .bind(binding.provider())
        .bind(binding.external_id())
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(conflict)?;

        if result.rows_affected() == 0 {
            // Either the identity is gone or someone else holds the subject.
            return match self.find_by_id(id).await? {
                Some(_) => Err(ApplicationError::Duplicate {
                    field: "authorizations",
                }),
                None => Err(ApplicationError::IdentityNotFound),
            };
        }

        Ok(())
    }

    async fn delete(&self, id: &IdentityId, deleted_at: u64) -> Result<()> {
        let mut tx = self.pool.begin().await.catch()?;

        let result: PgQueryResult = sqlx::query(
            r#"
            UPDATE identities
            SET deleted_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_str())
        .bind(to_db_time(deleted_at)?)
        .execute(&mut *tx)
        .await
        .catch()?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::IdentityNotFound);
        }

        // Released so the provider subject can sign up again.
        sqlx::query("DELETE FROM identity_bindings WHERE identity_id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .catch()?;

        tx.commit().await.catch()?;

        Ok(())
    }
}
