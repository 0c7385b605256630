//! PostgreSQL implementation for notification repository.

use application::error::{Result, ToInternal};
use application::ports::outbound::NotificationRepository;
use async_trait::async_trait;
use domain::identity::IdentityId;
use domain::notification::NotificationId;
use sqlx::PgPool;

/// PostgreSQL notification repository.
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new [`PgNotificationRepository`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn mark_read(
        &self,
        owner: &IdentityId,
        ids: &[NotificationId],
    ) -> Result<u64> {
        let ids = ids
            .iter()
            .map(|id| i64::try_from(id.get()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .catch()?;

        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE owner_id = $1 AND id = ANY($2) AND NOT read
            "#,
        )
        .bind(owner.as_str())
        .bind(ids)
        .execute(&self.pool)
        .await
        .catch()?;

        Ok(result.rows_affected())
    }

    async fn unread_count(&self, owner: &IdentityId) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE owner_id = $1 AND NOT read",
        )
        .bind(owner.as_str())
        .fetch_one(&self.pool)
        .await
        .catch()?;

        u64::try_from(count).catch()
    }

    async fn delete_for_owner(&self, owner: &IdentityId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE owner_id = $1")
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .catch()?;

        Ok(result.rows_affected())
    }
}
