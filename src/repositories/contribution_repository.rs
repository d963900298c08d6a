use crate::models::Contribution;
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for contribution data access
pub struct ContributionRepository {
    pool: PgPool,
}

impl ContributionRepository {
    /// Create a new ContributionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new contribution
    pub async fn create(
        &self,
        event_id: Uuid,
        item_id: Uuid,
        participant_id: Option<Uuid>,
        cost: Option<&str>,
    ) -> SqlxResult<Contribution> {
        sqlx::query_as::<_, Contribution>(
            r#"
            INSERT INTO contributions (event_id, item_id, participant_id, cost)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, item_id, participant_id, cost, created_at
            "#,
        )
        .bind(event_id)
        .bind(item_id)
        .bind(participant_id)
        .bind(cost)
        .fetch_one(&self.pool)
        .await
    }

    /// Find all contributions for an event
    pub async fn find_by_event(&self, event_id: Uuid) -> SqlxResult<Vec<Contribution>> {
        sqlx::query_as::<_, Contribution>(
            r#"
            SELECT id, event_id, item_id, participant_id, cost, created_at
            FROM contributions
            WHERE event_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Distinct ids of events that have at least one contribution
    pub async fn find_event_ids_with_contributions(&self) -> SqlxResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT c.event_id
            FROM contributions c
            JOIN events e ON e.id = c.event_id
            ORDER BY c.event_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
