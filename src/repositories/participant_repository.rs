use crate::models::Participant;
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for participant data access
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    /// Create a new ParticipantRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new participant
    pub async fn create(&self, name: &str, avatar_url: Option<&str>) -> SqlxResult<Participant> {
        sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (name, avatar_url)
            VALUES ($1, $2)
            RETURNING id, name, avatar_url, created_at
            "#,
        )
        .bind(name)
        .bind(avatar_url)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a participant by UUID
    pub async fn find_by_id(&self, id: Uuid) -> SqlxResult<Option<Participant>> {
        sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, name, avatar_url, created_at
            FROM participants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find participants by a set of UUIDs
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> SqlxResult<Vec<Participant>> {
        sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, name, avatar_url, created_at
            FROM participants
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await
    }

    /// Find all participants ordered by name
    pub async fn find_all(&self) -> SqlxResult<Vec<Participant>> {
        sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, name, avatar_url, created_at
            FROM participants
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
