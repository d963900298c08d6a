use crate::models::TripEvent;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for event data access.
///
/// Event CRUD is owned by the surrounding application; the settlement core
/// only reads events, plus an insert used when seeding data.
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new EventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new event
    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        event_date: NaiveDateTime,
    ) -> SqlxResult<TripEvent> {
        sqlx::query_as::<_, TripEvent>(
            r#"
            INSERT INTO events (title, description, event_date)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, event_date, created_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(event_date)
        .fetch_one(&self.pool)
        .await
    }

    /// Find an event by UUID
    pub async fn find_by_id(&self, id: Uuid) -> SqlxResult<Option<TripEvent>> {
        sqlx::query_as::<_, TripEvent>(
            r#"
            SELECT id, title, description, event_date, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find all events, newest trip first
    pub async fn find_all(&self) -> SqlxResult<Vec<TripEvent>> {
        sqlx::query_as::<_, TripEvent>(
            r#"
            SELECT id, title, description, event_date, created_at
            FROM events
            ORDER BY event_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
