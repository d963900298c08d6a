use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Event model representing one planned trip
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TripEvent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl TripEvent {
    /// Create a new TripEvent
    pub fn new(title: String, description: Option<String>, event_date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            event_date,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
