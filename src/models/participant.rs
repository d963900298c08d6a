use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Participant model representing a trip member who can pay for items
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Participant {
    /// Create a new Participant (typically used for creating from API input)
    pub fn new(name: String, avatar_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            avatar_url,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
