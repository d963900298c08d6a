use kashta_backend::config::DatabaseConfig;
use kashta_backend::database::{create_pool, run_migrations};
use kashta_backend::models::*;
use kashta_backend::repositories::*;
use kashta_backend::services::SettlementService;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Test database connection with repositories.
///
/// Integration suites call [`TestDatabase::connect`] and skip cleanly when
/// `TEST_DATABASE_URL` is not set, so the pure test suites stay runnable
/// without PostgreSQL.
#[allow(dead_code)]
pub struct TestDatabase {
    pub pool: PgPool,
    pub event_repo: Arc<EventRepository>,
    pub participant_repo: Arc<ParticipantRepository>,
    pub contribution_repo: Arc<ContributionRepository>,
    pub settlement_repo: Arc<SettlementRepository>,
}

#[allow(dead_code)]
impl TestDatabase {
    /// Connect to the test database, or None when TEST_DATABASE_URL is unset
    pub async fn connect() -> Option<Self> {
        let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

        let config = DatabaseConfig {
            url: database_url,
            max_connections: 5,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 300,
            max_lifetime_secs: 600,
            test_before_acquire: true,
        };

        let pool = create_pool(&config)
            .await
            .expect("Failed to create test database pool");

        run_migrations(&pool, None)
            .await
            .expect("Failed to run migrations");

        Some(Self::from_pool(pool))
    }

    /// Create TestDatabase from an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: pool.clone(),
            event_repo: Arc::new(EventRepository::new(pool.clone())),
            participant_repo: Arc::new(ParticipantRepository::new(pool.clone())),
            contribution_repo: Arc::new(ContributionRepository::new(pool.clone())),
            settlement_repo: Arc::new(SettlementRepository::new(pool)),
        }
    }

    /// Build a settlement service over the test repositories
    pub fn settlement_service(&self) -> SettlementService {
        SettlementService::new(
            self.event_repo.clone(),
            self.participant_repo.clone(),
            self.contribution_repo.clone(),
            self.settlement_repo.clone(),
        )
    }
}

/// Helper function to create a test participant
#[allow(dead_code)]
pub async fn create_test_participant(db: &TestDatabase, name: &str) -> Participant {
    db.participant_repo
        .create(name, None)
        .await
        .expect("Failed to create test participant")
}

/// Helper function to create a test event
#[allow(dead_code)]
pub async fn create_test_event(db: &TestDatabase, title: &str) -> TripEvent {
    db.event_repo
        .create(title, None, chrono::Utc::now().naive_utc())
        .await
        .expect("Failed to create test event")
}

/// Helper function to create a test contribution
#[allow(dead_code)]
pub async fn create_test_contribution(
    db: &TestDatabase,
    event_id: Uuid,
    participant_id: Option<Uuid>,
    cost: Option<&str>,
) -> Contribution {
    db.contribution_repo
        .create(event_id, Uuid::new_v4(), participant_id, cost)
        .await
        .expect("Failed to create test contribution")
}

/// Unique label so parallel tests never assert on each other's data
#[allow(dead_code)]
pub fn unique_label(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}
