//! Kashta Settlement Backend Library
//!
//! This module exposes the backend components for use by tests and other
//! consumers.

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settlement;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use database::Database;
use repositories::*;
use std::sync::Arc;

/// Application state containing all repositories
pub struct AppState {
    pub database: Database,
    pub event_repo: Arc<EventRepository>,
    pub participant_repo: Arc<ParticipantRepository>,
    pub contribution_repo: Arc<ContributionRepository>,
    pub settlement_repo: Arc<SettlementRepository>,
}

impl AppState {
    /// Create a new AppState with initialized repositories
    pub fn new(pool: sqlx::PgPool) -> Self {
        let database = Database::new(pool.clone());

        Self {
            database,
            event_repo: Arc::new(EventRepository::new(pool.clone())),
            participant_repo: Arc::new(ParticipantRepository::new(pool.clone())),
            contribution_repo: Arc::new(ContributionRepository::new(pool.clone())),
            settlement_repo: Arc::new(SettlementRepository::new(pool)),
        }
    }

    /// Build the settlement service over this state's repositories
    pub fn settlement_service(&self) -> services::SettlementService {
        services::SettlementService::new(
            self.event_repo.clone(),
            self.participant_repo.clone(),
            self.contribution_repo.clone(),
            self.settlement_repo.clone(),
        )
    }
}
