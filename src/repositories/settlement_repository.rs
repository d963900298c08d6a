//! Repository for settled-flag state and the settlement activity ledger.
//!
//! The ledger is append-only: this repository exposes the insert (only as
//! part of a toggle transaction) and a read, and nothing in the crate can
//! update or delete a ledger row.

use crate::error::RepositoryError;
use crate::models::{SettlementAction, SettlementActivityEntry, SettlementFlag};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SettlementRepository {
    pool: PgPool,
}

impl SettlementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Settled-flag Operations
    // =========================================================================

    /// Get all persisted settled flags for one event
    pub async fn get_flags(&self, event_id: Uuid) -> Result<Vec<SettlementFlag>, RepositoryError> {
        let flags = sqlx::query_as::<_, SettlementFlag>(
            r#"
            SELECT event_id, debtor_id, creditor_id, is_settled, updated_at
            FROM settlement_flags
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(flags)
    }

    /// Flip the settled flag for one transfer pair and append the matching
    /// ledger entry, atomically.
    ///
    /// A pair with no record yet is created as settled. The flag update and
    /// the ledger insert share one transaction: if either fails nothing is
    /// committed, so a retried toggle reapplies the same intended flip. The
    /// flag row's primary-key lock serializes concurrent toggles of the same
    /// pair.
    ///
    /// Returns the new settled state.
    pub async fn toggle_with_log(
        &self,
        event_id: Uuid,
        debtor_id: Uuid,
        creditor_id: Uuid,
        amount: Decimal,
        debtor_name: &str,
        creditor_name: &str,
        event_title: &str,
    ) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let is_settled = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO settlement_flags (event_id, debtor_id, creditor_id, is_settled)
            VALUES ($1, $2, $3, TRUE)
            ON CONFLICT (event_id, debtor_id, creditor_id)
            DO UPDATE SET is_settled = NOT settlement_flags.is_settled, updated_at = NOW()
            RETURNING is_settled
            "#,
        )
        .bind(event_id)
        .bind(debtor_id)
        .bind(creditor_id)
        .fetch_one(&mut *tx)
        .await?;

        let action = SettlementAction::for_transition(is_settled);

        // Names and title are copied by value so the entry outlives the
        // event and participants it describes.
        sqlx::query(
            r#"
            INSERT INTO settlement_activity_log
            (action, amount, debtor_name, creditor_name, event_title)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(action.as_str())
        .bind(amount)
        .bind(debtor_name)
        .bind(creditor_name)
        .bind(event_title)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(is_settled)
    }

    // =========================================================================
    // Activity Ledger
    // =========================================================================

    /// Read the settlement activity ledger, newest entries first
    pub async fn list_activity(
        &self,
        limit: i64,
    ) -> Result<Vec<SettlementActivityEntry>, RepositoryError> {
        let entries = sqlx::query_as::<_, SettlementActivityEntry>(
            r#"
            SELECT id, action, amount, debtor_name, creditor_name, event_title, created_at
            FROM settlement_activity_log
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
