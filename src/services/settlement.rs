use crate::error::{option_to_result, AppError, AppResult};
use crate::models::{EventSettlement, SettlementActivityEntry, Transfer};
use crate::repositories::{
    ContributionRepository, EventRepository, ParticipantRepository, SettlementRepository,
};
use crate::settlement::{BalanceCalculator, TransferResolver};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Default cap on activity-ledger reads
const ACTIVITY_LIMIT: i64 = 500;

/// Settlement service: derives event settlements on every read and owns the
/// one mutation in the core, the settled-flag toggle with its paired ledger
/// append.
pub struct SettlementService {
    event_repo: Arc<EventRepository>,
    participant_repo: Arc<ParticipantRepository>,
    contribution_repo: Arc<ContributionRepository>,
    settlement_repo: Arc<SettlementRepository>,
}

impl SettlementService {
    /// Create a new settlement service
    pub fn new(
        event_repo: Arc<EventRepository>,
        participant_repo: Arc<ParticipantRepository>,
        contribution_repo: Arc<ContributionRepository>,
        settlement_repo: Arc<SettlementRepository>,
    ) -> Self {
        Self {
            event_repo,
            participant_repo,
            contribution_repo,
            settlement_repo,
        }
    }

    /// Compute the full settlement view for one event.
    ///
    /// Balances, fair share, and transfers are derived fresh from the
    /// event's contributions; only the settled flags are read from durable
    /// state and merged onto the transfer set.
    pub async fn compute_event_settlement(&self, event_id: Uuid) -> AppResult<EventSettlement> {
        let event = option_to_result(
            self.event_repo.find_by_id(event_id).await?,
            &format!("Event {} not found", event_id),
        )?;

        let contributions = self.contribution_repo.find_by_event(event_id).await?;

        let payer_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = contributions
                .iter()
                .filter_map(|c| c.participant_id)
                .collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        let names: HashMap<Uuid, String> = self
            .participant_repo
            .find_by_ids(&payer_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let computed = BalanceCalculator.compute(&contributions, &names);

        let mut transactions = TransferResolver.resolve(event_id, &computed.balances);
        let flags: HashMap<(Uuid, Uuid), bool> = self
            .settlement_repo
            .get_flags(event_id)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|flag| ((flag.debtor_id, flag.creditor_id), flag.is_settled))
            .collect();
        TransferResolver.merge_settled_flags(&mut transactions, &flags);

        Ok(EventSettlement {
            event_id: event.id,
            event_title: event.title,
            event_date: event.event_date,
            participant_count: computed.participant_count,
            total_costed: computed.total_costed,
            fair_share: computed.fair_share,
            unassigned_costs: computed.unassigned_costs,
            balances: computed.balances,
            transactions,
        })
    }

    /// Compute settlements for every event that has at least one costed
    /// contribution; events with none are omitted.
    ///
    /// One event's failure is isolated to that event: it is logged and
    /// skipped, never aborting the rest of the batch.
    pub async fn compute_all_settlements(&self) -> AppResult<Vec<EventSettlement>> {
        let event_ids = self
            .contribution_repo
            .find_event_ids_with_contributions()
            .await?;

        let mut settlements = Vec::with_capacity(event_ids.len());
        for event_id in event_ids {
            match self.compute_event_settlement(event_id).await {
                Ok(settlement) => {
                    let has_costed_contribution =
                        settlement.total_costed + settlement.unassigned_costs > Decimal::ZERO;
                    if has_costed_contribution {
                        settlements.push(settlement);
                    }
                }
                Err(err) => {
                    warn!("Skipping settlement for event {}: {}", event_id, err);
                }
            }
        }

        Ok(settlements)
    }

    /// Flip the settled flag for one transfer pair and append exactly one
    /// ledger entry recording the action, amount, and parties.
    ///
    /// Fails with `NotFound` if the event or either participant no longer
    /// exists, and with `Validation` if the pair is not part of the event's
    /// currently computed transfer set (a pair whose amount changed since it
    /// was flagged is still valid; a pair that was never resolved is not).
    pub async fn toggle_settlement(
        &self,
        event_id: Uuid,
        debtor_id: Uuid,
        creditor_id: Uuid,
    ) -> AppResult<Transfer> {
        let settlement = self.compute_event_settlement(event_id).await?;

        let transfer = settlement
            .transactions
            .iter()
            .find(|t| t.debtor_id == debtor_id && t.creditor_id == creditor_id)
            .cloned()
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Transfer pair {} -> {} is not part of event {}'s settlement",
                    debtor_id, creditor_id, event_id
                ))
            })?;

        let debtor = option_to_result(
            self.participant_repo.find_by_id(debtor_id).await?,
            &format!("Participant {} not found", debtor_id),
        )?;
        let creditor = option_to_result(
            self.participant_repo.find_by_id(creditor_id).await?,
            &format!("Participant {} not found", creditor_id),
        )?;

        let is_settled = self
            .settlement_repo
            .toggle_with_log(
                event_id,
                debtor_id,
                creditor_id,
                transfer.amount,
                &debtor.name,
                &creditor.name,
                &settlement.event_title,
            )
            .await?;

        info!(
            "Settlement toggled for event {}: {} -> {} now {}",
            event_id,
            debtor.name,
            creditor.name,
            if is_settled { "settled" } else { "unsettled" }
        );

        Ok(Transfer {
            is_settled,
            ..transfer
        })
    }

    /// Read the settlement activity ledger, newest first
    pub async fn list_activity(&self) -> AppResult<Vec<SettlementActivityEntry>> {
        let entries = self
            .settlement_repo
            .list_activity(ACTIVITY_LIMIT)
            .await
            .map_err(AppError::from)?;
        Ok(entries)
    }
}
