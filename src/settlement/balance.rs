use crate::models::{Contribution, ParticipantBalance, ParticipantRole};
use crate::settlement::epsilon;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Balances derived from one event's contributions
#[derive(Debug, Clone)]
pub struct EventBalances {
    /// Distinct participants with at least one contribution (costed or not);
    /// the basis of the fair share
    pub participant_count: u32,
    /// Sum of assigned costs (contributions that have a payer)
    pub total_costed: Decimal,
    /// `total_costed / participant_count`, rounded to currency precision
    pub fair_share: Decimal,
    /// Sum of costs with no payer attached; reported separately, never
    /// divided among participants
    pub unassigned_costs: Decimal,
    /// One entry per contributing participant, ordered by participant id
    pub balances: Vec<ParticipantBalance>,
}

/// Balance calculation service
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Compute per-participant balances for one event.
    ///
    /// # Arguments
    /// * `contributions` - All contributions recorded for the event
    /// * `names` - Display names for the participants that appear as payers
    ///
    /// # Returns
    /// Fair share, unassigned costs, and one classified balance per
    /// contributing participant. Invariant: the balances sum to zero within
    /// `epsilon() * participant_count` (fair-share rounding is the only
    /// slack source).
    pub fn compute(
        &self,
        contributions: &[Contribution],
        names: &HashMap<Uuid, String>,
    ) -> EventBalances {
        // BTreeMap keyed by participant id keeps output order deterministic.
        let mut paid_by_participant: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        let mut total_costed = Decimal::ZERO;
        let mut unassigned_costs = Decimal::ZERO;

        for contribution in contributions {
            let cost = contribution.cost_amount();
            match contribution.participant_id {
                Some(participant_id) => {
                    let paid = paid_by_participant.entry(participant_id).or_insert(Decimal::ZERO);
                    if let Some(cost) = cost {
                        *paid += cost;
                        total_costed += cost;
                    }
                }
                None => {
                    if let Some(cost) = cost {
                        unassigned_costs += cost;
                    }
                }
            }
        }

        let participant_count = paid_by_participant.len() as u32;
        if participant_count == 0 {
            // Terminal case, not an error: nothing to divide, no balances.
            return EventBalances {
                participant_count: 0,
                total_costed,
                fair_share: Decimal::ZERO,
                unassigned_costs,
                balances: Vec::new(),
            };
        }

        let fair_share = (total_costed / Decimal::from(participant_count))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let eps = epsilon();
        let balances = paid_by_participant
            .into_iter()
            .map(|(participant_id, total_paid)| {
                let balance = total_paid - fair_share;
                let role = if balance > eps {
                    ParticipantRole::Creditor
                } else if balance < -eps {
                    ParticipantRole::Debtor
                } else {
                    ParticipantRole::Settled
                };
                ParticipantBalance {
                    participant_id,
                    name: names
                        .get(&participant_id)
                        .cloned()
                        .unwrap_or_else(|| participant_id.to_string()),
                    total_paid,
                    balance,
                    role,
                }
            })
            .collect();

        EventBalances {
            participant_count,
            total_costed,
            fair_share,
            unassigned_costs,
            balances,
        }
    }
}
