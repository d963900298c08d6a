use crate::models::{ParticipantBalance, ParticipantRole, Transfer};
use crate::settlement::epsilon;
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

/// Transfer resolution service: nets signed balances into directed
/// debtor → creditor instructions via greedy largest-debtor /
/// largest-creditor matching.
pub struct TransferResolver;

impl TransferResolver {
    /// Resolve one event's balances into transfer instructions.
    ///
    /// Ties on remaining amount break toward the smaller participant id, so
    /// the output is a pure function of the input balances. Residues at or
    /// below [`epsilon`] are rounding slack and are dropped, never emitted.
    pub fn resolve(&self, event_id: Uuid, balances: &[ParticipantBalance]) -> Vec<Transfer> {
        let eps = epsilon();

        // Pools of remaining amounts, both held positive. Settled
        // participants are excluded by role, with the same epsilon used for
        // classification.
        let mut debtors: Vec<(Uuid, Decimal)> = balances
            .iter()
            .filter(|bal| bal.role == ParticipantRole::Debtor)
            .map(|bal| (bal.participant_id, -bal.balance))
            .collect();
        let mut creditors: Vec<(Uuid, Decimal)> = balances
            .iter()
            .filter(|bal| bal.role == ParticipantRole::Creditor)
            .map(|bal| (bal.participant_id, bal.balance))
            .collect();

        let mut transfers = Vec::new();

        while !debtors.is_empty() && !creditors.is_empty() {
            let debtor_idx = largest_remaining(&debtors);
            let creditor_idx = largest_remaining(&creditors);

            let (debtor_id, debtor_remaining) = debtors[debtor_idx];
            let (creditor_id, creditor_remaining) = creditors[creditor_idx];

            let amount = debtor_remaining.min(creditor_remaining);
            transfers.push(Transfer {
                event_id,
                debtor_id,
                creditor_id,
                amount,
                is_settled: false,
            });

            debtors[debtor_idx].1 -= amount;
            creditors[creditor_idx].1 -= amount;

            if debtors[debtor_idx].1 <= eps {
                debtors.swap_remove(debtor_idx);
            }
            if creditors[creditor_idx].1 <= eps {
                creditors.swap_remove(creditor_idx);
            }
        }

        // By conservation both pools drain together; anything left behind is
        // fair-share rounding slack.
        debug_assert!(debtors.iter().all(|(_, rem)| *rem <= eps * Decimal::TEN));
        debug_assert!(creditors.iter().all(|(_, rem)| *rem <= eps * Decimal::TEN));

        transfers
    }

    /// Attach persisted settled flags to a freshly resolved transfer set.
    ///
    /// Flags are keyed by `(debtor_id, creditor_id)` within one event; a pair
    /// with no record defaults to unsettled. A flag set when the amount was
    /// different still applies: settlement tracks the pair relationship, not
    /// a historic amount.
    pub fn merge_settled_flags(
        &self,
        transfers: &mut [Transfer],
        flags: &HashMap<(Uuid, Uuid), bool>,
    ) {
        for transfer in transfers.iter_mut() {
            transfer.is_settled = flags
                .get(&(transfer.debtor_id, transfer.creditor_id))
                .copied()
                .unwrap_or(false);
        }
    }
}

/// Index of the entry with the largest remaining amount; ties break toward
/// the smaller id so selection is total and deterministic.
fn largest_remaining(pool: &[(Uuid, Decimal)]) -> usize {
    pool.iter()
        .enumerate()
        .max_by(|(_, (id_a, amount_a)), (_, (id_b, amount_b))| {
            amount_a.cmp(amount_b).then_with(|| id_b.cmp(id_a))
        })
        .map(|(idx, _)| idx)
        .expect("pool checked non-empty before selection")
}
