use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Contribution model linking an item to an event, optionally with a payer
/// and a cost.
///
/// The cost is stored as a decimal string (TEXT in the database). An absent,
/// empty, zero, or non-numeric cost all mean "no cost assigned": an in-kind
/// item that carries no monetary weight. That leniency is a domain rule, not
/// an error path, so cost parsing lives here and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contribution {
    pub id: Uuid,
    pub event_id: Uuid,
    pub item_id: Uuid,
    pub participant_id: Option<Uuid>,
    pub cost: Option<String>, // decimal string, e.g. "125.50"
    pub created_at: NaiveDateTime,
}

impl Contribution {
    /// Create a new Contribution
    pub fn new(
        event_id: Uuid,
        item_id: Uuid,
        participant_id: Option<Uuid>,
        cost: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            item_id,
            participant_id,
            cost,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Parse the cost string into a monetary amount.
    ///
    /// Returns `None` for absent, empty, or malformed values and for amounts
    /// that are zero or negative; all of them mean "no cost assigned".
    pub fn cost_amount(&self) -> Option<Decimal> {
        let raw = self.cost.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match Decimal::from_str(raw) {
            Ok(amount) if amount > Decimal::ZERO => Some(amount),
            _ => None,
        }
    }

    /// Whether this contribution carries a positive monetary cost
    pub fn is_costed(&self) -> bool {
        self.cost_amount().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution_with_cost(cost: Option<&str>) -> Contribution {
        Contribution::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Some(Uuid::new_v4()),
            cost.map(|s| s.to_string()),
        )
    }

    #[test]
    fn test_cost_amount_parses_decimal_string() {
        let contribution = contribution_with_cost(Some("125.50"));
        assert_eq!(contribution.cost_amount(), Some(Decimal::new(12550, 2)));
    }

    #[test]
    fn test_cost_amount_lenient_on_missing_and_garbage() {
        assert_eq!(contribution_with_cost(None).cost_amount(), None);
        assert_eq!(contribution_with_cost(Some("")).cost_amount(), None);
        assert_eq!(contribution_with_cost(Some("   ")).cost_amount(), None);
        assert_eq!(contribution_with_cost(Some("abc")).cost_amount(), None);
        assert_eq!(contribution_with_cost(Some("12,5")).cost_amount(), None);
    }

    #[test]
    fn test_cost_amount_zero_means_no_cost() {
        assert_eq!(contribution_with_cost(Some("0")).cost_amount(), None);
        assert_eq!(contribution_with_cost(Some("0.00")).cost_amount(), None);
        assert_eq!(contribution_with_cost(Some("-5")).cost_amount(), None);
    }
}
