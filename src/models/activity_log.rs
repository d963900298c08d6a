//! Append-only settlement activity ledger.
//!
//! Entries are captured by value (names and title copied at write time, no
//! foreign keys) so they remain queryable after the underlying event or
//! participants are deleted. There is deliberately no update or delete path
//! for them anywhere in the crate.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Action recorded by a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementAction {
    /// A transfer was marked settled
    Payment,
    /// A previously settled transfer was marked unsettled again
    Cancellation,
}

impl SettlementAction {
    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementAction::Payment => "payment",
            SettlementAction::Cancellation => "cancellation",
        }
    }

    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "payment" => Ok(SettlementAction::Payment),
            "cancellation" => Ok(SettlementAction::Cancellation),
            _ => Err(format!("Invalid settlement action: {}", s)),
        }
    }

    /// The action that records a transition into the given settled state
    pub fn for_transition(now_settled: bool) -> Self {
        if now_settled {
            SettlementAction::Payment
        } else {
            SettlementAction::Cancellation
        }
    }
}

impl From<String> for SettlementAction {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(SettlementAction::Payment)
    }
}

impl From<SettlementAction> for String {
    fn from(action: SettlementAction) -> Self {
        action.as_str().to_string()
    }
}

/// One immutable ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SettlementActivityEntry {
    pub id: Uuid,
    pub action: String, // stored as TEXT, use SettlementAction for type safety
    pub amount: Decimal,
    pub debtor_name: String,
    pub creditor_name: String,
    pub event_title: String,
    pub created_at: NaiveDateTime,
}

impl SettlementActivityEntry {
    /// Get the action as an enum
    pub fn action_enum(&self) -> SettlementAction {
        SettlementAction::from_str(&self.action).unwrap_or(SettlementAction::Payment)
    }
}
