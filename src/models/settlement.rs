//! Derived settlement view types and the persisted settled-flag record.
//!
//! Everything here except [`SettlementFlag`] is computed fresh on every read;
//! only the flag and the activity ledger are durable state.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role of a participant within one event's settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Creditor,
    Debtor,
    Settled,
}

impl ParticipantRole {
    /// Convert to database/API string
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Creditor => "creditor",
            ParticipantRole::Debtor => "debtor",
            ParticipantRole::Settled => "settled",
        }
    }

    /// Convert from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "creditor" => Ok(ParticipantRole::Creditor),
            "debtor" => Ok(ParticipantRole::Debtor),
            "settled" => Ok(ParticipantRole::Settled),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Per-participant balance within one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantBalance {
    pub participant_id: Uuid,
    pub name: String,
    pub total_paid: Decimal,
    pub balance: Decimal,
    pub role: ParticipantRole,
}

/// One directed transfer instruction (debtor pays creditor).
///
/// Identified by the ordered triple `(event_id, debtor_id, creditor_id)`;
/// at most one active transfer exists per triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub event_id: Uuid,
    pub debtor_id: Uuid,
    pub creditor_id: Uuid,
    pub amount: Decimal,
    pub is_settled: bool,
}

/// Persisted settled-flag record for one transfer pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SettlementFlag {
    pub event_id: Uuid,
    pub debtor_id: Uuid,
    pub creditor_id: Uuid,
    pub is_settled: bool,
    pub updated_at: NaiveDateTime,
}

/// Full settlement view for one event (derived, never persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSettlement {
    pub event_id: Uuid,
    pub event_title: String,
    pub event_date: NaiveDateTime,
    pub participant_count: u32,
    pub total_costed: Decimal,
    pub fair_share: Decimal,
    pub unassigned_costs: Decimal,
    pub balances: Vec<ParticipantBalance>,
    pub transactions: Vec<Transfer>,
}
