//! Pure expense-settlement engine.
//!
//! [`balance`] turns one event's contributions into per-participant net
//! balances (Balance Calculator); [`transfer`] nets those balances into a
//! list of directed transfer instructions and merges in the persisted
//! settled flags (Transfer Resolver). Both are synchronous, deterministic,
//! and free of I/O. Every read derives the full settlement from scratch;
//! only the flags and the activity ledger are durable.

pub mod balance;
pub mod transfer;

pub use balance::{BalanceCalculator, EventBalances};
pub use transfer::TransferResolver;

use rust_decimal::Decimal;

/// Tolerance for settled-boundary classification and residue handling:
/// half the minimum currency increment.
pub fn epsilon() -> Decimal {
    Decimal::new(5, 3) // 0.005
}
