//! Per-participant view of a chain.
//!
//! [`LedgerFilter`] walks every block in chain order, keeps the transactions
//! that name the target as sender or recipient, and tallies the net balance.
//! It is a pure pass over borrowed data: no I/O and no logging, so callers
//! decide what to report.

use crate::core::blocks::Block;
use crate::utils::error::WalletError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sent => "sent",
            Direction::Received => "received",
        }
    }

    /// Sign applied to an amount when it is added to the balance.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            Direction::Sent => -amount,
            Direction::Received => amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredEntry {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilteredLedger {
    pub entries: Vec<FilteredEntry>,
    pub balance: f64,
}

#[derive(Debug, Clone)]
pub struct LedgerFilter {
    target: String,
}

impl LedgerFilter {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Exact comparison; a missing party never matches, not even an empty target.
    pub fn matches(&self, party: Option<&str>) -> bool {
        party == Some(self.target.as_str())
    }

    /// Collects the transactions involving the target and the resulting balance.
    ///
    /// A transaction where the target is the sender counts as sent, even when
    /// it is also the recipient. The amount of every matching transaction must
    /// be a non-negative number; otherwise the whole pass fails with
    /// [`WalletError::InvalidAmount`]. Non-matching transactions are not
    /// inspected beyond their parties.
    pub fn filter_and_tally(&self, chain: &[Block]) -> Result<FilteredLedger, WalletError> {
        let mut ledger = FilteredLedger::default();

        for (block_index, block) in chain.iter().enumerate() {
            for (tx_index, tx) in block.transactions.iter().enumerate() {
                let direction = if self.matches(tx.sender()) {
                    Direction::Sent
                } else if self.matches(tx.recipient()) {
                    Direction::Received
                } else {
                    continue;
                };

                let amount = tx.amount().ok_or_else(|| WalletError::InvalidAmount {
                    block: block_index,
                    transaction: tx_index,
                    value: tx.raw_amount(),
                })?;

                ledger.balance += direction.signed(amount);
                ledger.entries.push(FilteredEntry {
                    sender: tx.sender().unwrap_or_default().to_string(),
                    recipient: tx.recipient().unwrap_or_default().to_string(),
                    amount,
                    direction,
                });
            }
        }

        Ok(ledger)
    }
}
