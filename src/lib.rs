//! Wallet view over a simple blockchain ledger: fetches a node's chain, keeps
//! the transactions naming one participant, and tallies that participant's
//! balance.

pub mod config;
pub mod core;
pub mod utils;

pub use crate::core::{
    Direction, FilteredEntry, FilteredLedger, LedgerFilter, Wallet, WalletView,
};
pub use crate::utils::error::WalletError;
