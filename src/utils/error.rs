use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid amount in block {block}, transaction {transaction}: {value}")]
    InvalidAmount {
        block: usize,
        transaction: usize,
        value: String,
    },

    #[error("Chain fetch error: {0}")]
    FetchError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No ID provided yet")]
    MissingIdentity,
}
