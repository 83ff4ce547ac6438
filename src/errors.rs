use chrono::NaiveDate;
use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("no open cash-drawer session for {0}")]
    DrawerClosed(NaiveDate),
    #[error("tendered {tendered:.2} is below the payable {required:.2}")]
    InsufficientTender { required: f64, tendered: f64 },
    #[error("purchase order `{0}` not found")]
    UnknownPurchaseOrder(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}
