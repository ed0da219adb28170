//! Ledger error types.

use thiserror::Error;

use crate::game::Chips;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Backing store could not be read or written
    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing store holds something other than a balance map
    #[error("Ledger file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Not enough chips for the requested deduction
    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientFunds { available: Chips, required: Chips },

    /// Amount must be positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(Chips),

    /// Balance would not fit in a chip count
    #[error("Balance overflow")]
    BalanceOverflow,
}

impl LedgerError {
    /// Get a client-safe error message.
    ///
    /// Storage failures are reported generically so file paths and parser
    /// output never reach a player.
    pub fn client_message(&self) -> String {
        match self {
            LedgerError::Io(_) | LedgerError::Corrupt(_) => {
                "Balances are temporarily unavailable".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Whether the error came from the backing store rather than the request.
    pub fn is_persistence(&self) -> bool {
        matches!(self, LedgerError::Io(_) | LedgerError::Corrupt(_))
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
