//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidType`] thrown when a transaction type is not `income` or
//!   `outcome`.
//! - [`InsufficientBalance`] thrown when an outcome exceeds the current total.
//! - [`MaxBalanceReached`] thrown when a total would no longer fit in cents.
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`InvalidRecord`] thrown when an import source cannot be read or parsed.
//!
//!  [`InvalidType`]: EngineError::InvalidType
//!  [`InsufficientBalance`]: EngineError::InsufficientBalance
//!  [`MaxBalanceReached`]: EngineError::MaxBalanceReached
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidRecord`]: EngineError::InvalidRecord
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid type: {0}")]
    InvalidType(String),
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),
    #[error("Max balance reached: {0}")]
    MaxBalanceReached(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Suggested status code for surfacing the error to a client.
    ///
    /// Validation failures are client errors, a missing key is a not-found
    /// and storage failures are internal errors.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidType(_)
            | Self::InsufficientBalance(_)
            | Self::MaxBalanceReached(_)
            | Self::InvalidAmount(_)
            | Self::InvalidName(_)
            | Self::InvalidRecord(_) => 400,
            Self::KeyNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidType(a), Self::InvalidType(b)) => a == b,
            (Self::InsufficientBalance(a), Self::InsufficientBalance(b)) => a == b,
            (Self::MaxBalanceReached(a), Self::MaxBalanceReached(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidRecord(a), Self::InvalidRecord(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
