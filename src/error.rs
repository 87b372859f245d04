//! Error types
//!
//! Simulation code only fails on programming errors (bad vector axis).
//! Store purchases and player-data parsing have recoverable errors.

use thiserror::Error;

/// Logic errors raised by the simulation core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("invalid axis {0}: vectors only have axes 0 (x) and 1 (y)")]
    InvalidAxis(usize),
}

/// Rejected store actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not enough cash: need ${needed}, have ${available}")]
    InsufficientCash { needed: i32, available: i32 },
    #[error("loan is already paid off")]
    LoanAlreadyPaid,
}

/// Flat key-value player data could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("missing key `{0}`")]
    MissingKey(&'static str),
    #[error("invalid value `{value}` for key `{key}`")]
    InvalidValue { key: String, value: String },
}
