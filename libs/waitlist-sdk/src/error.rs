use thiserror::Error;

use crate::flow::FlowStep;

/// Failures of a single submission to the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Relay endpoint or credential missing or unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Relay answered with a non-2xx status
    #[error("{reason}")]
    Rejected { status: u16, reason: String },

    /// Request never completed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Relay answered 2xx but the body was not a success body
    #[error("Unexpected response from relay: {0}")]
    InvalidResponse(String),
}

/// Failures of the local ledger. Never surfaced by a submission.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage unavailable: {0}")]
    Storage(String),

    #[error("Ledger data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Requests the flow controller refuses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("Name and email are required")]
    IncompleteForm,

    #[error("Not allowed while {0}")]
    InvalidState(FlowStep),
}
