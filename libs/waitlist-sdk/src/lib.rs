//! Client SDK for the waitlist relay.
//!
//! # Features
//!
//! - **Submission** - `RelayClient` posts a sign-up to the relay and turns the
//!   response into a receipt or a displayable failure reason
//! - **Local ledger** - best-effort record of past sign-ups behind a swappable
//!   key-value store, used for a position estimate
//! - **Flow state** - `FlowController` sequences landing, pending and success
//!   the way a sign-up form presents them
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use waitlist_sdk::{FlowController, LocalLedger, MemoryStore, RelayClient, RelayConfig};
//!
//! let config = RelayConfig::from_base_url("https://relay.example.com", "anon-key")?;
//! let client = RelayClient::new(config, LocalLedger::new(Arc::new(MemoryStore::new())))?;
//!
//! let flow = FlowController::new(Arc::new(client));
//! flow.set_name("Ada");
//! flow.set_email("ada@example.com");
//! let snapshot = flow.submit().await?;
//! ```

mod client;
mod error;
mod flow;
mod ledger;
mod reveal;
mod store;

pub use client::{RelayClient, RelayConfig, SubmitReceipt, WaitlistSubmitter};
pub use error::{FlowError, LedgerError, RelayError};
pub use flow::{CANCELLED_REASON, FlowController, FlowSnapshot, FlowStep, FlowTimings};
pub use ledger::{LEDGER_KEY, LedgerRecord, LocalLedger};
pub use reveal::{RevealSchedule, RevealStep};
pub use store::{FileStore, KeyValueStore, MemoryStore, NoopStore};

// Re-export shared types for convenience
pub use waitlist_types::{ExternalRecordId, WaitlistEntry};
