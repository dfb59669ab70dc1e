//! Client-side record of sign-ups made from this device.
//!
//! The ledger is append-only and local: its length approximates a waitlist
//! position but is never authoritative, since other clients do not share it.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waitlist_types::{ExternalRecordId, WaitlistEntry};

use crate::{
    error::LedgerError,
    store::{KeyValueStore, NoopStore},
};

/// Storage key the ledger lives under.
pub const LEDGER_KEY: &str = "waitlist";

/// One successful sign-up as remembered locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: ExternalRecordId,
    pub name: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
}

/// Clones share one append lock, so concurrent appends through clones are
/// never lost. Ledgers created separately over the same store do not
/// coordinate; share a clone instead.
#[derive(Clone)]
pub struct LocalLedger {
    store: Arc<dyn KeyValueStore>,
    append_lock: Arc<Mutex<()>>,
}

impl LocalLedger {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A ledger that remembers nothing.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopStore))
    }

    /// All records in append order. A missing key is an empty ledger.
    pub fn records(&self) -> Result<Vec<LedgerRecord>, LedgerError> {
        match self.store.get(LEDGER_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Append a record for `entry`, stamped with the current time.
    pub fn record_submission(
        &self,
        id: ExternalRecordId,
        entry: &WaitlistEntry,
    ) -> Result<LedgerRecord, LedgerError> {
        let record = LedgerRecord {
            id,
            name: entry.name.clone(),
            email: entry.email.clone(),
            timestamp: Utc::now(),
        };
        self.append(record.clone())?;
        Ok(record)
    }

    fn append(&self, record: LedgerRecord) -> Result<(), LedgerError> {
        let _lock = self
            .append_lock
            .lock()
            .map_err(|_| LedgerError::Storage("ledger lock poisoned".into()))?;
        let mut records = self.records()?;
        records.push(record);
        let raw = serde_json::to_string(&records)?;
        self.store.set(LEDGER_KEY, &raw)
    }

    pub fn position(&self) -> Result<usize, LedgerError> {
        Ok(self.records()?.len())
    }

    /// Position estimate for display, `None` when the ledger can't be read.
    pub fn estimated_position(&self) -> Option<usize> {
        match self.position() {
            Ok(position) => Some(position),
            Err(err) => {
                tracing::warn!(error = %err, "could not read waitlist ledger");
                None
            }
        }
    }
}
