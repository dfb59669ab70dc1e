//! In-memory mock implementation of the workspace client.

use async_trait::async_trait;
use std::sync::Mutex;
use waitlist_types::{ExternalRecordId, WaitlistEntry};

use crate::{
    app_error::{AppError, AppResult},
    use_cases::waitlist::{WorkspaceClient, WorkspaceCredentials},
};

/// Credentials used by every test that expects a configured workspace.
pub fn test_credentials() -> WorkspaceCredentials {
    WorkspaceCredentials::new("secret_test", "test-database-id")
}

enum Outcome {
    Created(String),
    Rejected {
        status: u16,
        status_text: String,
        body: String,
    },
}

/// Workspace client that answers with a fixed outcome and records each call.
pub struct RecordingWorkspaceClient {
    outcome: Outcome,
    calls: Mutex<Vec<WaitlistEntry>>,
}

impl RecordingWorkspaceClient {
    /// Every call succeeds with the given record id.
    pub fn returning_id(id: &str) -> Self {
        Self {
            outcome: Outcome::Created(id.to_string()),
            calls: Mutex::new(vec![]),
        }
    }

    /// Every call fails the way an upstream rejection does.
    pub fn rejecting(status: u16, status_text: &str, body: &str) -> Self {
        Self {
            outcome: Outcome::Rejected {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            },
            calls: Mutex::new(vec![]),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Entries forwarded so far (for test assertions).
    pub fn recorded(&self) -> Vec<WaitlistEntry> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkspaceClient for RecordingWorkspaceClient {
    async fn create_entry(
        &self,
        _credentials: &WorkspaceCredentials,
        entry: &WaitlistEntry,
    ) -> AppResult<ExternalRecordId> {
        self.calls.lock().unwrap().push(entry.clone());

        match &self.outcome {
            Outcome::Created(id) => Ok(ExternalRecordId::new(id.clone())),
            Outcome::Rejected {
                status,
                status_text,
                body,
            } => Err(AppError::Upstream {
                status: *status,
                status_text: status_text.clone(),
                body: body.clone(),
            }),
        }
    }
}
