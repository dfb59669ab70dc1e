//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` backed by an in-memory
//! workspace client instead of the Notion API.

use std::sync::Arc;

use crate::{
    adapters::http::app_state::AppState,
    infra::config::AppConfig,
    test_utils::{RecordingWorkspaceClient, test_credentials},
    use_cases::waitlist::{WaitlistUseCases, WorkspaceClient},
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let workspace = Arc::new(RecordingWorkspaceClient::returning_id("abc-123"));
/// let app_state = TestAppStateBuilder::new()
///     .with_workspace(workspace.clone())
///     .build();
/// ```
pub struct TestAppStateBuilder {
    workspace: Option<Arc<dyn WorkspaceClient>>,
    configured: bool,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            workspace: None,
            configured: true,
        }
    }

    /// Use a specific workspace client (keep a clone to assert on calls).
    pub fn with_workspace(mut self, workspace: Arc<dyn WorkspaceClient>) -> Self {
        self.workspace = Some(workspace);
        self
    }

    /// Simulate a relay started without Notion credentials.
    pub fn without_credentials(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn build(self) -> AppState {
        let workspace = self
            .workspace
            .unwrap_or_else(|| Arc::new(RecordingWorkspaceClient::returning_id("test-page-id")));
        let credentials = self.configured.then(test_credentials);

        AppState {
            config: Arc::new(AppConfig::default()),
            waitlist_use_cases: Arc::new(WaitlistUseCases::new(workspace, credentials)),
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
