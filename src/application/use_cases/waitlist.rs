use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use waitlist_types::{ExternalRecordId, WaitlistEntry};

use crate::{
    app_error::{AppError, AppResult},
    application::validators::{is_present, is_valid_email},
};

/// Credentials for the workspace database the waitlist is written to.
pub struct WorkspaceCredentials {
    secret: SecretString,
    database_id: String,
}

impl WorkspaceCredentials {
    pub fn new(secret: &str, database_id: &str) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            database_id: database_id.to_string(),
        }
    }

    /// Both parts must be non-empty, otherwise the relay treats the workspace as unconfigured.
    pub fn from_parts(secret: Option<&SecretString>, database_id: Option<&str>) -> Option<Self> {
        let secret = secret.map(|s| s.expose_secret()).filter(|s| !s.is_empty())?;
        let database_id = database_id.filter(|d| !d.is_empty())?;
        Some(Self::new(secret, database_id))
    }

    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }
}

impl std::fmt::Debug for WorkspaceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceCredentials")
            .field("secret", &"[REDACTED]")
            .field("database_id", &self.database_id)
            .finish()
    }
}

/// The external workspace that durably stores accepted entries.
#[async_trait]
pub trait WorkspaceClient: Send + Sync {
    /// Create one record for `entry` in the credentials' database.
    ///
    /// A rejection by the workspace must come back as `AppError::Upstream`
    /// carrying the raw response body.
    async fn create_entry(
        &self,
        credentials: &WorkspaceCredentials,
        entry: &WaitlistEntry,
    ) -> AppResult<ExternalRecordId>;
}

#[derive(Clone)]
pub struct WaitlistUseCases {
    workspace: Arc<dyn WorkspaceClient>,
    credentials: Option<Arc<WorkspaceCredentials>>,
}

impl WaitlistUseCases {
    pub fn new(
        workspace: Arc<dyn WorkspaceClient>,
        credentials: Option<WorkspaceCredentials>,
    ) -> Self {
        Self {
            workspace,
            credentials: credentials.map(Arc::new),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Validate a sign-up and forward it to the workspace.
    ///
    /// Checks run in a fixed order and the first failure wins; nothing is
    /// sent upstream unless all of them pass.
    #[instrument(skip(self, name, email))]
    pub async fn add_to_waitlist(&self, name: &str, email: &str) -> AppResult<ExternalRecordId> {
        if !is_present(name) || !is_present(email) {
            return Err(AppError::InvalidInput("Name and email are required".into()));
        }

        if !is_valid_email(email) {
            return Err(AppError::InvalidInput("Invalid email format".into()));
        }

        let Some(credentials) = self.credentials.as_deref() else {
            tracing::error!("Notion credentials not configured");
            return Err(AppError::Configuration(
                "Notion credentials not configured on server".into(),
            ));
        };

        tracing::info!(database_id = %credentials.database_id(), "Forwarding entry to Notion");

        let entry = WaitlistEntry::new(name, email);
        let id = self.workspace.create_entry(credentials, &entry).await?;

        tracing::info!(id = %id, "Added to waitlist");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingWorkspaceClient, test_credentials};

    fn use_cases(workspace: Arc<RecordingWorkspaceClient>) -> WaitlistUseCases {
        WaitlistUseCases::new(workspace, Some(test_credentials()))
    }

    #[tokio::test]
    async fn forwards_valid_entry_and_returns_upstream_id() {
        let workspace = Arc::new(RecordingWorkspaceClient::returning_id("abc-123"));
        let id = use_cases(workspace.clone())
            .add_to_waitlist("Ada", "ada@example.com")
            .await
            .unwrap();

        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(
            workspace.recorded(),
            vec![WaitlistEntry::new("Ada", "ada@example.com")]
        );
    }

    #[tokio::test]
    async fn missing_field_fails_before_email_check() {
        let workspace = Arc::new(RecordingWorkspaceClient::returning_id("unused"));
        let err = use_cases(workspace.clone())
            .add_to_waitlist("", "not-an-email")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(msg) if msg == "Name and email are required"));
        assert_eq!(workspace.call_count(), 0);
    }

    #[tokio::test]
    async fn validation_runs_before_configuration_check() {
        let workspace = Arc::new(RecordingWorkspaceClient::returning_id("unused"));
        let unconfigured = WaitlistUseCases::new(workspace.clone(), None);

        let err = unconfigured
            .add_to_waitlist("Bob", "not-an-email")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg == "Invalid email format"));

        let err = unconfigured
            .add_to_waitlist("Bob", "bob@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(workspace.call_count(), 0);
    }

    #[tokio::test]
    async fn upstream_rejection_is_returned_untouched() {
        let workspace = Arc::new(RecordingWorkspaceClient::rejecting(
            400,
            "Bad Request",
            r#"{"object":"error","code":"validation_error"}"#,
        ));
        let err = use_cases(workspace.clone())
            .add_to_waitlist("Ada", "ada@example.com")
            .await
            .unwrap_err();

        match err {
            AppError::Upstream { status, body, .. } => {
                assert_eq!(status, 400);
                assert_eq!(body, r#"{"object":"error","code":"validation_error"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(workspace.call_count(), 1);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn logs_do_not_carry_submitter_details() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let workspace = Arc::new(RecordingWorkspaceClient::returning_id("abc-123"));
        use_cases(workspace)
            .add_to_waitlist("Ada Lovelace", "ada@example.com")
            .await
            .unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("add_to_waitlist"));
        assert!(output.contains("abc-123"));
        assert!(!output.contains("Ada Lovelace"));
        assert!(!output.contains("ada@example.com"));
    }

    #[test]
    fn credentials_require_both_parts() {
        let secret = SecretString::new("secret_abc".into());
        let empty = SecretString::new("".into());

        assert!(WorkspaceCredentials::from_parts(Some(&secret), Some("db")).is_some());
        assert!(WorkspaceCredentials::from_parts(Some(&secret), None).is_none());
        assert!(WorkspaceCredentials::from_parts(Some(&secret), Some("")).is_none());
        assert!(WorkspaceCredentials::from_parts(Some(&empty), Some("db")).is_none());
        assert!(WorkspaceCredentials::from_parts(None, Some("db")).is_none());
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let rendered = format!("{:?}", test_credentials());
        assert!(!rendered.contains("secret_test"));
        assert!(rendered.contains("REDACTED"));
    }
}
