use crate::{
    adapters::{http::app_state::AppState, notion::NotionWorkspaceClient},
    infra::{config::AppConfig, error::InfraError, http_client},
    use_cases::waitlist::{WaitlistUseCases, WorkspaceCredentials},
};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let client = http_client::try_build_client(config.upstream_timeout)?;
    let workspace = Arc::new(NotionWorkspaceClient::new(
        client,
        config.notion_api_url.clone(),
        config.notion_version.clone(),
    ));

    let credentials = WorkspaceCredentials::from_parts(
        config.notion_secret.as_ref(),
        config.notion_database_id.as_deref(),
    );
    if credentials.is_none() {
        tracing::warn!(
            "NOTION_SECRET or NOTION_DATABASE_ID not set; submissions will fail with a configuration error"
        );
    }

    let waitlist_use_cases = WaitlistUseCases::new(workspace, credentials);

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
    })
}

pub fn init_tracing(log_file: Option<&Path>) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist_relay=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), only when a path is configured
    let json_layer = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(InfraError::LogFile)?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
