use std::{net::SocketAddr, path::PathBuf, time::Duration};

use env_helpers::get_env_default;
use secrecy::SecretString;
use url::Url;

use crate::infra::error::InfraError;

pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Notion integration secret. Optional at startup: without it every
    /// submission is answered with a configuration error.
    pub notion_secret: Option<SecretString>,
    /// Id of the database new waitlist pages are created in.
    pub notion_database_id: Option<String>,
    pub notion_api_url: Url,
    pub notion_version: String,
    pub upstream_timeout: Duration,
    /// Where the JSON log layer writes. No file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", default_bind_addr());

        let notion_secret = optional_env("NOTION_SECRET").map(|s| SecretString::new(s.into()));
        let notion_database_id = optional_env("NOTION_DATABASE_ID");

        let notion_api_url: Url =
            get_env_default("NOTION_API_URL", DEFAULT_NOTION_API_URL.to_string())
                .parse()
                .map_err(|_| InfraError::InvalidConfig {
                    var: "NOTION_API_URL",
                })?;
        let notion_version: String =
            get_env_default("NOTION_VERSION", DEFAULT_NOTION_VERSION.to_string());
        let upstream_timeout_secs: u64 = get_env_default("UPSTREAM_TIMEOUT_SECS", 30);
        let log_file = optional_env("LOG_FILE").map(PathBuf::from);

        Ok(Self {
            bind_addr,
            notion_secret,
            notion_database_id,
            notion_api_url,
            notion_version,
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            log_file,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            notion_secret: None,
            notion_database_id: None,
            notion_api_url: Url::parse(DEFAULT_NOTION_API_URL)
                .expect("default Notion API URL is a valid URL"),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            upstream_timeout: Duration::from_secs(30),
            log_file: None,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3001))
}

/// Unset and empty variables are both treated as absent.
fn optional_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}
