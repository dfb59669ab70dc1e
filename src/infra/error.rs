use thiserror::Error;

/// Infrastructure errors that can occur during application startup.
///
/// Display messages never include configuration values, so secrets do not
/// end up in logs or console output.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: environment variable {var} is not valid")]
    InvalidConfig { var: &'static str },

    #[error("HTTP client construction failed")]
    HttpClient(#[source] reqwest::Error),

    #[error("Log file could not be opened")]
    LogFile(#[source] std::io::Error),

    #[error("TCP bind failed")]
    TcpBind(#[source] std::io::Error),

    #[error("Server error")]
    Server(#[source] std::io::Error),
}
