pub mod waitlist;

use axum::Router;

use crate::{adapters::http::app_state::AppState, app_error::AppError};

/// Path prefix the hosted relay serves functions under; mounted as well so
/// clients configured for that layout reach the same handlers.
pub const FUNCTIONS_PREFIX: &str = "/functions/v1";

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(waitlist::router())
        .nest(FUNCTIONS_PREFIX, waitlist::router())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
