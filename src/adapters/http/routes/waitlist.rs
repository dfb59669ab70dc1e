//! Waitlist sign-up route.

use std::sync::Arc;

use axum::{Json, Router, body::Bytes, extract::State, response::IntoResponse, routing::post};
use serde_json::Value;
use waitlist_types::AddToWaitlistResponse;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    use_cases::waitlist::WaitlistUseCases,
};

/// Read a string member of the request body.
///
/// Absent or `null` members, and any member of a non-object body, read as
/// empty. Other non-string values are a malformed request.
fn string_member<'a>(body: &'a Value, key: &str) -> AppResult<&'a str> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(AppError::Internal(format!(
            "`{key}` must be a string, got {other}"
        ))),
    }
}

/// POST /add-to-waitlist
/// Validates the sign-up and creates a page in the Notion database.
async fn add_to_waitlist(
    State(waitlist): State<Arc<WaitlistUseCases>>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    // Parsed by hand: a malformed body is an internal fault here, not an extractor rejection.
    let payload: Value =
        serde_json::from_slice(&body).map_err(|e| AppError::Internal(e.to_string()))?;
    if payload.is_null() {
        return Err(AppError::Internal("Request body is null".into()));
    }

    let id = waitlist
        .add_to_waitlist(
            string_member(&payload, "name")?,
            string_member(&payload, "email")?,
        )
        .await?;

    Ok(Json(AddToWaitlistResponse::created(id)))
}

/// OPTIONS /add-to-waitlist
async fn preflight() -> &'static str {
    "ok"
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/add-to-waitlist",
        post(add_to_waitlist)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}
