use crate::app_error::AppError;
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use waitlist_types::ErrorResponse;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        match &self {
            AppError::InvalidInput(_) | AppError::MethodNotAllowed | AppError::NotFound => {
                tracing::warn!(code = %self.code(), error = %self, "Request rejected")
            }
            _ => tracing::error!(code = %self.code(), error = ?self, "Request failed"),
        }

        match self {
            AppError::InvalidInput(msg) => error_resp(StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::MethodNotAllowed => error_resp(
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse::new("Method not allowed"),
            ),
            AppError::NotFound => error_resp(StatusCode::NOT_FOUND, ErrorResponse::new("Not found")),
            AppError::Configuration(details) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Server configuration error").with_details(details),
            ),
            AppError::Upstream {
                status,
                status_text,
                body,
            } => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to add to waitlist")
                    .with_details(format!("Notion API error: {status} {status_text}"))
                    .with_notion_error(body),
            ),
            AppError::Internal(details) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal server error").with_details(details),
            ),
        }
    }
}

fn error_resp(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}
