use serde::{Deserialize, Serialize};

use crate::ExternalRecordId;

/// Message sent with every successful submission.
pub const SUCCESS_MESSAGE: &str = "Successfully added to waitlist";

/// Body of a `200` from the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToWaitlistResponse {
    pub success: bool,

    /// Id of the record created in the workspace, passed through untouched.
    pub id: ExternalRecordId,

    pub message: String,
}

impl AddToWaitlistResponse {
    pub fn created(id: ExternalRecordId) -> Self {
        Self {
            success: true,
            id,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Body of every non-2xx response from the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short, stable description of what went wrong.
    pub error: String,

    /// Extra context, e.g. the upstream status line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Raw body returned by the workspace API when it rejected the record.
    #[serde(
        rename = "notionError",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub notion_error: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            notion_error: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_notion_error(mut self, body: impl Into<String>) -> Self {
        self.notion_error = Some(body.into());
        self
    }
}
