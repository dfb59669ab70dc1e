use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use waitlist_types::{ExternalRecordId, WaitlistEntry};

use crate::{
    app_error::{AppError, AppResult},
    use_cases::waitlist::{WorkspaceClient, WorkspaceCredentials},
};

/// Writes waitlist entries as pages of a Notion database.
#[derive(Clone)]
pub struct NotionWorkspaceClient {
    client: Client,
    api_url: Url,
    notion_version: String,
}

impl NotionWorkspaceClient {
    pub fn new(client: Client, api_url: Url, notion_version: String) -> Self {
        Self {
            client,
            api_url,
            notion_version,
        }
    }

    fn pages_url(&self) -> String {
        format!("{}/pages", self.api_url.as_str().trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct CreatePageReq<'a> {
    parent: Parent<'a>,
    properties: Properties<'a>,
}

#[derive(Serialize)]
struct Parent<'a> {
    database_id: &'a str,
}

#[derive(Serialize)]
struct Properties<'a> {
    #[serde(rename = "Name")]
    name: TitleProperty<'a>,
    #[serde(rename = "Email")]
    email: EmailProperty<'a>,
}

#[derive(Serialize)]
struct TitleProperty<'a> {
    title: [RichText<'a>; 1],
}

#[derive(Serialize)]
struct RichText<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent<'a>,
}

#[derive(Serialize)]
struct TextContent<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct EmailProperty<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct CreatedPage {
    id: String,
}

impl<'a> CreatePageReq<'a> {
    fn new(database_id: &'a str, entry: &'a WaitlistEntry) -> Self {
        Self {
            parent: Parent { database_id },
            properties: Properties {
                name: TitleProperty {
                    title: [RichText {
                        kind: "text",
                        text: TextContent {
                            content: &entry.name,
                        },
                    }],
                },
                email: EmailProperty {
                    email: &entry.email,
                },
            },
        }
    }
}

#[async_trait]
impl WorkspaceClient for NotionWorkspaceClient {
    async fn create_entry(
        &self,
        credentials: &WorkspaceCredentials,
        entry: &WaitlistEntry,
    ) -> AppResult<ExternalRecordId> {
        let body = CreatePageReq::new(credentials.database_id(), entry);

        let response = self
            .client
            .post(self.pages_url())
            .bearer_auth(credentials.secret())
            .header("Notion-Version", &self.notion_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reach Notion API: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                status_text = %status_text,
                error = %body,
                "Notion API error"
            );
            return Err(AppError::Upstream {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        let page: CreatedPage = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Invalid response from Notion API: {e}")))?;

        Ok(ExternalRecordId::new(page.id))
    }
}
