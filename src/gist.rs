//! Publishing a file as a GitHub gist.
//!
//! One-shot, no retries: a network or API failure is terminal for this
//! action only and the session carries on.

use crate::http_client::HttpClient;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

const GIST_API_URL: &str = "https://api.github.com/gists";

/// Failure of one publish attempt.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Could not reach the gist service: {0}")]
    Transport(#[from] anyhow::Error),
    #[error("Gist service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Gist service response did not include a URL")]
    MissingUrl,
}

#[derive(Debug, Deserialize)]
struct GistResponse {
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GistApiError {
    message: String,
}

/// Uploads named files to the gist API under a caller-provided credential.
pub struct GistPublisher {
    client: Box<dyn HttpClient>,
}

impl GistPublisher {
    pub fn new(client: Box<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Publishes one file and returns the browsable URL.
    pub async fn publish(
        &self,
        filename: &str,
        content: &str,
        token: &str,
        description: &str,
        public: bool,
    ) -> Result<String, PublishError> {
        let body = json!({
            "description": description,
            "public": public,
            "files": {
                filename: { "content": content }
            }
        });

        let auth = format!("Bearer {}", token);
        let response = self
            .client
            .post_json(
                GIST_API_URL,
                &[
                    ("Authorization", auth.as_str()),
                    ("Accept", "application/vnd.github+json"),
                    ("User-Agent", "fiat"),
                ],
                &body,
            )
            .await?;

        if !response.is_success() {
            let message = serde_json::from_str::<GistApiError>(&response.body)
                .map(|e| e.message)
                .unwrap_or_else(|_| response.body.clone());
            return Err(PublishError::Api {
                status: response.status,
                message,
            });
        }

        let parsed: GistResponse =
            serde_json::from_str(&response.body).map_err(|_| PublishError::MissingUrl)?;

        let url = parsed.html_url.ok_or(PublishError::MissingUrl)?;
        info!("Published gist: {}", url);
        Ok(url)
    }
}
