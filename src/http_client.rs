//! HTTP client abstraction for external API communication.
//!
//! Both network components (the code generator and the gist publisher) go
//! through this trait, so tests can inject canned responses instead of
//! making real requests.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Status code plus body of an HTTP response.
///
/// The status is kept alongside the text because callers report API errors
/// differently from transport errors.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP communication with external APIs.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a POST request with JSON body and returns the response.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to send the request to
    /// * `headers` - Key-value pairs of headers to include
    /// * `body` - The JSON body to send
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures (connection refused,
    /// timeout); HTTP error statuses come back as a normal [`HttpResponse`].
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse>;
}

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default configuration.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.json(body).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(HttpResponse { status: 200, body: String::new() }.is_success());
        assert!(HttpResponse { status: 201, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 301, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 401, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 500, body: String::new() }.is_success());
    }
}
