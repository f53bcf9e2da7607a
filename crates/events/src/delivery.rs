//! Single-attempt delivery of revalidation signals to the frontend.
//!
//! [`RevalidationWebhook`] POSTs `{"paths": [...]}` to the configured URL.
//! There is no retry: a missed signal only leaves a page stale until its
//! next scheduled regeneration.

use std::time::Duration;

/// Header carrying the shared revalidation secret.
pub const SECRET_HEADER: &str = "x-revalidate-secret";

/// HTTP request timeout for a delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// RevalidationWebhook
// ---------------------------------------------------------------------------

/// Client for the frontend's on-demand revalidation endpoint.
pub struct RevalidationWebhook {
    client: reqwest::Client,
    url: String,
    secret: Option<String>,
}

impl RevalidationWebhook {
    /// Create a webhook client for `url`, signing requests with `secret`.
    pub fn new(url: impl Into<String>, secret: Option<String>) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
            secret,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the paths once and check the response status.
    pub async fn deliver(&self, paths: &[String]) -> Result<(), WebhookError> {
        let payload = serde_json::json!({ "paths": paths });

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(secret) = &self.secret {
            request = request.header(SECRET_HEADER, secret);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
