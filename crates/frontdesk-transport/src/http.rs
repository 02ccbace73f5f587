use std::time::Duration;

use async_trait::async_trait;
use frontdesk_schema::ChatQuery;

use crate::{Endpoint, QueryTransport, RawResponse, TransportError};

/// HTTP client for the remote query service. Holds the base URL and a
/// configured reqwest client; owns no session state and never retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn send(
        &self,
        endpoint: Endpoint,
        question: &str,
    ) -> Result<RawResponse, TransportError> {
        let request = match endpoint {
            Endpoint::Concierge => self
                .client
                .post(format!("{}/api/hotel", self.base_url))
                .json(&ChatQuery {
                    question: question.to_string(),
                }),
            Endpoint::Directory => self
                .client
                .get(format!("{}/api/chat", self.base_url))
                .query(&[("question", question)]),
        };

        let response = request.send().await.map_err(TransportError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            // Best effort on the body; the status alone is still useful.
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "query service returned an error status");
            return Err(TransportError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(TransportError::from_reqwest)?;
        Ok(RawResponse { body })
    }
}
