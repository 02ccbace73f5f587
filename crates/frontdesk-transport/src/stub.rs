use async_trait::async_trait;

use crate::{Endpoint, QueryTransport, RawResponse, TransportError};

/// Answers without touching the network. Used by unit tests and the CLI's
/// `--stub` flag for offline demos.
pub struct StubTransport;

#[async_trait]
impl QueryTransport for StubTransport {
    async fn send(
        &self,
        endpoint: Endpoint,
        question: &str,
    ) -> Result<RawResponse, TransportError> {
        let body = match endpoint {
            Endpoint::Concierge => {
                format!("[stub] You asked: \"{question}\". The front desk is happy to help.")
            }
            Endpoint::Directory => serde_json::json!([
                {"name": "Ada Park", "school": "West High", "phone": "010-1111-2222"},
                {"name": "Ben Cho", "school": "Riverside High", "phone": "010-3333-4444"},
                {"name": "Mia Seo", "school": "Hillcrest High", "phone": "010-5555-6666"}
            ])
            .to_string(),
        };
        Ok(RawResponse { body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_concierge_echoes_question() {
        let raw = StubTransport
            .send(Endpoint::Concierge, "is the pool open?")
            .await
            .unwrap();
        assert!(raw.body.contains("is the pool open?"));
        assert!(raw.body.contains("[stub]"));
    }

    #[tokio::test]
    async fn stub_directory_returns_parseable_rows() {
        let raw = StubTransport
            .send(Endpoint::Directory, "everyone")
            .await
            .unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&raw.body).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].get("name").is_some());
    }
}
