pub mod http;
pub mod stub;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpTransport;
pub use stub::StubTransport;

/// Which remote operation to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Free-text concierge chat: POST with a JSON body.
    Concierge,
    /// Student directory search: GET with a query parameter.
    Directory,
}

/// Response body exactly as received, uninterpreted. Validation happens
/// downstream, never in the transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub body: String,
}

/// Classified transport failure. Each submission surfaces at most one of
/// these; there are no retries at this layer.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request never reached the server or no response arrived
    /// (connection refused, timeout, DNS).
    #[error("network failure: {0}")]
    Network(String),
    /// The server answered with an error status.
    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },
    /// Anything that fits neither of the above.
    #[error("transport failure: {0}")]
    Unknown(String),
}

impl TransportError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::Network(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

/// The one seam between a session and the wire. Sessions are driven through
/// this trait so tests can substitute a double for the HTTP client.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn send(&self, endpoint: Endpoint, question: &str)
        -> Result<RawResponse, TransportError>;
}
