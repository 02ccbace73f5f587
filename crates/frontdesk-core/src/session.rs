use frontdesk_transport::TransportError;

/// Shown when the directory query legitimately matched nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results found for your search.";

/// Appended to the chat transcript when a submission fails, so the failure
/// is visible in-line like any other assistant turn.
pub const CONCIERGE_APOLOGY: &str =
    "Sorry, we are having trouble reaching the concierge right now. Please try again.";

/// Human-readable cause for a `Failed` phase, derived from the transport
/// failure kind.
pub fn failure_message(err: &TransportError) -> String {
    match err {
        TransportError::Network(detail) => {
            format!("Could not reach the service: {detail}")
        }
        TransportError::Server { status, body } if !body.trim().is_empty() => {
            format!("Server error ({status}): {}", body.trim())
        }
        TransportError::Server { status, .. } => format!("Server error ({status})"),
        TransportError::Unknown(detail) => format!("Unexpected failure: {detail}"),
    }
}
