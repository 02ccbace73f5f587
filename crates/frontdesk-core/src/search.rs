use frontdesk_schema::{Phase, StudentRecord};
use frontdesk_transport::{Endpoint, QueryTransport, RawResponse, TransportError};
use uuid::Uuid;

use crate::session::{failure_message, NO_RESULTS_MESSAGE};
use crate::validate::{self, RosterOutcome};

/// Directory search: no history, each query wholesale-replaces the result
/// set. The query stays in the draft after submission so the user can refine
/// it, unlike the chat draft which clears on send.
pub struct SearchSession {
    records: Vec<StudentRecord>,
    dropped: usize,
    phase: Phase,
    draft: String,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            dropped: 0,
            phase: Phase::Idle,
            draft: String::new(),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Rows discarded by the filter on the last successful query.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Start a submission from the current draft. No-op while a request is
    /// in flight or when the trimmed draft is empty. The previous result set
    /// is cleared at dispatch; whatever settles replaces it.
    pub fn begin(&mut self) -> Option<String> {
        if self.phase.is_pending() {
            return None;
        }
        let question = self.draft.trim();
        if question.is_empty() {
            return None;
        }
        let question = question.to_string();
        self.records.clear();
        self.dropped = 0;
        self.phase = Phase::Pending;
        Some(question)
    }

    /// Apply the single outcome of an in-flight submission. Ignored unless
    /// the session is `Pending`. A legitimately empty result lands in
    /// `Failed` with a "no results" message for rendering; it stays a
    /// distinct outcome at the validator layer and in the logs.
    pub fn settle(&mut self, outcome: Result<RawResponse, TransportError>) {
        if !self.phase.is_pending() {
            return;
        }
        match outcome {
            Ok(raw) => match validate::interpret_roster(&raw) {
                Ok(RosterOutcome::Records { records, dropped }) => {
                    if dropped > 0 {
                        tracing::warn!(dropped, kept = records.len(), "directory rows discarded");
                    }
                    self.records = records;
                    self.dropped = dropped;
                    self.phase = Phase::Succeeded;
                }
                Ok(RosterOutcome::Empty) => {
                    tracing::info!("directory query matched no rows");
                    self.phase = Phase::Failed(NO_RESULTS_MESSAGE.to_string());
                }
                Err(err) => {
                    self.phase = Phase::Failed(err.to_string());
                }
            },
            Err(err) => {
                self.phase = Phase::Failed(failure_message(&err));
            }
        }
    }

    /// Full submission lifecycle: guard, dispatch, settle. Returns whether a
    /// request was actually sent.
    pub async fn submit(&mut self, transport: &dyn QueryTransport) -> bool {
        let Some(question) = self.begin() else {
            return false;
        };
        let trace_id = Uuid::new_v4();
        tracing::debug!(%trace_id, "dispatching directory query");
        let outcome = transport.send(Endpoint::Directory, &question).await;
        if let Err(err) = &outcome {
            tracing::warn!(%trace_id, error = %err, "directory submission failed");
        }
        self.settle(outcome);
        true
    }
}
