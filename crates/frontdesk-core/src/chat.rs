use frontdesk_schema::{Phase, Turn, TurnOrigin};
use frontdesk_transport::{Endpoint, QueryTransport, RawResponse, TransportError};
use uuid::Uuid;

use crate::session::{failure_message, CONCIERGE_APOLOGY};
use crate::validate;

/// Concierge chat: an append-only transcript plus the submit/settle loop.
///
/// The machine is split into a synchronous core (`begin` / `settle`) and an
/// async `submit` that composes them around the one suspension point, the
/// transport call. `Pending` is therefore a real observable state: `begin`
/// enters it and exactly one `settle` leaves it.
pub struct ChatSession {
    transcript: Vec<Turn>,
    phase: Phase,
    draft: String,
    next_turn_id: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            phase: Phase::Idle,
            draft: String::new(),
            next_turn_id: 1,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// The most recent assistant turn, if any. After a failed submission
    /// this is the apology turn.
    pub fn latest_reply(&self) -> Option<&Turn> {
        self.transcript.iter().rev().find(|turn| !turn.is_user())
    }

    /// Start a submission from the current draft. No-op (returns `None`)
    /// while a request is in flight or when the trimmed draft is empty; the
    /// guard holds regardless of any UI-side gating. On dispatch the user
    /// turn is appended immediately and the draft is cleared.
    pub fn begin(&mut self) -> Option<String> {
        if self.phase.is_pending() {
            return None;
        }
        let question = self.draft.trim();
        if question.is_empty() {
            return None;
        }
        let question = question.to_string();
        self.push_turn(TurnOrigin::User, question.clone());
        self.draft.clear();
        self.phase = Phase::Pending;
        Some(question)
    }

    /// Apply the single outcome of an in-flight submission. Ignored unless
    /// the session is `Pending`; every settle appends exactly one assistant
    /// turn so the failure stays visible in-transcript.
    pub fn settle(&mut self, outcome: Result<RawResponse, TransportError>) {
        if !self.phase.is_pending() {
            return;
        }
        match outcome {
            Ok(raw) => match validate::interpret_reply(&raw) {
                Ok(text) => {
                    self.push_turn(TurnOrigin::Assistant, text);
                    self.phase = Phase::Succeeded;
                }
                Err(err) => {
                    self.push_turn(TurnOrigin::Assistant, CONCIERGE_APOLOGY.to_string());
                    self.phase = Phase::Failed(err.to_string());
                }
            },
            Err(err) => {
                self.push_turn(TurnOrigin::Assistant, CONCIERGE_APOLOGY.to_string());
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
        tracing::debug!(%trace_id, "dispatching concierge question");
        let outcome = transport.send(Endpoint::Concierge, &question).await;
        if let Err(err) = &outcome {
            tracing::warn!(%trace_id, error = %err, "concierge submission failed");
        }
        self.settle(outcome);
        true
    }

    fn push_turn(&mut self, origin: TurnOrigin, text: String) {
        let id = self.next_turn_id;
        self.next_turn_id += 1;
        self.transcript.push(match origin {
            TurnOrigin::User => Turn::user(id, text),
            TurnOrigin::Assistant => Turn::assistant(id, text),
        });
    }
}
