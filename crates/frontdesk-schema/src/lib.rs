use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrigin {
    User,
    Assistant,
}

/// One message in a chat transcript. Immutable once created; the transcript
/// it belongs to is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Monotonic per-session token, never reused.
    pub id: u64,
    pub text: String,
    pub origin: TurnOrigin,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, text, TurnOrigin::User)
    }

    pub fn assistant(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, text, TurnOrigin::Assistant)
    }

    fn new(id: u64, text: impl Into<String>, origin: TurnOrigin) -> Self {
        Self {
            id,
            text: text.into(),
            origin,
            created_at: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.origin == TurnOrigin::User
    }
}

/// One validated row in the student directory. All fields are non-empty;
/// promotion from a raw candidate enforces that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    pub school: String,
    pub phone: String,
}

/// Lenient wire shape for a directory row. Fields may be missing or blank;
/// deserializing a batch never fails just because one row is incomplete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl RawCandidate {
    /// Promote to a [`StudentRecord`] if name, school and phone are all
    /// present and non-empty after trimming. Returns `None` otherwise.
    pub fn promote(self) -> Option<StudentRecord> {
        let name = non_blank(self.name)?;
        let school = non_blank(self.school)?;
        let phone = non_blank(self.phone)?;
        Some(StudentRecord {
            name,
            school,
            phone,
        })
    }
}

fn non_blank(field: Option<String>) -> Option<String> {
    let value = field?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Request body for the concierge chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatQuery {
    pub question: String,
}

/// Where a session currently stands. Exactly one tag is active; the only
/// way out of `Pending` is a single settle into `Succeeded` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl Phase {
    pub fn is_pending(&self) -> bool {
        matches!(self, Phase::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Phase::Succeeded | Phase::Failed(_))
    }
}
