use frontdesk_schema::{RawCandidate, StudentRecord};
use frontdesk_transport::RawResponse;
use thiserror::Error;

/// The raw payload could not be interpreted at all. Distinct from
/// [`RosterOutcome::Empty`], which is a legitimate "no matches".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the service returned an empty reply")]
    EmptyPayload,
    #[error("could not interpret the service response: {0}")]
    Malformed(String),
}

/// Text strategy (concierge chat): any non-blank body is accepted verbatim
/// as assistant text.
pub fn interpret_reply(raw: &RawResponse) -> Result<String, ValidationError> {
    let text = raw.body.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyPayload);
    }
    Ok(text.to_string())
}

/// Result of interpreting a directory response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterOutcome {
    /// At least one candidate arrived. `dropped` counts the rows discarded
    /// by the filter; an all-dropped batch is `records: []`, not `Empty`.
    Records {
        records: Vec<StudentRecord>,
        dropped: usize,
    },
    /// The service explicitly returned zero rows.
    Empty,
}

/// Record-collection strategy (directory search). A body that is not a JSON
/// array is malformed; an absent or empty array is `Empty`; anything else is
/// filtered row by row.
pub fn interpret_roster(raw: &RawResponse) -> Result<RosterOutcome, ValidationError> {
    let text = raw.body.trim();
    if text.is_empty() {
        return Ok(RosterOutcome::Empty);
    }
    let candidates: Vec<RawCandidate> =
        serde_json::from_str(text).map_err(|err| ValidationError::Malformed(err.to_string()))?;
    if candidates.is_empty() {
        return Ok(RosterOutcome::Empty);
    }
    let (records, dropped) = filter_candidates(candidates);
    Ok(RosterOutcome::Records { records, dropped })
}

/// Pure filter: promote each candidate or drop it. Dropped rows are logged,
/// never surfaced to the user; the batch as a whole survives.
pub fn filter_candidates(candidates: Vec<RawCandidate>) -> (Vec<StudentRecord>, usize) {
    let total = candidates.len();
    let records: Vec<StudentRecord> = candidates
        .into_iter()
        .filter_map(|candidate| match candidate.clone().promote() {
            Some(record) => Some(record),
            None => {
                tracing::warn!(?candidate, "dropping incomplete directory row");
                None
            }
        })
        .collect();
    let kept = records.len();
    (records, total - kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(body: &str) -> RawResponse {
        RawResponse {
            body: body.to_string(),
        }
    }

    fn candidate(name: &str, school: &str, phone: &str) -> RawCandidate {
        RawCandidate {
            name: Some(name.to_string()),
            school: Some(school.to_string()),
            phone: Some(phone.to_string()),
        }
    }

    #[test]
    fn interpret_reply_accepts_text() {
        assert_eq!(interpret_reply(&raw("Welcome!")).unwrap(), "Welcome!");
    }

    #[test]
    fn interpret_reply_trims_surrounding_whitespace() {
        assert_eq!(interpret_reply(&raw("  Welcome!\n")).unwrap(), "Welcome!");
    }

    #[test]
    fn interpret_reply_rejects_blank_body() {
        assert_eq!(
            interpret_reply(&raw("   \n")).unwrap_err(),
            ValidationError::EmptyPayload
        );
    }

    #[test]
    fn interpret_roster_empty_array_is_empty_outcome() {
        assert_eq!(interpret_roster(&raw("[]")).unwrap(), RosterOutcome::Empty);
    }

    #[test]
    fn interpret_roster_blank_body_is_empty_outcome() {
        assert_eq!(interpret_roster(&raw("")).unwrap(), RosterOutcome::Empty);
    }

    #[test]
    fn interpret_roster_non_array_is_malformed() {
        let err = interpret_roster(&raw(r#"{"oops": true}"#)).unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn interpret_roster_filters_incomplete_rows() {
        let body = serde_json::json!([
            {"name": "A", "school": "S", "phone": "1"},
            {"name": "", "school": "S2", "phone": "2"}
        ])
        .to_string();
        let outcome = interpret_roster(&raw(&body)).unwrap();
        match outcome {
            RosterOutcome::Records { records, dropped } => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].name, "A");
                assert_eq!(dropped, 1);
            }
            RosterOutcome::Empty => panic!("expected records"),
        }
    }

    #[test]
    fn interpret_roster_all_dropped_is_not_empty_outcome() {
        let body = serde_json::json!([{"name": "", "school": "", "phone": ""}]).to_string();
        let outcome = interpret_roster(&raw(&body)).unwrap();
        assert_eq!(
            outcome,
            RosterOutcome::Records {
                records: vec![],
                dropped: 1
            }
        );
    }

    #[test]
    fn filter_candidates_counts_drops() {
        let (records, dropped) = filter_candidates(vec![
            candidate("Ada Park", "West High", "010-1111-2222"),
            RawCandidate::default(),
            candidate("Ben Cho", "Riverside High", "010-3333-4444"),
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn filter_candidates_keeps_input_order() {
        let (records, _) = filter_candidates(vec![
            candidate("Ben Cho", "Riverside High", "010-3333-4444"),
            candidate("Ada Park", "West High", "010-1111-2222"),
        ]);
        assert_eq!(records[0].name, "Ben Cho");
        assert_eq!(records[1].name, "Ada Park");
    }
}
