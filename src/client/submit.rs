use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::problems::validate;

/// The form's own cap, stricter than what the server accepts.
pub const MAX_ENTRY_CHARS: usize = 1000;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Email and problem are required")]
    MissingFields,
}

/// Body of POST /problems.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewSubmission {
    pub email: String,
    pub problem: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub timestamp: Option<OffsetDateTime>,
}

/// Form state for the public submission view. A convenience gate only;
/// the server re-validates everything independently.
#[derive(Debug, Default)]
pub struct SubmissionDraft {
    email: String,
    problem: String,
}

impl SubmissionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn problem(&self) -> &str {
        &self.problem
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Live feedback while typing: `Some` only for a non-empty value
    /// that fails the shape check.
    pub fn email_error(&self) -> Option<DraftError> {
        (!self.email.is_empty() && !validate::email_is_valid(&self.email))
            .then_some(DraftError::InvalidEmail)
    }

    /// A value past the cap is rejected whole; the draft keeps what it
    /// had. Characters beyond the cap never enter the field.
    pub fn set_problem(&mut self, problem: impl Into<String>) -> bool {
        let problem = problem.into();
        if problem.chars().count() > MAX_ENTRY_CHARS {
            return false;
        }
        self.problem = problem;
        true
    }

    pub fn char_count(&self) -> usize {
        self.problem.chars().count()
    }

    /// Final pre-submit check, producing the request body. The caller
    /// stamps the submission time.
    pub fn finish(&self, timestamp: Option<OffsetDateTime>) -> Result<NewSubmission, DraftError> {
        if self.email.is_empty() || self.problem.is_empty() {
            return Err(DraftError::MissingFields);
        }
        if !validate::email_is_valid(&self.email) {
            return Err(DraftError::InvalidEmail);
        }
        Ok(NewSubmission {
            email: self.email.clone(),
            problem: self.problem.clone(),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversize_problem_text_is_rejected_whole() {
        let mut draft = SubmissionDraft::new();
        assert!(draft.set_problem("x".repeat(MAX_ENTRY_CHARS)));
        assert_eq!(draft.char_count(), MAX_ENTRY_CHARS);

        // One char over: the previous content stays.
        assert!(!draft.set_problem("y".repeat(MAX_ENTRY_CHARS + 1)));
        assert_eq!(draft.char_count(), MAX_ENTRY_CHARS);
        assert!(draft.problem().starts_with('x'));
    }

    #[test]
    fn email_feedback_only_fires_on_non_empty_invalid_input() {
        let mut draft = SubmissionDraft::new();
        assert_eq!(draft.email_error(), None);

        draft.set_email("not-an-email");
        assert_eq!(draft.email_error(), Some(DraftError::InvalidEmail));

        draft.set_email("a@b.com");
        assert_eq!(draft.email_error(), None);
    }

    #[test]
    fn finish_requires_both_fields_and_a_valid_email() {
        let mut draft = SubmissionDraft::new();
        assert_eq!(draft.finish(None), Err(DraftError::MissingFields));

        draft.set_email("foo");
        draft.set_problem("my problem is long enough");
        assert_eq!(draft.finish(None), Err(DraftError::InvalidEmail));

        draft.set_email("foo@bar.com");
        let submission = draft.finish(None).unwrap();
        assert_eq!(submission.email, "foo@bar.com");
        assert_eq!(submission.problem, "my problem is long enough");
        assert!(submission.timestamp.is_none());
    }

    #[test]
    fn timestamp_is_omitted_from_json_when_absent() {
        let submission = NewSubmission {
            email: "a@b.com".to_owned(),
            problem: "ten chars plus some".to_owned(),
            timestamp: None,
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert!(json.get("timestamp").is_none());
    }
}
