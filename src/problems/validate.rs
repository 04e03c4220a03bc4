use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub const MIN_PROBLEM_CHARS: usize = 10;
pub const MAX_PROBLEM_CHARS: usize = 5000;

/// Inputs are cut to this many characters before any length check runs.
pub const INPUT_HARD_CEILING: usize = 10_000;

// Shared by the server gate and the submission form, so both sides agree
// on what an email looks like: local@domain.tld, no whitespace.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("known-valid pattern"));

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSubmission {
    #[error("Email and problem are required")]
    MissingFields,

    #[error("Invalid email format")]
    BadEmail,

    #[error("Problem description too short (min 10 characters)")]
    TooShort,

    #[error("Problem description too long (max 5000 characters)")]
    TooLong,
}

pub fn email_is_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Trim, then cut to the hard ceiling.
pub fn sanitize(input: &str) -> String {
    input.trim().chars().take(INPUT_HARD_CEILING).collect()
}

/// The authoritative gate behind Create. Checks run in the same order the
/// caller-facing messages imply: presence, email shape, then problem
/// length bounds on the sanitized text. Returns the pair exactly as it
/// will be stored (trimmed, email lower-cased).
pub fn validate_submission(
    email: Option<&str>,
    problem: Option<&str>,
) -> Result<(String, String), InvalidSubmission> {
    let (Some(email), Some(problem)) = (email, problem) else {
        return Err(InvalidSubmission::MissingFields);
    };
    if email.is_empty() || problem.is_empty() {
        return Err(InvalidSubmission::MissingFields);
    }
    if !email_is_valid(email) {
        return Err(InvalidSubmission::BadEmail);
    }

    let email = sanitize(email).to_lowercase();
    let problem = sanitize(problem);

    let len = problem.chars().count();
    if len < MIN_PROBLEM_CHARS {
        return Err(InvalidSubmission::TooShort);
    }
    if len > MAX_PROBLEM_CHARS {
        return Err(InvalidSubmission::TooLong);
    }

    Ok((email, problem))
}
