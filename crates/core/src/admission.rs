//! Grievance admission policy: validation, rate capping, and point scoring.
//!
//! The policy is a pure function over the submitted fields and the caller's
//! recent accepted-submission count. The HTTP layer resolves authentication
//! and tenant membership before invoking it, and the db layer supplies the
//! trailing-hour count; nothing here performs I/O.

use serde::Deserialize;

/// Minimum length of the trimmed details text, in characters.
///
/// Counted with `chars().count()`, not bytes, so CJK feedback of ten
/// characters passes the same as ASCII.
pub const MIN_DETAILS_LENGTH: usize = 10;

/// Maximum accepted submissions per identity in a trailing one-hour window.
pub const MAX_SUBMISSIONS_PER_HOUR: i64 = 3;

/// Points awarded to every accepted submission.
pub const BASE_POINTS: i32 = 10;

/// Additional points when the trimmed details reach 50 characters.
pub const LENGTH_BONUS_50: i32 = 5;

/// Additional points when the trimmed details reach 100 characters.
pub const LENGTH_BONUS_100: i32 = 10;

/// Ledger reason recorded for accepted submissions.
pub const REASON_SUBMISSION: &str = "submission";

/// Raw submission fields as they arrive in the request body.
///
/// Optional fields model missing JSON keys: presence is part of the policy
/// (a missing `stress_level` must reject even when everything else is valid).
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionInput {
    pub category: Option<String>,
    pub details: Option<String>,
    pub stress_level: Option<i32>,
}

/// An accepted submission, normalized and scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedSubmission {
    pub category: String,
    /// Details with surrounding whitespace removed; this is what gets stored.
    pub details: String,
    pub stress_level: i32,
    pub points: i32,
}

/// Why a submission was refused. Ordered by check priority: the first
/// failing check wins and later checks are not evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("stress level must be between 1 and 10, got {0}")]
    StressLevelOutOfRange(i32),

    #[error("details must be at least {MIN_DETAILS_LENGTH} characters")]
    TooShort,

    #[error("submission rate limit reached, try again later")]
    RateLimited,
}

/// Compute the points earned for a trimmed details text of `len` characters.
///
/// `BASE_POINTS` always, plus the larger applicable length bonus. The bonus
/// tiers do not stack.
pub fn points_for_length(len: usize) -> i32 {
    BASE_POINTS
        + if len >= 100 {
            LENGTH_BONUS_100
        } else if len >= 50 {
            LENGTH_BONUS_50
        } else {
            0
        }
}

/// Validate and score a submission's fields, ignoring the rate cap.
///
/// Field checks answer before the caller is even authenticated, so this
/// stage needs no recent-submission count. [`evaluate`] layers the rate
/// cap on top once the caller's identity is known.
///
/// Check order (first failure wins): field presence, stress-level range,
/// minimum details length.
pub fn validate(input: &SubmissionInput) -> Result<AcceptedSubmission, AdmissionError> {
    let category = match input.category.as_deref() {
        Some(c) if !c.trim().is_empty() => c.trim(),
        _ => return Err(AdmissionError::MissingField("category")),
    };
    let details = input
        .details
        .as_deref()
        .ok_or(AdmissionError::MissingField("details"))?;
    let stress_level = input
        .stress_level
        .ok_or(AdmissionError::MissingField("stress_level"))?;

    if !(1..=10).contains(&stress_level) {
        return Err(AdmissionError::StressLevelOutOfRange(stress_level));
    }

    let trimmed = details.trim();
    let len = trimmed.chars().count();
    if len < MIN_DETAILS_LENGTH {
        return Err(AdmissionError::TooShort);
    }

    Ok(AcceptedSubmission {
        category: category.to_string(),
        details: trimmed.to_string(),
        stress_level,
        points: points_for_length(len),
    })
}

/// Evaluate a submission against the full admission policy.
///
/// `recent_count` is the number of this identity's accepted grievances with
/// `created_at` in the trailing hour, as counted by the caller immediately
/// before evaluation. The count-then-insert pair is best-effort under
/// concurrent submissions by the same identity; see the crate docs.
///
/// Check order (first failure wins): field presence, stress-level range,
/// minimum details length, rate cap.
pub fn evaluate(
    input: &SubmissionInput,
    recent_count: i64,
) -> Result<AcceptedSubmission, AdmissionError> {
    let accepted = validate(input)?;

    if recent_count >= MAX_SUBMISSIONS_PER_HOUR {
        return Err(AdmissionError::RateLimited);
    }

    Ok(accepted)
}
