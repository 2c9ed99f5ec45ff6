//! Expiry validation.

use super::{ExpiryIssue, Field, Reason, ValidationError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Validity period applied when none is requested.
pub const DEFAULT_EXPIRY_MINUTES: i64 = 30;

/// Shortest accepted validity period.
pub const MIN_EXPIRY_MINUTES: i64 = 1;

/// Longest accepted validity period (one year).
pub const MAX_EXPIRY_MINUTES: i64 = 525_600;

/// Raw expiry value as submitted by a client.
///
/// Clients send either a JSON number or a string from a form field; anything
/// else is kept so it can be reported as not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpiryInput {
    Minutes(i64),
    Text(String),
    Other(serde_json::Value),
}

impl From<i64> for ExpiryInput {
    fn from(minutes: i64) -> Self {
        Self::Minutes(minutes)
    }
}

impl From<&str> for ExpiryInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

fn expiry_error(issue: ExpiryIssue) -> ValidationError {
    ValidationError::new(Field::Expiry, Reason::InvalidExpiry(issue))
}

/// Validates an optional expiry in minutes and computes the expiry instant.
///
/// Absent input and blank text default to [`DEFAULT_EXPIRY_MINUTES`].
///
/// # Returns
///
/// `(expiry_at, minutes)` where `expiry_at = now + minutes`.
///
/// # Errors
///
/// Returns a [`ValidationError`] on [`Field::Expiry`] when the value is not an
/// integer or falls outside `[MIN_EXPIRY_MINUTES, MAX_EXPIRY_MINUTES]`.
pub fn validate_expiry(
    input: Option<&ExpiryInput>,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, i64), ValidationError> {
    let minutes = match input {
        None => DEFAULT_EXPIRY_MINUTES,
        Some(ExpiryInput::Minutes(minutes)) => *minutes,
        Some(ExpiryInput::Text(text)) if text.trim().is_empty() => DEFAULT_EXPIRY_MINUTES,
        Some(ExpiryInput::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| expiry_error(ExpiryIssue::NotANumber))?,
        Some(ExpiryInput::Other(_)) => return Err(expiry_error(ExpiryIssue::NotANumber)),
    };

    if minutes < MIN_EXPIRY_MINUTES {
        return Err(expiry_error(ExpiryIssue::BelowMinimum));
    }

    if minutes > MAX_EXPIRY_MINUTES {
        return Err(expiry_error(ExpiryIssue::AboveMaximum));
    }

    Ok((now + Duration::minutes(minutes), minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_of(input: ExpiryInput) -> ExpiryIssue {
        match validate_expiry(Some(&input), Utc::now()).unwrap_err().reason {
            Reason::InvalidExpiry(issue) => issue,
            other => panic!("unexpected reason {other:?}"),
        }
    }

    #[test]
    fn test_absent_defaults_to_thirty_minutes() {
        let now = Utc::now();
        let (expiry_at, minutes) = validate_expiry(None, now).unwrap();

        assert_eq!(minutes, DEFAULT_EXPIRY_MINUTES);
        assert_eq!(expiry_at, now + Duration::minutes(30));
    }

    #[test]
    fn test_blank_text_defaults() {
        let now = Utc::now();
        let (_, minutes) = validate_expiry(Some(&ExpiryInput::from("  ")), now).unwrap();

        assert_eq!(minutes, DEFAULT_EXPIRY_MINUTES);
    }

    #[test]
    fn test_accepts_numbers_and_numeric_text() {
        let now = Utc::now();

        let (expiry_at, minutes) = validate_expiry(Some(&ExpiryInput::from(90)), now).unwrap();
        assert_eq!(minutes, 90);
        assert_eq!(expiry_at, now + Duration::minutes(90));

        let (_, minutes) = validate_expiry(Some(&ExpiryInput::from(" 15 ")), now).unwrap();
        assert_eq!(minutes, 15);
    }

    #[test]
    fn test_range_bounds() {
        let now = Utc::now();

        assert!(validate_expiry(Some(&ExpiryInput::from(MIN_EXPIRY_MINUTES)), now).is_ok());
        assert!(validate_expiry(Some(&ExpiryInput::from(MAX_EXPIRY_MINUTES)), now).is_ok());

        assert_eq!(issue_of(ExpiryInput::from(0)), ExpiryIssue::BelowMinimum);
        assert_eq!(issue_of(ExpiryInput::from(-5)), ExpiryIssue::BelowMinimum);
        assert_eq!(
            issue_of(ExpiryInput::from(MAX_EXPIRY_MINUTES + 1)),
            ExpiryIssue::AboveMaximum
        );
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert_eq!(issue_of(ExpiryInput::from("soon")), ExpiryIssue::NotANumber);
        assert_eq!(issue_of(ExpiryInput::from("15abc")), ExpiryIssue::NotANumber);
        assert_eq!(issue_of(ExpiryInput::from("1.5")), ExpiryIssue::NotANumber);
    }

    #[test]
    fn test_deserializes_json_shapes() {
        let number: ExpiryInput = serde_json::from_str("45").unwrap();
        let text: ExpiryInput = serde_json::from_str("\"45\"").unwrap();
        let other: ExpiryInput = serde_json::from_str("1.5").unwrap();

        assert_eq!(number, ExpiryInput::Minutes(45));
        assert_eq!(text, ExpiryInput::Text("45".to_string()));
        assert!(matches!(other, ExpiryInput::Other(_)));
        assert_eq!(issue_of(other), ExpiryIssue::NotANumber);
    }
}
