//! Validation of candidate link entries.
//!
//! All validators are pure: they take raw input (and the current instant where
//! expiry matters) and return either the normalized value or a
//! [`ValidationError`] naming the offending field and the reason.
//!
//! - [`url`] - URL presence, length, scheme and shape
//! - [`shortcode`] - Custom shortcode rules (declarative rule table)
//! - [`expiry`] - Expiry minutes parsing and range checks
//! - [`batch`] - Batch-level checks and per-item aggregation

pub mod batch;
pub mod expiry;
pub mod shortcode;
pub mod url;

use serde::Serialize;
use std::fmt;

pub use batch::{
    BatchError, BatchValidation, DEFAULT_BATCH_MAX_SIZE, ItemError, LinkCandidate, ValidatedEntry,
    candidates_from_json, validate_batch,
};
pub use expiry::{
    DEFAULT_EXPIRY_MINUTES, ExpiryInput, MAX_EXPIRY_MINUTES, MIN_EXPIRY_MINUTES, validate_expiry,
};
pub use shortcode::{MAX_SHORTCODE_LENGTH, MIN_SHORTCODE_LENGTH, RESERVED_WORDS, validate_shortcode};
pub use url::{MAX_URL_LENGTH, validate_url};

/// The candidate field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Url,
    Shortcode,
    Expiry,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Url => "url",
            Field::Shortcode => "shortcode",
            Field::Expiry => "expiry",
        };
        f.write_str(name)
    }
}

/// Why an expiry value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryIssue {
    NotANumber,
    BelowMinimum,
    AboveMaximum,
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "issue", rename_all = "snake_case")]
pub enum Reason {
    Empty,
    TooShort,
    TooLong,
    InvalidFormat,
    InvalidChars,
    Reserved,
    DuplicateInBatch,
    InvalidExpiry(ExpiryIssue),
}

/// A user-correctable validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: Field,
    pub reason: Reason,
}

impl ValidationError {
    pub fn new(field: Field, reason: Reason) -> Self {
        Self { field, reason }
    }

    /// Human-readable message suitable for showing next to the input.
    pub fn message(&self) -> String {
        match (self.field, self.reason) {
            (Field::Url, Reason::Empty) => "URL is required".to_string(),
            (Field::Url, Reason::TooLong) => {
                format!("URL is too long (max {MAX_URL_LENGTH} characters)")
            }
            (Field::Url, _) => "Please enter a valid URL".to_string(),
            (Field::Shortcode, Reason::TooShort) => format!(
                "Shortcode must be at least {MIN_SHORTCODE_LENGTH} characters long"
            ),
            (Field::Shortcode, Reason::TooLong) => format!(
                "Shortcode must be at most {MAX_SHORTCODE_LENGTH} characters long"
            ),
            (Field::Shortcode, Reason::InvalidChars) => {
                "Shortcode can only contain letters and numbers".to_string()
            }
            (Field::Shortcode, Reason::Reserved) => "This shortcode is reserved".to_string(),
            (Field::Shortcode, Reason::DuplicateInBatch) => {
                "Duplicate shortcode in batch".to_string()
            }
            (Field::Expiry, Reason::InvalidExpiry(ExpiryIssue::NotANumber)) => {
                "Expiry must be a number".to_string()
            }
            (Field::Expiry, Reason::InvalidExpiry(ExpiryIssue::BelowMinimum)) => {
                format!("Expiry must be at least {MIN_EXPIRY_MINUTES} minute")
            }
            (Field::Expiry, Reason::InvalidExpiry(ExpiryIssue::AboveMaximum)) => {
                "Expiry cannot exceed 1 year".to_string()
            }
            (field, _) => format!("Invalid {field}"),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationError {}
