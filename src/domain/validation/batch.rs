//! Batch validation of candidate links.

use super::expiry::{ExpiryInput, validate_expiry};
use super::shortcode::validate_shortcode;
use super::url::validate_url;
use super::{Field, Reason, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum number of candidates accepted in one batch by default.
pub const DEFAULT_BATCH_MAX_SIZE: usize = 5;

/// A link as submitted by a client, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkCandidate {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "code", alias = "custom_code")]
    pub shortcode: Option<String>,
    #[serde(default)]
    pub expiry: Option<ExpiryInput>,
}

impl LinkCandidate {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_shortcode(mut self, code: impl Into<String>) -> Self {
        self.shortcode = Some(code.into());
        self
    }

    pub fn with_expiry(mut self, expiry: impl Into<ExpiryInput>) -> Self {
        self.expiry = Some(expiry.into());
        self
    }
}

/// A candidate that passed every check, ready for code allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    /// 1-based position in the submitted batch.
    pub index: usize,
    pub original_url: String,
    pub shortcode: Option<String>,
    pub expiry_at: DateTime<Utc>,
    pub expiry_minutes: i64,
}

/// A validation failure tied to its 1-based batch position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemError {
    pub index: usize,
    pub error: ValidationError,
}

/// Outcome of validating a whole batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchValidation {
    pub valid: Vec<ValidatedEntry>,
    pub errors: Vec<ItemError>,
}

impl BatchValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reasons a batch is rejected before any candidate is looked at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("Invalid input format")]
    NotAList,

    #[error("At least one URL is required")]
    Empty,

    #[error("Maximum {max} URLs allowed at once")]
    TooLarge { max: usize, actual: usize },
}

/// Interprets an arbitrary JSON document as a list of candidates.
///
/// An element that does not have the expected shape still yields a
/// candidate, built from whichever fields are usable, so that it is reported
/// on its own by [`validate_batch`] instead of failing the whole batch.
///
/// # Errors
///
/// Returns [`BatchError::NotAList`] when the document is not an array.
pub fn candidates_from_json(value: serde_json::Value) -> Result<Vec<LinkCandidate>, BatchError> {
    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item.clone())
                    .unwrap_or_else(|_| LinkCandidate::salvage(&item))
            })
            .collect()),
        _ => Err(BatchError::NotAList),
    }
}

impl LinkCandidate {
    /// Keeps the string fields of a malformed element; a missing or non-text
    /// `url` is later reported as required.
    fn salvage(item: &serde_json::Value) -> Self {
        let text = |key: &str| item.get(key)?.as_str().map(str::to_string);

        Self {
            url: text("url"),
            shortcode: text("shortcode")
                .or_else(|| text("code"))
                .or_else(|| text("custom_code")),
            expiry: item
                .get("expiry")
                .and_then(|expiry| serde_json::from_value(expiry.clone()).ok()),
        }
    }
}

/// Validates a batch of candidates independently.
///
/// Every candidate is evaluated; a failing candidate never stops the others.
/// An explicit shortcode that already appeared earlier in the same batch is
/// reported as [`Reason::DuplicateInBatch`] on the later occurrence only.
///
/// # Errors
///
/// Returns [`BatchError`] for an empty batch or one larger than `max_size`.
pub fn validate_batch(
    candidates: &[LinkCandidate],
    max_size: usize,
    now: DateTime<Utc>,
) -> Result<BatchValidation, BatchError> {
    if candidates.is_empty() {
        return Err(BatchError::Empty);
    }

    if candidates.len() > max_size {
        return Err(BatchError::TooLarge {
            max: max_size,
            actual: candidates.len(),
        });
    }

    let mut outcome = BatchValidation::default();
    let mut used_codes: HashSet<String> = HashSet::new();

    for (position, candidate) in candidates.iter().enumerate() {
        let index = position + 1;
        let mut item_errors = Vec::new();

        let url = validate_url(candidate.url.as_deref().unwrap_or_default())
            .map_err(|e| item_errors.push(e))
            .ok();

        let shortcode = match validate_shortcode(candidate.shortcode.as_deref()) {
            Ok(Some(code)) if !used_codes.insert(code.clone()) => {
                item_errors.push(ValidationError::new(
                    Field::Shortcode,
                    Reason::DuplicateInBatch,
                ));
                None
            }
            Ok(code) => code,
            Err(e) => {
                item_errors.push(e);
                None
            }
        };

        let expiry = validate_expiry(candidate.expiry.as_ref(), now)
            .map_err(|e| item_errors.push(e))
            .ok();

        match (url, expiry) {
            (Some(original_url), Some((expiry_at, expiry_minutes))) if item_errors.is_empty() => {
                outcome.valid.push(ValidatedEntry {
                    index,
                    original_url,
                    shortcode,
                    expiry_at,
                    expiry_minutes,
                });
            }
            _ => {
                tracing::debug!(index, errors = item_errors.len(), "Candidate rejected");
                outcome
                    .errors
                    .extend(item_errors.into_iter().map(|error| ItemError { index, error }));
            }
        }
    }

    Ok(outcome)
}
