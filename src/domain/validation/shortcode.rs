//! Custom shortcode validation.
//!
//! Rules are kept in a table of predicates with named failure reasons so each
//! rule can be tested on its own and the order of evaluation is explicit.

use super::{Field, Reason, ValidationError};

/// Minimum custom shortcode length.
pub const MIN_SHORTCODE_LENGTH: usize = 3;

/// Maximum custom shortcode length.
pub const MAX_SHORTCODE_LENGTH: usize = 20;

/// Codes that cannot be claimed because they collide with application routes.
///
/// Compared case-insensitively.
pub const RESERVED_WORDS: &[&str] = &[
    "admin", "api", "www", "app", "help", "about", "contact", "terms", "privacy", "health",
];

/// A single shortcode rule: the code passes when `check` returns true.
pub struct ShortcodeRule {
    pub reason: Reason,
    pub check: fn(&str) -> bool,
}

/// Rules in evaluation order; the first failing rule decides the reason.
pub const SHORTCODE_RULES: &[ShortcodeRule] = &[
    ShortcodeRule {
        reason: Reason::TooShort,
        check: |code| code.chars().count() >= MIN_SHORTCODE_LENGTH,
    },
    ShortcodeRule {
        reason: Reason::TooLong,
        check: |code| code.chars().count() <= MAX_SHORTCODE_LENGTH,
    },
    ShortcodeRule {
        reason: Reason::InvalidChars,
        check: |code| code.chars().all(|c| c.is_ascii_alphanumeric()),
    },
    ShortcodeRule {
        reason: Reason::Reserved,
        check: |code| {
            !RESERVED_WORDS
                .iter()
                .any(|word| word.eq_ignore_ascii_case(code))
        },
    },
];

/// Validates an optional custom shortcode.
///
/// Absent or blank input is valid and yields `None`, meaning a code will be
/// generated. Otherwise the trimmed code must pass every rule in
/// [`SHORTCODE_RULES`].
///
/// # Errors
///
/// Returns a [`ValidationError`] on [`Field::Shortcode`] with reason
/// `TooShort`, `TooLong`, `InvalidChars`, or `Reserved`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_shortcode(None).unwrap(), None);
/// assert_eq!(validate_shortcode(Some(" Promo25 ")).unwrap(), Some("Promo25".to_string()));
/// assert!(validate_shortcode(Some("ab")).is_err());
/// assert!(validate_shortcode(Some("Admin")).is_err());
/// ```
pub fn validate_shortcode(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(code) = raw.map(str::trim).filter(|code| !code.is_empty()) else {
        return Ok(None);
    };

    if let Some(rule) = SHORTCODE_RULES.iter().find(|rule| !(rule.check)(code)) {
        return Err(ValidationError::new(Field::Shortcode, rule.reason));
    }

    Ok(Some(code.to_string()))
}
