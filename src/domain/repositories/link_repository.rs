//! Repository trait for short link data access.

use crate::domain::entities::{Click, NewLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for the link collection.
///
/// The repository is the only place shortcode uniqueness is enforced: every
/// mutation is a single check-and-modify step that cannot interleave with
/// another mutation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SlotLinkRepository`] - JSON document in a slot store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link created at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateShortcode`] if any stored link, expired or
    /// not, already uses the code.
    ///
    /// Returns [`AppError::Storage`] on persistence errors.
    async fn insert(&self, new_link: NewLink, now: DateTime<Utc>) -> Result<ShortLink, AppError>;

    /// Finds a link by its code, including links past their expiry that have
    /// not been swept yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on persistence errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Returns whether `code` is taken.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on persistence errors.
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;

    /// Appends a click to the link and bumps its counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `code`.
    /// Returns [`AppError::Expired`] if `now` is past the link's expiry; nothing
    /// is recorded in that case.
    /// Returns [`AppError::Storage`] on persistence errors.
    async fn record_click(
        &self,
        code: &str,
        click: Click,
        now: DateTime<Utc>,
    ) -> Result<ShortLink, AppError>;

    /// Removes every link whose expiry is before `now`.
    ///
    /// Returns the number of links removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on persistence errors.
    async fn delete_expired_before(&self, now: DateTime<Utc>) -> Result<usize, AppError>;

    /// Removes every link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on persistence errors.
    async fn clear_all(&self) -> Result<(), AppError>;

    /// Lists all links in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on persistence errors.
    async fn list(&self) -> Result<Vec<ShortLink>, AppError>;
}
