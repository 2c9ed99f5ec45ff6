//! Link creation and retrieval service.

use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entities::{NewLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::domain::validation::{
    DEFAULT_BATCH_MAX_SIZE, LinkCandidate, MAX_SHORTCODE_LENGTH, ValidatedEntry, validate_batch,
};
use crate::error::AppError;
use crate::infrastructure::event_log::{EventLogger, packages};
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code};
use serde_json::json;
use tracing::{debug, error, info, warn};

/// Generated codes tried at each length before the length grows by one.
pub const CODE_ATTEMPTS_PER_LENGTH: usize = 10;

/// A batch entry that failed validation or insertion.
#[derive(Debug)]
pub struct ItemFailure {
    /// 1-based position in the submitted batch.
    pub index: usize,
    pub error: AppError,
}

/// Result of adding a batch of candidates.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Created links in input order.
    pub created: Vec<ShortLink>,
    /// Failures ordered by batch position.
    pub errors: Vec<ItemFailure>,
}

/// Lengths to try for generated codes: [`CODE_ATTEMPTS_PER_LENGTH`] tries at
/// `start`, then as many at each longer length up to the shortcode maximum.
fn code_lengths(start: usize) -> impl Iterator<Item = usize> + Send {
    (start..=MAX_SHORTCODE_LENGTH)
        .flat_map(|length| std::iter::repeat_n(length, CODE_ATTEMPTS_PER_LENGTH))
}

fn code_space_exhausted(start: usize) -> AppError {
    AppError::internal(
        "Failed to generate unique code",
        json!({ "reason": "code_space_exhausted", "startLength": start }),
    )
}

/// Service for validating, creating and retrieving short links.
///
/// Explicit codes are checked once and rejected on collision. Generated codes
/// are retried under a bounded budget that widens the code length when a
/// length keeps colliding.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    clock: Arc<dyn Clock>,
    events: EventLogger,
    code_length: usize,
    batch_max_size: usize,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service with default code length and batch size.
    pub fn new(link_repository: Arc<L>, clock: Arc<dyn Clock>, events: EventLogger) -> Self {
        Self {
            link_repository,
            clock,
            events,
            code_length: DEFAULT_CODE_LENGTH,
            batch_max_size: DEFAULT_BATCH_MAX_SIZE,
        }
    }

    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    pub fn with_batch_max_size(mut self, batch_max_size: usize) -> Self {
        self.batch_max_size = batch_max_size;
        self
    }

    /// Picks the code for a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateShortcode`] if `requested` is taken; it is
    /// never replaced by a generated code.
    ///
    /// Returns [`AppError::Internal`] when every generated attempt collides.
    pub async fn allocate_code(&self, requested: Option<&str>) -> Result<String, AppError> {
        match requested {
            Some(code) => {
                if self.link_repository.code_exists(code).await? {
                    return Err(AppError::duplicate(code));
                }
                Ok(code.to_string())
            }
            None => {
                let mut lengths = code_lengths(self.code_length);
                self.next_free_code(&mut lengths).await
            }
        }
    }

    async fn next_free_code(
        &self,
        lengths: &mut (impl Iterator<Item = usize> + Send),
    ) -> Result<String, AppError> {
        for length in lengths {
            let code = generate_code(length);
            if !self.link_repository.code_exists(&code).await? {
                return Ok(code);
            }
            debug!(length, "Generated code collided");
        }

        Err(code_space_exhausted(self.code_length))
    }

    /// Allocates a code for a validated entry and inserts it.
    ///
    /// A generated code that is taken between the availability check and the
    /// insert is regenerated from the same attempt budget.
    ///
    /// # Errors
    ///
    /// See [`Self::allocate_code`]; storage failures are passed through.
    pub async fn add_link(&self, entry: ValidatedEntry) -> Result<ShortLink, AppError> {
        let now = self.clock.now();
        let new_link = |shortcode: String| NewLink {
            original_url: entry.original_url.clone(),
            shortcode,
            expiry_at: entry.expiry_at,
            expiry_minutes: entry.expiry_minutes,
        };

        let link = match entry.shortcode.as_deref() {
            Some(requested) => {
                let code = self.allocate_code(Some(requested)).await?;
                self.link_repository.insert(new_link(code), now).await?
            }
            None => {
                let mut lengths = code_lengths(self.code_length);
                loop {
                    let code = self.next_free_code(&mut lengths).await?;
                    match self.link_repository.insert(new_link(code), now).await {
                        Err(AppError::DuplicateShortcode { code }) => {
                            debug!(%code, "Generated code taken at insert, regenerating");
                        }
                        other => break other?,
                    }
                }
            }
        };

        metrics::counter!("links_created_total").increment(1);
        info!(code = %link.shortcode, expiry_at = %link.expiry_at, "Short link created");
        self.events.info(
            packages::SHORTENER,
            format!(
                "URL shortened: {} -> {} (expires {})",
                link.original_url,
                link.shortcode,
                link.expiry_at.to_rfc3339()
            ),
        );

        Ok(link)
    }

    /// Validates and adds a batch of candidates.
    ///
    /// Every candidate is processed; validation, duplicate and storage failures
    /// are reported per item next to the links that were created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] when the batch itself is empty or too
    /// large. Nothing is created in that case.
    pub async fn add_links(&self, candidates: &[LinkCandidate]) -> Result<BatchOutcome, AppError> {
        let now = self.clock.now();
        let validation = validate_batch(candidates, self.batch_max_size, now)?;

        let mut outcome = BatchOutcome::default();

        for item in validation.errors {
            self.events.warn(
                packages::VALIDATION,
                format!(
                    "Validation failed for {} (item {}): {}",
                    item.error.field, item.index, item.error
                ),
            );
            outcome.errors.push(ItemFailure {
                index: item.index,
                error: item.error.into(),
            });
        }

        for entry in validation.valid {
            let index = entry.index;
            match self.add_link(entry).await {
                Ok(link) => outcome.created.push(link),
                Err(error) => {
                    debug!(index, "Batch item failed: {}", error);
                    outcome.errors.push(ItemFailure { index, error });
                }
            }
        }

        outcome.errors.sort_by_key(|failure| failure.index);

        if !outcome.errors.is_empty() {
            warn!(
                created = outcome.created.len(),
                failed = outcome.errors.len(),
                "Some URLs failed to save"
            );
            self.events.warn(
                packages::SHORTENER,
                format!("Some URLs failed to save: {} errors", outcome.errors.len()),
            );
        }

        Ok(outcome)
    }

    /// Returns a link by code, whether or not it has expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `code`.
    pub async fn get_link(&self, code: &str) -> Result<ShortLink, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::link_not_found(code))
    }

    /// Lists every stored link in insertion order.
    ///
    /// Storage failures are logged and yield an empty list.
    pub async fn list_links(&self) -> Vec<ShortLink> {
        match self.link_repository.list().await {
            Ok(links) => links,
            Err(e) => {
                error!("Failed to list links: {}", e);
                self.events
                    .error(packages::STORAGE, format!("Failed to retrieve URLs: {e}"));
                Vec::new()
            }
        }
    }

    /// Removes every link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store cannot be cleared.
    pub async fn clear_all(&self) -> Result<(), AppError> {
        self.link_repository.clear_all().await?;
        info!("All links cleared");
        self.events.info(packages::STORAGE, "All data cleared");
        Ok(())
    }
}
