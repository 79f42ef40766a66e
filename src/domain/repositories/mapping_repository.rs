//! Repository trait for short mapping storage.

use crate::domain::entities::{NewMapping, ShortMapping};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage interface for URL-to-code mappings.
///
/// The backing store is the enforcement point for both uniqueness
/// invariants: `short_code` and `original_url` carry unique constraints, so
/// a concurrent check-and-insert can never produce two live rows for the
/// same code or URL. Callers resolve constraint violations by retrying with
/// a fresh code (code collision) or re-fetching the winner (duplicate URL).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists a new mapping in a single atomic statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeCollision`] when the short code is taken and
    /// [`AppError::DuplicateUrl`] when the original URL is already mapped;
    /// [`AppError::Internal`] on other database errors.
    async fn insert(&self, new_mapping: NewMapping) -> Result<ShortMapping, AppError>;

    /// Finds a mapping by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortMapping>, AppError>;

    /// Finds a mapping by its original URL, for idempotent shortening.
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortMapping>, AppError>;

    /// Deletes every mapping with `expiry_time <= now` and returns the
    /// deleted rows so the caller can cascade to dependent click data.
    ///
    /// Mappings without an expiry are never selected. The delete is a
    /// single statement, so a failure leaves all candidates in place for
    /// the next sweep cycle.
    async fn delete_expired_before(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShortMapping>, AppError>;
}
