//! Repository trait for click event storage.

use crate::domain::entities::{ClickEvent, NewClickEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for per-visit click events.
///
/// Click rows reference mappings weakly (by code, no foreign key), so
/// inserts must succeed even when the referenced mapping has already been
/// deleted. Such orphans are removed by [`Self::delete_orphaned`] during
/// the periodic sweep.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Persists a click event, orphan or not.
    async fn insert(&self, new_click: NewClickEvent) -> Result<ClickEvent, AppError>;

    /// Returns every click event recorded for a short code, oldest first.
    async fn list_by_code(&self, code: &str) -> Result<Vec<ClickEvent>, AppError>;

    /// Deletes click events referencing any of the given codes; returns the
    /// number of rows removed. A no-op for codes with no events.
    async fn delete_by_codes(&self, codes: &[String]) -> Result<u64, AppError>;

    /// Deletes click events whose referenced mapping no longer exists.
    ///
    /// This is the reconciliation pass for the accepted race between the
    /// click recorder and expiry deletion.
    async fn delete_orphaned(&self) -> Result<u64, AppError>;
}
