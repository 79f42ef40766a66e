//! Redirect resolution service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::target_url::ensure_scheme;

/// Resolves a short code to its redirect target.
///
/// Expired mappings that the sweeper has not yet deleted are treated as
/// absent: a short link stops working at its expiry time, not at the next
/// sweep tick.
pub struct RedirectService {
    mappings: Arc<dyn MappingRepository>,
}

impl RedirectService {
    pub fn new(mappings: Arc<dyn MappingRepository>) -> Self {
        Self { mappings }
    }

    /// Returns the redirect target for `code`, with a scheme guaranteed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown or expired codes.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let mapping = self
            .mappings
            .find_by_code(code)
            .await?
            .filter(|m| !m.is_expired_at(Utc::now()))
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))?;

        Ok(ensure_scheme(&mapping.original_url))
    }
}
