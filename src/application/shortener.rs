//! Short link creation service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::{NewMapping, ShortMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::codegen::generate_code;

/// Candidate codes tried before giving up on a shorten request.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Creates short mappings: validates input, computes expiry, and drives the
/// retry-until-unique loop over the code generator.
///
/// Shortening is idempotent per original URL: a URL that is already mapped
/// returns its existing mapping instead of a second live code. Concurrent
/// creators racing on the same URL are serialized by the storage layer's
/// unique constraint; the loser re-fetches the winner's row.
pub struct ShortenerService {
    mappings: Arc<dyn MappingRepository>,
}

impl ShortenerService {
    pub fn new(mappings: Arc<dyn MappingRepository>) -> Self {
        Self { mappings }
    }

    /// Shortens a URL, optionally expiring after `expiry_minutes`.
    ///
    /// `expiry_minutes` of zero (or absent) means the mapping never expires.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty URL and
    /// [`AppError::Internal`] when the attempt budget is exhausted by code
    /// collisions or the store fails.
    pub async fn shorten(
        &self,
        original_url: &str,
        expiry_minutes: Option<i64>,
    ) -> Result<ShortMapping, AppError> {
        let original_url = original_url.trim();
        if original_url.is_empty() {
            return Err(AppError::bad_request(
                "original_url must not be empty",
                json!({ "field": "original_url" }),
            ));
        }

        let expiry_time = expiry_time_from_minutes(Utc::now(), expiry_minutes);

        if let Some(existing) = self.mappings.find_by_original_url(original_url).await? {
            return Ok(existing);
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let short_code = generate_code();

            if self.mappings.find_by_code(&short_code).await?.is_some() {
                tracing::debug!(code = %short_code, "code collision, retrying");
                continue;
            }

            let new_mapping = NewMapping {
                original_url: original_url.to_string(),
                short_code,
                expiry_time,
            };

            match self.mappings.insert(new_mapping).await {
                Ok(mapping) => return Ok(mapping),
                // Lost the reservation race against another creator.
                Err(AppError::CodeCollision) => continue,
                Err(AppError::DuplicateUrl) => {
                    // A concurrent shorten of the same URL won; reuse it.
                    return self
                        .mappings
                        .find_by_original_url(original_url)
                        .await?
                        .ok_or_else(|| {
                            AppError::internal(
                                "Duplicate URL reported but no mapping found",
                                json!({ "original_url": original_url }),
                            )
                        });
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique short code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }
}

/// Converts the form-level expiry (minutes from now) into an absolute
/// timestamp; zero, negative, or absent values mean no expiry.
fn expiry_time_from_minutes(
    now: DateTime<Utc>,
    expiry_minutes: Option<i64>,
) -> Option<DateTime<Utc>> {
    match expiry_minutes {
        Some(m) if m > 0 => Some(now + Duration::minutes(m)),
        _ => None,
    }
}
