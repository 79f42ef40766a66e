//! Short mapping entity: the code-to-URL record.

use chrono::{DateTime, Utc};

/// A persisted mapping from a short code to an original URL.
///
/// The short code is the public identity of the record. `expiry_time` is
/// optional; `None` means the mapping never expires and is never touched by
/// the sweeper.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortMapping {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_time: DateTime<Utc>,
    pub expiry_time: Option<DateTime<Utc>>,
}

impl ShortMapping {
    /// Returns true once the mapping has passed its expiry time.
    ///
    /// Mappings without an expiry never report expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_time.is_some_and(|e| now >= e)
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone)]
pub struct NewMapping {
    pub original_url: String,
    pub short_code: String,
    pub expiry_time: Option<DateTime<Utc>>,
}
