//! Click event entity recorded for each served redirect.

use chrono::{DateTime, Utc};

/// A single recorded visit to a short link.
///
/// References its mapping weakly by short code rather than by an enforced
/// foreign key: the row is written after the redirect has already been
/// served, so the mapping may expire (and be deleted) concurrently. Rows
/// whose code no longer resolves are "orphans" and are purged by the
/// sweeper's reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub id: i64,
    pub short_code_ref: String,
    pub user_location: String,
    pub country: String,
    pub platform: String,
    /// Carried for schema compatibility; always written at its default.
    /// The click total exposed by `/track` is derived from row cardinality.
    pub click_count: i32,
    pub created_time: DateTime<Utc>,
}

/// Input data for persisting a click event. Labels default to "unknown"
/// upstream when enrichment fails.
#[derive(Debug, Clone)]
pub struct NewClickEvent {
    pub short_code_ref: String,
    pub user_location: String,
    pub country: String,
    pub platform: String,
}
