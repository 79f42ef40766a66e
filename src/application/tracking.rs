//! Click analytics aggregation for the `/track` endpoint.

use std::sync::Arc;

use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Timestamp format exposed by `/track`, e.g. `08/30/26 14:05`.
const TRACK_TIME_FORMAT: &str = "%m/%d/%y %H:%M";

/// Aggregated click data for one short code.
///
/// Lists are parallel (one entry per recorded click, oldest first);
/// `clicks` is the row count. All lists are empty for codes with no
/// recorded clicks, including codes that never existed or have been swept.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackData {
    pub user_locations: Vec<String>,
    pub countries: Vec<String>,
    pub platforms: Vec<String>,
    pub clicks: usize,
    pub created_times: Vec<String>,
}

/// Read-side service over recorded click events.
pub struct TrackingService {
    clicks: Arc<dyn ClickRepository>,
}

impl TrackingService {
    pub fn new(clicks: Arc<dyn ClickRepository>) -> Self {
        Self { clicks }
    }

    /// Collects the click history for `code`.
    ///
    /// Never reports missing data as an error: an unknown or already-swept
    /// code simply yields empty lists.
    pub async fn track(&self, code: &str) -> Result<TrackData, AppError> {
        let events = self.clicks.list_by_code(code).await?;

        let mut data = TrackData {
            user_locations: Vec::with_capacity(events.len()),
            countries: Vec::with_capacity(events.len()),
            platforms: Vec::with_capacity(events.len()),
            clicks: events.len(),
            created_times: Vec::with_capacity(events.len()),
        };

        for ev in events {
            data.user_locations.push(ev.user_location);
            data.countries.push(ev.country);
            data.platforms.push(ev.platform);
            data.created_times
                .push(ev.created_time.format(TRACK_TIME_FORMAT).to_string());
        }

        Ok(data)
    }
}
