//! Request and response shapes for the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::TrackData;

/// Form body of `POST /shorten`.
///
/// `expiry_date` is an expiry in minutes from now; zero or absent means
/// the mapping never expires.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    pub original_url: String,
    pub expiry_date: Option<i64>,
}

/// Response of `POST /shorten`.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shortened_url: String,
    pub short_code: String,
    pub expiry_time: Option<DateTime<Utc>>,
}

/// Response of `GET /track/{code}`: parallel per-click lists plus the
/// total, empty when nothing has been recorded.
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub user_locations: Vec<String>,
    pub countries: Vec<String>,
    pub platforms: Vec<String>,
    pub clicks: usize,
    pub created_times: Vec<String>,
}

impl From<TrackData> for TrackResponse {
    fn from(data: TrackData) -> Self {
        Self {
            user_locations: data.user_locations,
            countries: data.countries,
            platforms: data.platforms,
            clicks: data.clicks,
            created_times: data.created_times,
        }
    }
}
