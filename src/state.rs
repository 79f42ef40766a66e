//! Process-wide shared state.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::{RedirectService, ShortenerService, TrackingService};
use crate::domain::click_message::ClickMessage;

/// Explicit application state handed to every handler.
///
/// Constructed once at startup in [`crate::server::run`] (no module-level
/// singletons); cloning is cheap since everything is behind an `Arc` or a
/// channel handle.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    pub redirector: Arc<RedirectService>,
    pub tracking: Arc<TrackingService>,
    /// Fire-and-forget path into the background click recorder.
    pub click_tx: mpsc::Sender<ClickMessage>,
    /// Public base used to render shortened URLs, e.g. `https://s.example.com`.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        shortener: Arc<ShortenerService>,
        redirector: Arc<RedirectService>,
        tracking: Arc<TrackingService>,
        click_tx: mpsc::Sender<ClickMessage>,
        base_url: String,
    ) -> Self {
        Self {
            shortener,
            redirector,
            tracking,
            click_tx,
            base_url,
        }
    }

    /// Renders the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
