//! Background click recorder.
//!
//! Consumes [`ClickMessage`]s from the redirect path, enriches them with
//! user-agent and geolocation data, and persists the resulting click
//! events. Runs as a single spawned task for the life of the process.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::click_message::ClickMessage;
use crate::domain::entities::NewClickEvent;
use crate::domain::repositories::ClickRepository;
use crate::infrastructure::geo::GeoResolver;
use crate::utils::user_agent::{UNKNOWN_LABEL, platform_label};

/// Drains the click channel until every sender is dropped.
///
/// Every step is best-effort: a failed geolocation lookup or user-agent
/// parse degrades to "unknown" labels, and a failed insert drops the event
/// with a log line. Nothing here can affect a redirect that has already
/// been served, and the referenced mapping is allowed to have been deleted
/// in the meantime (the row is inserted as an orphan and reconciled by the
/// sweeper).
pub async fn run_click_recorder(
    mut rx: mpsc::Receiver<ClickMessage>,
    clicks: Arc<dyn ClickRepository>,
    geo: Arc<dyn GeoResolver>,
) {
    while let Some(msg) = rx.recv().await {
        let event = enrich(&msg, geo.as_ref()).await;

        if let Err(e) = clicks.insert(event).await {
            tracing::warn!(code = %msg.code, error = %e, "dropping click event");
        }
    }

    tracing::info!("click recorder channel closed, worker exiting");
}

/// Builds the persistable event from the raw message. The geolocation
/// network call happens here, before any database work.
async fn enrich(msg: &ClickMessage, geo: &dyn GeoResolver) -> NewClickEvent {
    let platform = platform_label(msg.user_agent.as_deref());

    let (user_location, country) = match msg.ip.as_deref() {
        Some(ip) => match geo.resolve(ip).await {
            Some(info) => (info.city, info.country),
            None => (UNKNOWN_LABEL.to_string(), UNKNOWN_LABEL.to_string()),
        },
        None => (UNKNOWN_LABEL.to_string(), UNKNOWN_LABEL.to_string()),
    };

    NewClickEvent {
        short_code_ref: msg.code.clone(),
        user_location,
        country,
        platform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ClickEvent;
    use crate::domain::repositories::MockClickRepository;
    use crate::error::AppError;
    use crate::infrastructure::geo::{GeoInfo, MockGeoResolver};
    use chrono::Utc;
    use mockall::predicate::eq;
    use serde_json::json;

    const LINUX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

    fn stored(ev: NewClickEvent) -> Result<ClickEvent, AppError> {
        Ok(ClickEvent {
            id: 1,
            short_code_ref: ev.short_code_ref,
            user_location: ev.user_location,
            country: ev.country,
            platform: ev.platform,
            click_count: 0,
            created_time: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_recorder_persists_enriched_event() {
        let mut geo = MockGeoResolver::new();
        geo.expect_resolve().with(eq("203.0.113.7")).returning(|_| {
            Some(GeoInfo {
                city: "Berlin".to_string(),
                country: "DE".to_string(),
            })
        });

        let mut clicks = MockClickRepository::new();
        clicks.expect_insert().times(1).returning(|ev| {
            assert_eq!(ev.short_code_ref, "aB3xY9");
            assert_eq!(ev.user_location, "Berlin");
            assert_eq!(ev.country, "DE");
            assert_eq!(ev.platform, "Linux");
            stored(ev)
        });

        let (tx, rx) = mpsc::channel(4);
        tx.send(ClickMessage::new(
            "aB3xY9".to_string(),
            Some(LINUX_UA),
            Some("203.0.113.7".to_string()),
        ))
        .await
        .unwrap();
        drop(tx);

        run_click_recorder(rx, Arc::new(clicks), Arc::new(geo)).await;
    }

    #[tokio::test]
    async fn test_recorder_degrades_to_unknown_labels() {
        let mut geo = MockGeoResolver::new();
        geo.expect_resolve().returning(|_| None);

        let mut clicks = MockClickRepository::new();
        clicks.expect_insert().times(1).returning(|ev| {
            assert_eq!(ev.user_location, UNKNOWN_LABEL);
            assert_eq!(ev.country, UNKNOWN_LABEL);
            assert_eq!(ev.platform, UNKNOWN_LABEL);
            stored(ev)
        });

        let (tx, rx) = mpsc::channel(4);
        tx.send(ClickMessage::new(
            "aB3xY9".to_string(),
            None,
            Some("203.0.113.7".to_string()),
        ))
        .await
        .unwrap();
        drop(tx);

        run_click_recorder(rx, Arc::new(clicks), Arc::new(geo)).await;
    }

    #[tokio::test]
    async fn test_recorder_skips_geo_without_ip() {
        let mut geo = MockGeoResolver::new();
        geo.expect_resolve().never();

        let mut clicks = MockClickRepository::new();
        clicks.expect_insert().times(1).returning(stored);

        let (tx, rx) = mpsc::channel(4);
        tx.send(ClickMessage::new("aB3xY9".to_string(), Some(LINUX_UA), None))
            .await
            .unwrap();
        drop(tx);

        run_click_recorder(rx, Arc::new(clicks), Arc::new(geo)).await;
    }

    #[tokio::test]
    async fn test_recorder_survives_insert_failure() {
        let mut geo = MockGeoResolver::new();
        geo.expect_resolve().returning(|_| None);

        // First event fails to persist; the worker must keep draining.
        let mut clicks = MockClickRepository::new();
        let mut seq = mockall::Sequence::new();
        clicks
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("db down", json!({}))));
        clicks
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(stored);

        let (tx, rx) = mpsc::channel(4);
        for code in ["first1", "second"] {
            tx.send(ClickMessage::new(
                code.to_string(),
                None,
                Some("203.0.113.7".to_string()),
            ))
            .await
            .unwrap();
        }
        drop(tx);

        run_click_recorder(rx, Arc::new(clicks), Arc::new(geo)).await;
    }
}
