//! Periodic expiry and orphan cleanup.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{MissedTickBehavior, interval};

use crate::domain::repositories::{ClickRepository, MappingRepository};
use crate::error::AppError;

/// Row counts from one sweep cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub expired_mappings: usize,
    pub cascaded_clicks: u64,
    pub orphaned_clicks: u64,
}

/// Timer-driven cleanup task for expired mappings and orphaned clicks.
///
/// Each cycle runs three single-statement deletes: expired mappings
/// (returned so their codes are known), click rows referencing those codes,
/// and click rows whose mapping no longer exists for any other reason (the
/// recorder/sweeper race). Every step is idempotent, so a mid-cycle failure
/// just leaves the remaining candidates for the next tick.
pub struct ExpirySweeper {
    mappings: Arc<dyn MappingRepository>,
    clicks: Arc<dyn ClickRepository>,
    period: Duration,
}

impl ExpirySweeper {
    pub fn new(
        mappings: Arc<dyn MappingRepository>,
        clicks: Arc<dyn ClickRepository>,
        period: Duration,
    ) -> Self {
        Self {
            mappings,
            clicks,
            period,
        }
    }

    /// Runs the sweep loop forever. Spawn this as a task.
    pub async fn run(self) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(period = ?self.period, "expiry sweeper started");

        loop {
            ticker.tick().await;
            match self.sweep_once().await {
                Ok(stats) if stats == SweepStats::default() => {}
                Ok(stats) => tracing::info!(
                    expired = stats.expired_mappings,
                    cascaded = stats.cascaded_clicks,
                    orphaned = stats.orphaned_clicks,
                    "sweep cycle removed rows"
                ),
                // Deferred to the next cycle; candidates are untouched.
                Err(e) => tracing::warn!(error = %e, "sweep cycle failed"),
            }
        }
    }

    /// Spawns the sweeper on the current runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Executes one sweep cycle against the current clock.
    pub async fn sweep_once(&self) -> Result<SweepStats, AppError> {
        let now = Utc::now();

        let expired = self.mappings.delete_expired_before(now).await?;

        let codes: Vec<String> = expired.iter().map(|m| m.short_code.clone()).collect();
        let cascaded = self.clicks.delete_by_codes(&codes).await?;

        let orphaned = self.clicks.delete_orphaned().await?;

        Ok(SweepStats {
            expired_mappings: expired.len(),
            cascaded_clicks: cascaded,
            orphaned_clicks: orphaned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortMapping;
    use crate::domain::repositories::{MockClickRepository, MockMappingRepository};
    use chrono::Duration as ChronoDuration;
    use serde_json::json;

    fn expired_mapping(id: i64, code: &str) -> ShortMapping {
        ShortMapping {
            id,
            original_url: format!("https://expired-{id}.com"),
            short_code: code.to_string(),
            created_time: Utc::now() - ChronoDuration::hours(2),
            expiry_time: Some(Utc::now() - ChronoDuration::minutes(1)),
        }
    }

    fn sweeper(
        mappings: MockMappingRepository,
        clicks: MockClickRepository,
    ) -> ExpirySweeper {
        ExpirySweeper::new(
            Arc::new(mappings),
            Arc::new(clicks),
            Duration::from_secs(24),
        )
    }

    #[tokio::test]
    async fn test_sweep_cascades_clicks_of_expired_mappings() {
        let mut mappings = MockMappingRepository::new();
        mappings
            .expect_delete_expired_before()
            .times(1)
            .returning(|_| Ok(vec![expired_mapping(1, "aaaaaa"), expired_mapping(2, "bbbbbb")]));

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_delete_by_codes()
            .withf(|codes| codes == ["aaaaaa", "bbbbbb"])
            .times(1)
            .returning(|_| Ok(5));
        clicks.expect_delete_orphaned().times(1).returning(|| Ok(1));

        let stats = sweeper(mappings, clicks).sweep_once().await.unwrap();

        assert_eq!(stats.expired_mappings, 2);
        assert_eq!(stats.cascaded_clicks, 5);
        assert_eq!(stats.orphaned_clicks, 1);
    }

    #[tokio::test]
    async fn test_sweep_with_nothing_expired_still_reconciles_orphans() {
        let mut mappings = MockMappingRepository::new();
        mappings
            .expect_delete_expired_before()
            .returning(|_| Ok(Vec::new()));

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_delete_by_codes()
            .withf(|codes| codes.is_empty())
            .returning(|_| Ok(0));
        clicks.expect_delete_orphaned().times(1).returning(|| Ok(3));

        let stats = sweeper(mappings, clicks).sweep_once().await.unwrap();

        assert_eq!(stats.expired_mappings, 0);
        assert_eq!(stats.cascaded_clicks, 0);
        assert_eq!(stats.orphaned_clicks, 3);
    }

    #[tokio::test]
    async fn test_sweep_failure_is_deferred_not_partial() {
        let mut mappings = MockMappingRepository::new();
        mappings
            .expect_delete_expired_before()
            .returning(|_| Err(AppError::internal("db down", json!({}))));

        // The cycle aborts before touching click rows.
        let mut clicks = MockClickRepository::new();
        clicks.expect_delete_by_codes().never();
        clicks.expect_delete_orphaned().never();

        let err = sweeper(mappings, clicks).sweep_once().await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
