//! Stats Reset Task
//!
//! Background task that periodically snapshots every stage's counters, hands
//! the snapshot to a reporter and starts the next cycle from zero.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheRegistry, CacheStats};

/// Receives the counters of one finished stats cycle, keyed by stage name.
pub type StatsReporter = Arc<dyn Fn(&BTreeMap<String, CacheStats>) + Send + Sync>;

/// Reporter that writes one `info` line per stage.
pub fn log_reporter() -> StatsReporter {
    Arc::new(|snapshot: &BTreeMap<String, CacheStats>| {
        if snapshot.is_empty() {
            debug!("Stats cycle finished with no stages");
        }
        for (stage, stats) in snapshot {
            info!(stage = %stage, hit_rate = stats.hit_rate(), "{}", stats);
        }
    })
}

/// Spawns a background task that snapshots and resets all stage counters.
///
/// Each cycle sleeps for the interval, then reads and zeroes every stage's
/// counters under that stage's lock and calls `reporter` with the result.
/// Cache entries are never touched.
///
/// # Arguments
/// * `registry` - Shared registry whose stages are cycled
/// * `interval_secs` - Seconds between cycles
/// * `reporter` - Callback receiving each cycle's snapshot
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let registry = Arc::new(CacheRegistry::new(1000)?);
/// let handle = spawn_stats_reset_task(registry.clone(), 86_400, log_reporter());
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_stats_reset_task(
    registry: Arc<CacheRegistry>,
    interval_secs: u64,
    reporter: StatsReporter,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting stats reset task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let snapshot = registry.snapshot_and_reset_all().await;
            debug!(stages = snapshot.len(), "Stats snapshot taken and counters reset");

            reporter(&snapshot);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn collecting_reporter() -> (StatsReporter, Arc<Mutex<Vec<BTreeMap<String, CacheStats>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter: StatsReporter = Arc::new(move |snapshot: &BTreeMap<String, CacheStats>| {
            sink.lock().unwrap().push(snapshot.clone());
        });
        (reporter, seen)
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_reports_then_resets() {
        let registry = Arc::new(CacheRegistry::new(100).unwrap());
        registry.set("k", "v", Some(3600), Some("A")).await.unwrap();
        let _ = registry.get("k", Some("A")).await;

        let (reporter, seen) = collecting_reporter();
        let handle = spawn_stats_reset_task(registry.clone(), 10, reporter);

        tokio::time::sleep(Duration::from_secs(11)).await;

        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 1, "Exactly one cycle should have run");
            assert_eq!(seen[0]["A"].set_count, 1);
            assert_eq!(seen[0]["A"].hit_count, 1);
        }

        let stats = registry.stage_stats("A").await.unwrap();
        assert_eq!(stats.counters, CacheStats::default());
        assert_eq!(stats.entries, 1, "Entries survive a stats cycle");
        assert_eq!(registry.get("k", Some("A")).await, Some("v".to_string()));

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_runs_every_interval() {
        let registry = Arc::new(CacheRegistry::new(100).unwrap());
        let (reporter, seen) = collecting_reporter();
        let handle = spawn_stats_reset_task(registry.clone(), 5, reporter);

        tokio::time::sleep(Duration::from_secs(6)).await;
        registry.set("k", "v", None, None).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 2);
            assert!(seen[0].is_empty());
            assert_eq!(seen[1]["default"].set_count, 1);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_task_can_be_aborted() {
        let registry = Arc::new(CacheRegistry::new(100).unwrap());

        let handle = spawn_stats_reset_task(registry, 1, log_reporter());

        // Abort immediately
        handle.abort();

        // Wait a bit and verify task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
