//! Refresh Timer
//!
//! Re-runs fetch-then-render on a fixed interval. The first tick fires
//! immediately and serves as the initial load. A cycle always finishes
//! before the next tick is awaited and late ticks are skipped, so two
//! refreshes never run at once and renders land in fetch order. `stop`
//! wakes the loop right away; a cycle already in flight completes first.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, RwLock};
use tokio::time::MissedTickBehavior;

use crate::api::SensorApi;
use crate::dashboard::Dashboard;

/// Default refresh period
pub const DEFAULT_INTERVAL_MS: u64 = 30_000;

const REPORT_CAPACITY: usize = 16;

/// Result of one refresh cycle, published to subscribers
#[derive(Debug, Clone)]
pub struct RefreshReport {
    /// 1-based cycle number
    pub cycle: u64,
    pub finished_at: DateTime<Utc>,
    /// Number of points rendered, or the error text
    pub outcome: Result<usize, String>,
}

/// Drives periodic dashboard refreshes
pub struct RefreshTimer<A: SensorApi + 'static> {
    dashboard: Arc<RwLock<Dashboard<A>>>,
    interval: Duration,
    running: watch::Sender<bool>,
    reports: broadcast::Sender<RefreshReport>,
}

impl<A: SensorApi + 'static> RefreshTimer<A> {
    /// Create a timer for `dashboard` firing every `interval`
    pub fn new(dashboard: Arc<RwLock<Dashboard<A>>>, interval: Duration) -> Self {
        let (reports, _) = broadcast::channel(REPORT_CAPACITY);
        let (running, _) = watch::channel(false);

        Self {
            dashboard,
            interval,
            running,
            reports,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Receive a report after every completed cycle
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshReport> {
        self.reports.subscribe()
    }

    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }

    /// Start the timer background task
    ///
    /// The running flag is raised before the task is spawned, so a `stop`
    /// issued at any point afterwards is observed.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        self.running.send_replace(true);
        let mut running = self.running.subscribe();
        let timer = Arc::clone(&self);

        tokio::spawn(async move {
            tracing::info!(interval_ms = timer.interval.as_millis() as u64, "refresh timer started");

            let mut ticker = tokio::time::interval(timer.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut cycle = 0u64;

            loop {
                if !*running.borrow_and_update() {
                    break;
                }

                tokio::select! {
                    biased;
                    changed = running.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        continue;
                    }
                    _ = ticker.tick() => {}
                }

                cycle += 1;
                let report = timer.run_cycle(cycle).await;
                // No subscribers is fine
                let _ = timer.reports.send(report);
            }

            tracing::info!(cycles = cycle, "refresh timer stopped");
        })
    }

    /// Stop the timer; an idle loop exits immediately
    pub fn stop(&self) {
        self.running.send_replace(false);
    }

    /// Run one fetch-then-render cycle
    ///
    /// The fetch happens without holding the dashboard lock so readers are
    /// never blocked on the network.
    pub async fn run_cycle(&self, cycle: u64) -> RefreshReport {
        let api = self.dashboard.read().await.api();
        tracing::debug!(cycle, "refresh cycle");

        let fetched = api.fetch_readings().await;
        let outcome = self
            .dashboard
            .write()
            .await
            .apply_readings(fetched)
            .map_err(|e| e.to_string());

        RefreshReport {
            cycle,
            finished_at: Utc::now(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::dashboard::tests::{batch, FakeApi};
    use crate::dashboard::{DashboardOptions, ViewStatus};
    use tokio::time::Instant;

    fn shared(api: FakeApi) -> Arc<RwLock<Dashboard<FakeApi>>> {
        Arc::new(RwLock::new(Dashboard::new(api, DashboardOptions::default())))
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_immediately_then_every_interval() {
        let api = FakeApi::with_batches(vec![
            Ok(batch(2, 20.0)),
            Ok(batch(3, 21.0)),
            Ok(batch(4, 22.0)),
        ]);
        let dashboard = shared(api);
        let timer = Arc::new(RefreshTimer::new(
            Arc::clone(&dashboard),
            Duration::from_millis(DEFAULT_INTERVAL_MS),
        ));
        let mut reports = timer.subscribe();
        let started = Instant::now();
        let handle = Arc::clone(&timer).start();

        let first = reports.recv().await.unwrap();
        assert_eq!(first.cycle, 1);
        assert_eq!(first.outcome, Ok(2));
        assert!(started.elapsed() < Duration::from_secs(1));

        let second = reports.recv().await.unwrap();
        assert_eq!(second.outcome, Ok(3));
        assert_eq!(started.elapsed().as_secs(), 30);

        let third = reports.recv().await.unwrap();
        assert_eq!(third.cycle, 3);
        assert_eq!(started.elapsed().as_secs(), 60);

        timer.stop();
        handle.await.unwrap();
        assert!(!timer.is_running());

        let guard = dashboard.read().await;
        assert_eq!(guard.charts().unwrap().temperature().state().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_does_not_stop_timer() {
        let api = FakeApi::with_batches(vec![
            Err(ApiError::Timeout),
            Ok(batch(1, 19.0)),
        ]);
        let dashboard = shared(api);
        let timer = Arc::new(RefreshTimer::new(Arc::clone(&dashboard), Duration::from_secs(30)));
        let mut reports = timer.subscribe();
        let handle = Arc::clone(&timer).start();

        let first = reports.recv().await.unwrap();
        assert_eq!(first.outcome, Err("Request timeout".to_string()));
        assert!(dashboard.read().await.status().is_failed());

        let second = reports.recv().await.unwrap();
        assert_eq!(second.outcome, Ok(1));
        assert!(matches!(
            dashboard.read().await.status(),
            ViewStatus::Ready { points: 1, .. }
        ));

        timer.stop();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_right_after_start() {
        let dashboard = shared(FakeApi::with_batches(vec![Ok(batch(2, 20.0))]));
        let timer = Arc::new(RefreshTimer::new(Arc::clone(&dashboard), Duration::from_secs(30)));

        let handle = Arc::clone(&timer).start();
        assert!(timer.is_running());
        timer.stop();

        tokio::time::timeout(Duration::from_secs(300), handle)
            .await
            .expect("timer did not exit after stop")
            .unwrap();
        assert!(!timer.is_running());
        assert_eq!(dashboard.read().await.status(), &ViewStatus::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_does_not_wait_for_next_tick() {
        let dashboard = shared(FakeApi::with_batches(vec![Ok(batch(2, 20.0))]));
        let timer = Arc::new(RefreshTimer::new(Arc::clone(&dashboard), Duration::from_secs(30)));
        let mut reports = timer.subscribe();
        let handle = Arc::clone(&timer).start();

        reports.recv().await.unwrap();
        let stopped_at = Instant::now();
        timer.stop();
        handle.await.unwrap();

        assert!(stopped_at.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_run_cycle_directly() {
        let dashboard = shared(FakeApi::with_batches(vec![Ok(batch(5, 18.0))]));
        let timer = RefreshTimer::new(Arc::clone(&dashboard), Duration::from_secs(30));

        let report = timer.run_cycle(7).await;

        assert_eq!(report.cycle, 7);
        assert_eq!(report.outcome, Ok(5));
        assert_eq!(timer.interval(), Duration::from_secs(30));
    }
}
