//! Periodic background eviction task.
//!
//! Both in-memory maps (links and rate buckets) own one [`Sweeper`] that calls
//! back into them on a fixed interval until stopped.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Shortest interval accepted by [`Sweeper::spawn`]; `tokio::time::interval`
/// panics on a zero period.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a spawned sweep loop.
///
/// Stopping is idempotent, and dropping the handle stops the loop.
#[derive(Debug)]
pub struct Sweeper {
    name: &'static str,
    stop_tx: watch::Sender<bool>,
}

impl Sweeper {
    /// Spawns a task that runs `sweep` every `interval`.
    ///
    /// The first pass happens one full interval after spawning. `sweep`
    /// returns the number of entries it evicted, which is logged at debug level.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<F>(name: &'static str, interval: Duration, mut sweep: F) -> Self
    where
        F: FnMut() -> usize + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let period = interval.max(MIN_INTERVAL);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = sweep();
                        debug!(sweeper = name, evicted, "Sweep pass finished");
                    }
                    _ = stop_rx.changed() => break,
                }
            }

            debug!(sweeper = name, "Sweeper stopped");
        });

        debug!(sweeper = name, ?period, "Sweeper started");

        Self { name, stop_tx }
    }

    /// Signals the sweep loop to exit. Safe to call any number of times.
    pub fn stop(&self) {
        if !self.stop_tx.send_replace(true) {
            debug!(sweeper = self.name, "Stopping sweeper");
        }
    }

    /// Returns true once [`Self::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_sweeper(interval: Duration) -> (Sweeper, Arc<AtomicUsize>) {
        let passes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&passes);
        let sweeper = Sweeper::spawn("test", interval, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            0
        });
        (sweeper, passes)
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_once_per_interval() {
        let (_sweeper, passes) = counting_sweeper(Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(passes.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(passes.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(passes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_passes() {
        let (sweeper, passes) = counting_sweeper(Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(passes.load(Ordering::SeqCst), 1);

        sweeper.stop();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(passes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let (sweeper, _) = counting_sweeper(Duration::from_secs(60));

        assert!(!sweeper.is_stopped());
        sweeper.stop();
        sweeper.stop();
        sweeper.stop();
        assert!(sweeper.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_loop() {
        let (sweeper, passes) = counting_sweeper(Duration::from_secs(1));
        drop(sweeper);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(passes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_interval_does_not_panic() {
        let (sweeper, _) = counting_sweeper(Duration::ZERO);
        sweeper.stop();
    }
}
