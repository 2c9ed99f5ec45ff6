//! Expired link purging, on demand and on a timer.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::domain::clock::Clock;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::event_log::{EventLogger, packages};

/// Removes links whose expiry has passed.
///
/// Sweeping never fails from the caller's point of view: storage errors are
/// logged and reported as zero removed links.
pub struct SweepService<L: LinkRepository> {
    link_repository: Arc<L>,
    clock: Arc<dyn Clock>,
    events: EventLogger,
}

impl<L: LinkRepository + 'static> SweepService<L> {
    pub fn new(link_repository: Arc<L>, clock: Arc<dyn Clock>, events: EventLogger) -> Self {
        Self {
            link_repository,
            clock,
            events,
        }
    }

    /// Sweeps relative to the current time.
    pub async fn sweep(&self) -> usize {
        self.sweep_at(self.clock.now()).await
    }

    /// Removes every link with `expiry_at < now` and returns how many went.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        match self.link_repository.delete_expired_before(now).await {
            Ok(0) => {
                debug!("Sweep found no expired links");
                0
            }
            Ok(removed) => {
                metrics::counter!("links_swept_total").increment(removed as u64);
                info!(removed, "Expired links swept");
                self.events.info(
                    packages::STORAGE,
                    format!("Cleaned up {removed} expired URLs"),
                );
                removed
            }
            Err(e) => {
                error!("Sweep failed: {}", e);
                self.events
                    .error(packages::STORAGE, format!("Failed to clean up expired URLs: {e}"));
                0
            }
        }
    }

    /// Starts a background task sweeping every `period`, beginning right away.
    pub fn spawn_sweeper(self: Arc<Self>, period: Duration) -> SweeperHandle {
        let (shutdown, mut stop) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = ticker.tick() => {
                        self.sweep().await;
                    }
                }
            }

            debug!("Sweeper stopped");
        });

        info!(period_secs = period.as_secs(), "Sweeper started");
        SweeperHandle { shutdown, task }
    }
}

/// Handle to a running sweeper; dropping it also stops the timer.
pub struct SweeperHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stops the timer and waits for an in-flight sweep to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            error!("Sweeper task failed: {}", e);
        }
    }
}
