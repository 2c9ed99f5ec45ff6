//! Background click recording.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{Click, ShortLink};
use crate::error::AppError;

/// Appends clicks to links.
///
/// The click's own timestamp is the instant the expiry check runs against.
#[async_trait]
pub trait ClickRecorder: Send + Sync {
    async fn record(&self, code: &str, click: Click) -> Result<ShortLink, AppError>;
}

fn storage_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(10)
        .factor(5)
        .max_delay(Duration::from_secs(1))
        .take(2)
}

/// Records queued clicks until every sender is dropped.
///
/// Storage failures are retried with backoff; a click for a link that is gone
/// or expired by the time it is processed is dropped.
pub async fn run_click_worker(mut rx: mpsc::Receiver<ClickEvent>, recorder: Arc<dyn ClickRecorder>) {
    while let Some(event) = rx.recv().await {
        let result = RetryIf::start(
            storage_retry_strategy(),
            || {
                let recorder = recorder.clone();
                let code = event.code.clone();
                let click = event.to_click();
                async move { recorder.record(&code, click).await }
            },
            |e: &AppError| matches!(e, AppError::Storage(_)),
        )
        .await;

        match result {
            Ok(link) => debug!(code = %event.code, clicks = link.click_count, "Click recorded"),
            Err(e @ (AppError::NotFound { .. } | AppError::Expired { .. })) => {
                debug!(code = %event.code, "Click dropped: {}", e);
            }
            Err(e) => warn!(code = %event.code, "Failed to record click: {}", e),
        }
    }

    debug!("Click worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::StorageError;
    use chrono::{Duration as ChronoDuration, Utc};
    use std::sync::Mutex;

    struct ScriptedRecorder {
        storage_failures: Mutex<usize>,
        recorded: Mutex<Vec<(String, Click)>>,
    }

    #[async_trait]
    impl ClickRecorder for ScriptedRecorder {
        async fn record(&self, code: &str, click: Click) -> Result<ShortLink, AppError> {
            if code == "gone" {
                return Err(AppError::link_not_found(code));
            }
            {
                let mut failures = self.storage_failures.lock().unwrap();
                if *failures > 0 {
                    *failures -= 1;
                    return Err(StorageError::Connection("flaky".to_string()).into());
                }
            }
            self.recorded
                .lock()
                .unwrap()
                .push((code.to_string(), click.clone()));

            let mut link = ShortLink::new(
                "id".to_string(),
                "https://example.com".to_string(),
                code.to_string(),
                click.timestamp,
                click.timestamp + ChronoDuration::minutes(5),
                5,
            );
            link.push_click(click);
            Ok(link)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_retries_storage_errors_and_skips_missing_links() {
        let recorder = Arc::new(ScriptedRecorder {
            storage_failures: Mutex::new(1),
            recorded: Mutex::new(Vec::new()),
        });
        let (tx, rx) = mpsc::channel(8);

        let now = Utc::now();
        tx.send(ClickEvent::new("gone".to_string(), now, None, None))
            .await
            .unwrap();
        tx.send(ClickEvent::new("abc".to_string(), now, Some("curl/8"), None))
            .await
            .unwrap();
        drop(tx);

        run_click_worker(rx, recorder.clone()).await;

        let recorded = recorder.recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, "abc");
        assert_eq!(recorded[0].1.user_agent, "curl/8");
        assert_eq!(recorded[0].1.timestamp, now);
    }
}
