//! Aggregate statistics over the link collection.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use crate::domain::clock::Clock;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::event_log::{EventLogger, packages};

/// Number of links listed in [`StatsSnapshot::recent_urls`].
pub const RECENT_URLS_LIMIT: usize = 5;

/// Point-in-time statistics.
///
/// Expired links that have not been swept count towards the totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_urls: usize,
    pub active_urls: usize,
    pub expired_urls: usize,
    pub total_clicks: u64,
    /// Rounded to two decimals.
    pub average_clicks_per_url: f64,
    pub most_clicked_url: Option<ShortLink>,
    /// Most recently created first.
    pub recent_urls: Vec<ShortLink>,
}

impl StatsSnapshot {
    pub fn empty() -> Self {
        Self {
            total_urls: 0,
            active_urls: 0,
            expired_urls: 0,
            total_clicks: 0,
            average_clicks_per_url: 0.0,
            most_clicked_url: None,
            recent_urls: Vec::new(),
        }
    }

    /// Computes statistics for `links` given in insertion order.
    ///
    /// Ties for the most clicked link go to the earliest inserted one; links
    /// that were never clicked do not qualify.
    pub fn from_links(links: &[ShortLink], now: DateTime<Utc>) -> Self {
        if links.is_empty() {
            return Self::empty();
        }

        let total_urls = links.len();
        let active_urls = links.iter().filter(|l| l.is_active_at(now)).count();
        let total_clicks: u64 = links.iter().map(|l| l.click_count).sum();
        let average = total_clicks as f64 / total_urls as f64;

        let most_clicked_url = links
            .iter()
            .filter(|l| l.click_count > 0)
            .fold(None::<&ShortLink>, |best, link| match best {
                Some(b) if b.click_count >= link.click_count => Some(b),
                _ => Some(link),
            })
            .cloned();

        let recent_urls = links
            .iter()
            .rev()
            .take(RECENT_URLS_LIMIT)
            .cloned()
            .collect();

        Self {
            total_urls,
            active_urls,
            expired_urls: total_urls - active_urls,
            total_clicks,
            average_clicks_per_url: (average * 100.0).round() / 100.0,
            most_clicked_url,
            recent_urls,
        }
    }
}

/// Service for read-only statistics.
pub struct StatsService<L: LinkRepository> {
    link_repository: Arc<L>,
    clock: Arc<dyn Clock>,
    events: EventLogger,
}

impl<L: LinkRepository> StatsService<L> {
    pub fn new(link_repository: Arc<L>, clock: Arc<dyn Clock>, events: EventLogger) -> Self {
        Self {
            link_repository,
            clock,
            events,
        }
    }

    /// Current statistics; a zeroed snapshot when storage is unavailable.
    pub async fn statistics(&self) -> StatsSnapshot {
        match self.link_repository.list().await {
            Ok(links) => StatsSnapshot::from_links(&links, self.clock.now()),
            Err(e) => {
                error!("Failed to compute statistics: {}", e);
                self.events
                    .error(packages::STORAGE, format!("Failed to get statistics: {e}"));
                StatsSnapshot::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::storage::StorageError;
    use chrono::Duration;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).unwrap()
    }

    fn link(code: &str, expiry_minutes: i64, clicks: u64) -> ShortLink {
        let mut link = ShortLink::new(
            format!("id-{code}"),
            format!("https://example.com/{code}"),
            code.to_string(),
            start() - Duration::minutes(10),
            start() + Duration::minutes(expiry_minutes),
            expiry_minutes + 10,
        );
        link.click_count = clicks;
        link
    }

    #[test]
    fn test_counts_live_and_expired() {
        let links = vec![
            link("aaa", 5, 1),
            link("bbb", -5, 0),
            link("ccc", 5, 3),
            link("ddd", -1, 0),
            link("eee", 60, 3),
        ];

        let stats = StatsSnapshot::from_links(&links, start());

        assert_eq!(stats.total_urls, 5);
        assert_eq!(stats.active_urls, 3);
        assert_eq!(stats.expired_urls, 2);
        assert_eq!(stats.total_clicks, 7);
        assert_eq!(stats.average_clicks_per_url, 1.4);
        assert_eq!(stats.most_clicked_url.unwrap().shortcode, "ccc");
    }

    #[test]
    fn test_recent_urls_most_recent_first() {
        let links: Vec<ShortLink> = ["a1a", "b2b", "c3c", "d4d", "e5e", "f6f"]
            .iter()
            .map(|code| link(code, 30, 0))
            .collect();

        let stats = StatsSnapshot::from_links(&links, start());
        let recent: Vec<&str> = stats.recent_urls.iter().map(|l| l.shortcode.as_str()).collect();

        assert_eq!(recent, vec!["f6f", "e5e", "d4d", "c3c", "b2b"]);
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let links = vec![link("aaa", 5, 1), link("bbb", 5, 0), link("ccc", 5, 0)];

        let stats = StatsSnapshot::from_links(&links, start());
        assert_eq!(stats.average_clicks_per_url, 0.33);
    }

    #[test]
    fn test_no_most_clicked_without_clicks() {
        let links = vec![link("aaa", 5, 0), link("bbb", 5, 0)];

        let stats = StatsSnapshot::from_links(&links, start());
        assert_eq!(stats.total_urls, 2);
        assert!(stats.most_clicked_url.is_none());
    }

    #[test]
    fn test_most_clicked_tie_goes_to_earliest() {
        let links = vec![link("aaa", 5, 0), link("bbb", 5, 2), link("ccc", 5, 2)];

        let stats = StatsSnapshot::from_links(&links, start());
        assert_eq!(stats.most_clicked_url.unwrap().shortcode, "bbb");
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(StatsSnapshot::from_links(&[], start()), StatsSnapshot::empty());
    }

    #[tokio::test]
    async fn test_statistics_degrade_on_storage_error() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list()
            .returning(|| Err(StorageError::Connection("down".to_string()).into()));

        let service = StatsService::new(
            Arc::new(repo),
            Arc::new(ManualClock::new(start())),
            EventLogger::disabled(),
        );

        assert_eq!(service.statistics().await, StatsSnapshot::empty());
    }
}
