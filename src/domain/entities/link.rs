//! Link entity representing a short code mapped to an expiring long URL.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::click::Click;

/// Maximum number of click events retained per link.
///
/// Older events are dropped once the history is full; `click_count` keeps
/// counting every recorded click.
pub const CLICK_HISTORY_CAPACITY: usize = 100;

/// A shortened URL with expiry and click history.
///
/// Serialized with camelCase field names; the whole collection of links is
/// persisted as one JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    pub id: String,
    pub original_url: String,
    pub shortcode: String,
    pub created_at: DateTime<Utc>,
    pub expiry_at: DateTime<Utc>,
    pub expiry_minutes: i64,
    pub click_count: u64,
    #[serde(default)]
    pub clicks: VecDeque<Click>,
}

impl ShortLink {
    /// Builds a fresh link with no recorded clicks.
    pub fn new(
        id: String,
        original_url: String,
        shortcode: String,
        created_at: DateTime<Utc>,
        expiry_at: DateTime<Utc>,
        expiry_minutes: i64,
    ) -> Self {
        Self {
            id,
            original_url,
            shortcode,
            created_at,
            expiry_at,
            expiry_minutes,
            click_count: 0,
            clicks: VecDeque::new(),
        }
    }

    /// Returns true once `now` is strictly past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_at
    }

    /// Returns true while the link can still be redirected at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_at > now
    }

    /// Time left until expiry, clamped at zero.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expiry_at - now).max(Duration::zero())
    }

    /// Appends a click, dropping the oldest one when the history is full.
    pub fn push_click(&mut self, click: Click) {
        self.click_count += 1;
        self.clicks.push_back(click);
        while self.clicks.len() > CLICK_HISTORY_CAPACITY {
            self.clicks.pop_front();
        }
    }

    /// Public short URL for this link under `origin`.
    pub fn short_url(&self, origin: &str) -> String {
        format!("{}/{}", origin.trim_end_matches('/'), self.shortcode)
    }
}

/// Input data for inserting a new link.
///
/// The code has already been validated and allocated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub original_url: String,
    pub shortcode: String,
    pub expiry_at: DateTime<Utc>,
    pub expiry_minutes: i64,
}
