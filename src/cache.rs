//! Time-bounded memoization of generated articles.

use crate::feeds::Article;
use crate::market::{Segment, Timeframe};
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub segment: Segment,
    pub timeframe: Timeframe,
    /// Calendar day the articles were generated for, in the cache's offset.
    pub day: NaiveDate,
    pub bucket: i64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    articles: Vec<Article>,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Articles keyed by selection, local calendar day and TTL-sized time bucket.
///
/// Buckets are aligned to the same UTC offset as the day, so an entry is never
/// served once the generator's "today" has moved on. An entry is served only
/// while the lookup time is in the same day and bucket and before the entry's
/// expiry. A TTL of zero disables caching.
#[derive(Debug)]
pub struct ArticleCache {
    ttl: Duration,
    offset: FixedOffset,
    entries: HashMap<CacheKey, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl ArticleCache {
    /// Cache whose days follow the machine's current local offset.
    pub fn new(ttl: Duration) -> Self {
        Self::with_offset(ttl, *Local::now().offset())
    }

    pub fn with_offset(ttl: Duration, offset: FixedOffset) -> Self {
        Self {
            ttl,
            offset,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.ttl > Duration::zero()
    }

    pub fn key(&self, segment: Segment, timeframe: Timeframe, now: DateTime<Utc>) -> CacheKey {
        let (day, bucket) = self.slot(now);
        CacheKey {
            segment,
            timeframe,
            day,
            bucket,
        }
    }

    fn slot(&self, now: DateTime<Utc>) -> (NaiveDate, i64) {
        let local = now.with_timezone(&self.offset);
        let local_secs = now.timestamp() + i64::from(self.offset.local_minus_utc());
        let ttl_secs = self.ttl.num_seconds().max(1);
        (local.date_naive(), local_secs.div_euclid(ttl_secs))
    }

    pub fn get(&mut self, segment: Segment, timeframe: Timeframe, now: DateTime<Utc>) -> Option<Vec<Article>> {
        if !self.is_enabled() {
            return None;
        }

        let key = self.key(segment, timeframe, now);
        match self.entries.get(&key) {
            Some(entry) if now < entry.expires_at => {
                self.hits += 1;
                tracing::debug!(%segment, %timeframe, day = %key.day, bucket = key.bucket, "article cache hit");
                Some(entry.articles.clone())
            }
            _ => {
                self.misses += 1;
                tracing::debug!(%segment, %timeframe, day = %key.day, bucket = key.bucket, "article cache miss");
                None
            }
        }
    }

    pub fn insert(&mut self, segment: Segment, timeframe: Timeframe, now: DateTime<Utc>, articles: Vec<Article>) {
        if !self.is_enabled() {
            return;
        }

        self.purge_expired(now);
        let key = self.key(segment, timeframe, now);
        self.entries.insert(
            key,
            CacheEntry {
                articles,
                expires_at: now + self.ttl,
            },
        );
    }

    pub fn purge_expired(&mut self, now: DateTime<Utc>) {
        let (day, bucket) = self.slot(now);
        self.entries
            .retain(|key, entry| key.day == day && key.bucket == bucket && now < entry.expires_at);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
