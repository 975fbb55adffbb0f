pub mod mock;

use crate::market::{Segment, Timeframe};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum FeedData {
    News(Vec<Article>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub source: String,
    pub date: NaiveDate,
    pub summary: String,
    pub url: String,
}

impl Article {
    /// Collapsed one-line header: `title - (source | Jan 13, 2024)`.
    pub fn headline(&self) -> String {
        format!(
            "{} - ({} | {})",
            self.title,
            self.source,
            self.date.format("%b %d, %Y")
        )
    }
}

/// Source of articles for a segment and timeframe.
///
/// The mock generator is the only implementation; a real news API client
/// would slot in here.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, segment: Segment, timeframe: Timeframe) -> Result<FeedData>;
}
