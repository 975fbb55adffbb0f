use crate::cache::{ArticleCache, CacheStats};
use crate::feeds::{Article, FeedData, FeedFetcher};
use crate::market::{Segment, Timeframe};
use crate::session::Selection;
use chrono::{DateTime, Utc};

/// What the rendering side should show for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// No fetch requested yet, nothing rendered.
    Idle,
    Showing {
        heading: String,
        articles: Vec<Article>,
    },
    NoResults {
        message: String,
    },
    Failed(String),
}

impl View {
    pub fn articles(&self) -> &[Article] {
        match self {
            View::Showing { articles, .. } => articles,
            _ => &[],
        }
    }
}

pub fn heading(segment: Segment, timeframe: Timeframe) -> String {
    format!("News for {} ({})", segment, timeframe)
}

pub fn no_results_message(segment: Segment, timeframe: Timeframe) -> String {
    format!(
        "No news found for {} in the last {}.",
        segment,
        timeframe.label().to_lowercase()
    )
}

/// Newest first. Articles sharing a date keep their generation order.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Owns the session selection and turns it into a [`View`].
pub struct NewsDesk {
    selection: Selection,
    fetcher: Box<dyn FeedFetcher>,
    cache: ArticleCache,
    view: View,
}

impl NewsDesk {
    pub fn new(selection: Selection, fetcher: Box<dyn FeedFetcher>, cache: ArticleCache) -> Self {
        Self {
            selection,
            fetcher,
            cache,
            view: View::Idle,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub async fn refresh(&mut self, now: DateTime<Utc>) -> &View {
        if !self.selection.fetch_requested {
            self.view = View::Idle;
            return &self.view;
        }

        let Selection {
            segment, timeframe, ..
        } = self.selection;

        self.view = match self.load(segment, timeframe, now).await {
            Ok(mut articles) if !articles.is_empty() => {
                sort_newest_first(&mut articles);
                tracing::info!(%segment, %timeframe, count = articles.len(), "news loaded");
                View::Showing {
                    heading: heading(segment, timeframe),
                    articles,
                }
            }
            Ok(_) => {
                tracing::info!(%segment, %timeframe, "no news found");
                View::NoResults {
                    message: no_results_message(segment, timeframe),
                }
            }
            Err(e) => {
                tracing::warn!(%segment, %timeframe, error = %e, "news fetch failed");
                View::Failed(e)
            }
        };

        &self.view
    }

    pub async fn request_fetch(&mut self, now: DateTime<Utc>) -> &View {
        self.selection.request_fetch();
        self.refresh(now).await
    }

    pub async fn select_segment(&mut self, segment: Segment, now: DateTime<Utc>) -> &View {
        if self.selection.set_segment(segment) && self.selection.fetch_requested {
            return self.refresh(now).await;
        }
        &self.view
    }

    pub async fn select_timeframe(&mut self, timeframe: Timeframe, now: DateTime<Utc>) -> &View {
        if self.selection.set_timeframe(timeframe) && self.selection.fetch_requested {
            return self.refresh(now).await;
        }
        &self.view
    }

    async fn load(
        &mut self,
        segment: Segment,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Result<Vec<Article>, String> {
        if let Some(articles) = self.cache.get(segment, timeframe, now) {
            return Ok(articles);
        }

        match self.fetcher.fetch(segment, timeframe).await {
            Ok(FeedData::News(articles)) => {
                if !articles.is_empty() {
                    self.cache.insert(segment, timeframe, now, articles.clone());
                }
                Ok(articles)
            }
            Ok(FeedData::Error(e)) => Err(e),
            Err(e) => Err(format!("{:#}", e)),
        }
    }
}
