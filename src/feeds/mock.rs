use super::{Article, FeedData, FeedFetcher};
use crate::error::Result;
use crate::market::{Segment, Timeframe};
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};

const MOCK_NEWS_BASE: &str = "https://mock-news.com";

pub const ARTICLES_PER_FETCH: i64 = 5;

/// Synthesize the placeholder articles for a selection, in generation order.
///
/// Article `i` (1-based) is dated `today - offset + 5 * i` days. For the
/// one-week window this puts later articles after `today`; the arithmetic is
/// kept as is.
pub fn generate_articles(segment: Segment, timeframe: Timeframe, today: NaiveDate) -> Vec<Article> {
    let start_date = today - Duration::days(timeframe.offset_days());

    (1..=ARTICLES_PER_FETCH)
        .map(|i| Article {
            title: format!(
                "({}) Market Update: {} Shows Volatility {}",
                segment,
                segment.headline_subject(),
                i
            ),
            source: format!("Financial Times {}", i % 3 + 1),
            date: start_date + Duration::days(5 * i),
            summary: format!(
                "Detailed analysis shows that {} indices experienced a sharp rise followed by a \
                 consolidation phase over the {} period. Key drivers included FII activity and \
                 sector-specific policy changes. The outlook remains cautious.",
                segment, timeframe
            ),
            url: format!("{}/{}-{}", MOCK_NEWS_BASE, segment.slug(), i),
        })
        .collect()
}

/// String-keyed entry point. Keys must match a segment name or timeframe label
/// exactly; anything else fails instead of falling back to a default.
pub fn generate_for_keys(segment_key: &str, timeframe_label: &str, today: NaiveDate) -> Result<Vec<Article>> {
    let segment = Segment::from_name(segment_key)?;
    let timeframe = Timeframe::from_label(timeframe_label)?;
    Ok(generate_articles(segment, timeframe, today))
}

pub struct MockNewsFetcher {
    reference_date: Option<NaiveDate>,
}

impl MockNewsFetcher {
    pub fn new(reference_date: Option<NaiveDate>) -> Self {
        Self { reference_date }
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

#[async_trait]
impl FeedFetcher for MockNewsFetcher {
    async fn fetch(&self, segment: Segment, timeframe: Timeframe) -> anyhow::Result<FeedData> {
        let today = self.today();
        tracing::debug!(%segment, %timeframe, %today, "generating mock articles");
        Ok(FeedData::News(generate_articles(segment, timeframe, today)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_five_articles_for_every_selection() {
        let today = date(2024, 1, 15);
        for segment in Segment::ALL {
            for timeframe in Timeframe::ALL {
                assert_eq!(generate_articles(segment, timeframe, today).len(), 5);
            }
        }
    }

    #[test]
    fn test_dates_fall_inside_derived_window() {
        let today = date(2024, 3, 1);
        for segment in Segment::ALL {
            for timeframe in Timeframe::ALL {
                let lower = today - Duration::days(timeframe.offset_days() + 1);
                let upper = today - Duration::days(1) + Duration::days(25);
                for article in generate_articles(segment, timeframe, today) {
                    assert!(article.date > lower, "{} too early", article.date);
                    assert!(article.date <= upper, "{} too late", article.date);
                }
            }
        }
    }

    #[test]
    fn test_generation_is_idempotent_for_a_fixed_day() {
        let today = date(2024, 6, 30);
        let first = generate_articles(Segment::SmallCapFno, Timeframe::LastThreeMonths, today);
        let second = generate_articles(Segment::SmallCapFno, Timeframe::LastThreeMonths, today);
        assert_eq!(first, second);
    }

    #[test]
    fn test_url_slug() {
        let articles = generate_articles(Segment::LargeCapFno, Timeframe::LastOneMonth, date(2024, 1, 15));
        assert_eq!(articles[2].url, "https://mock-news.com/large-cap-fno-3");
    }

    #[test]
    fn test_mid_cap_week_scenario() {
        let articles = generate_articles(Segment::MidCapFno, Timeframe::LastOneWeek, date(2024, 1, 15));
        let dates: Vec<NaiveDate> = articles.iter().map(|a| a.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 13),
                date(2024, 1, 18),
                date(2024, 1, 23),
                date(2024, 1, 28),
                date(2024, 2, 2),
            ]
        );
        assert_eq!(
            articles[0].title,
            "(Mid Cap FNO) Market Update: Nifty Midcap 100 Shows Volatility 1"
        );
    }

    #[test]
    fn test_sources_rotate() {
        let articles = generate_articles(Segment::AllFno, Timeframe::LastOneMonth, date(2024, 1, 15));
        let sources: Vec<&str> = articles.iter().map(|a| a.source.as_str()).collect();
        assert_eq!(
            sources,
            vec![
                "Financial Times 2",
                "Financial Times 3",
                "Financial Times 1",
                "Financial Times 2",
                "Financial Times 3",
            ]
        );
    }

    #[test]
    fn test_summary_mentions_segment_and_timeframe() {
        let articles = generate_articles(Segment::SmallCapFno, Timeframe::LastOneWeek, date(2024, 1, 15));
        assert_eq!(
            articles[0].summary,
            "Detailed analysis shows that Small Cap FNO indices experienced a sharp rise followed by a \
             consolidation phase over the Last One Week period. Key drivers included FII activity and \
             sector-specific policy changes. The outlook remains cautious."
        );
    }

    #[test]
    fn test_generate_for_keys_rejects_unknown_segment() {
        let err = generate_for_keys("Large Cap Equity", "Last One Week", date(2024, 1, 15)).unwrap_err();
        assert_eq!(err, Error::UnknownSegment("Large Cap Equity".to_string()));
    }

    #[test]
    fn test_generate_for_keys_rejects_unknown_timeframe() {
        let err = generate_for_keys("All FNO", "Last Decade", date(2024, 1, 15)).unwrap_err();
        assert_eq!(err, Error::UnknownTimeframe("Last Decade".to_string()));
    }

    #[test]
    fn test_generate_for_keys_rejects_non_canonical_keys() {
        let today = date(2024, 1, 15);
        assert_eq!(
            generate_for_keys("  mid cap fno ", "Last One Week", today).unwrap_err(),
            Error::UnknownSegment("  mid cap fno ".to_string())
        );
        assert_eq!(
            generate_for_keys("Mid Cap FNO", "LAST ONE WEEK", today).unwrap_err(),
            Error::UnknownTimeframe("LAST ONE WEEK".to_string())
        );
    }

    #[test]
    fn test_generate_for_keys_matches_typed_generation() {
        let today = date(2024, 1, 15);
        let by_keys = generate_for_keys("Mid Cap FNO", "Last One Week", today).unwrap();
        assert_eq!(by_keys, generate_articles(Segment::MidCapFno, Timeframe::LastOneWeek, today));
    }

    #[tokio::test]
    async fn test_fetcher_uses_reference_date() {
        let fetcher = MockNewsFetcher::new(Some(date(2024, 1, 15)));
        let data = fetcher
            .fetch(Segment::MidCapFno, Timeframe::LastOneWeek)
            .await
            .unwrap();
        match data {
            FeedData::News(articles) => assert_eq!(articles[0].date, date(2024, 1, 13)),
            other => panic!("unexpected feed data: {:?}", other),
        }
    }
}
