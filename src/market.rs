//! Closed option sets offered by the filter sidebar.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Segment {
    #[default]
    #[serde(rename = "Large Cap FNO")]
    LargeCapFno,
    #[serde(rename = "Mid Cap FNO")]
    MidCapFno,
    #[serde(rename = "Small Cap FNO")]
    SmallCapFno,
    #[serde(rename = "All FNO")]
    AllFno,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::LargeCapFno,
        Segment::MidCapFno,
        Segment::SmallCapFno,
        Segment::AllFno,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Segment::LargeCapFno => "Large Cap FNO",
            Segment::MidCapFno => "Mid Cap FNO",
            Segment::SmallCapFno => "Small Cap FNO",
            Segment::AllFno => "All FNO",
        }
    }

    /// Descriptive search query a news provider would be asked for.
    pub fn query(self) -> &'static str {
        match self {
            Segment::LargeCapFno => "Nifty 50, Sensex, Reliance, HDFC Bank, Large Cap FNO news",
            Segment::MidCapFno => "Nifty Midcap 100, Midcap FNO news",
            Segment::SmallCapFno => "Nifty Smallcap 100, Smallcap FNO news",
            Segment::AllFno => "Indian F&O market news, derivative segment",
        }
    }

    /// First comma-separated term of the query, used as the headline subject.
    pub fn headline_subject(self) -> &'static str {
        self.query().split(',').next().unwrap_or_default().trim()
    }

    /// URL-safe form of the name: lowercase, spaces replaced by hyphens.
    pub fn slug(self) -> String {
        self.name().replace(' ', "-").to_lowercase()
    }

    /// Exact lookup by display name. `FromStr` is the lenient variant for user input.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|seg| seg.name() == name)
            .ok_or_else(|| Error::UnknownSegment(name.to_string()))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Segment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|seg| seg.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownSegment(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "Last One Week")]
    LastOneWeek,
    #[default]
    #[serde(rename = "Last One Month")]
    LastOneMonth,
    #[serde(rename = "Last Three Months")]
    LastThreeMonths,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [
        Timeframe::LastOneWeek,
        Timeframe::LastOneMonth,
        Timeframe::LastThreeMonths,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::LastOneWeek => "Last One Week",
            Timeframe::LastOneMonth => "Last One Month",
            Timeframe::LastThreeMonths => "Last Three Months",
        }
    }

    pub fn offset_days(self) -> i64 {
        match self {
            Timeframe::LastOneWeek => 7,
            Timeframe::LastOneMonth => 30,
            Timeframe::LastThreeMonths => 90,
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tf| tf.label() == label)
            .ok_or_else(|| Error::UnknownTimeframe(label.to_string()))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tf| tf.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownTimeframe(s.to_string()))
    }
}
