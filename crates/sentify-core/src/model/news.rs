//! News articles, tickers and look-back windows

use crate::error::{Result, SentifyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A news article as delivered by the market backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Backend-assigned identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Publisher name
    pub source: String,
    /// Publication time, RFC 3339
    pub published_at: String,
    /// Canonical article URL
    pub url: String,
    /// Short summary text
    #[serde(default)]
    pub summary: String,
}

impl NewsItem {
    /// Publication date (`YYYY-MM-DD`) when the timestamp parses
    pub fn published_date(&self) -> Option<chrono::NaiveDate> {
        chrono::DateTime::parse_from_rfc3339(&self.published_at)
            .map(|dt| dt.date_naive())
            .or_else(|_| {
                chrono::NaiveDateTime::parse_from_str(&self.published_at, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|dt| dt.date())
            })
            .ok()
    }
}

/// A searchable ticker with its latest quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTicker {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
}

/// Look-back window for company news
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1d")]
    OneDay,
    #[default]
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "2w")]
    TwoWeeks,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl TimeRange {
    /// Every supported range, shortest first
    pub const ALL: [TimeRange; 9] = [
        TimeRange::OneDay,
        TimeRange::OneWeek,
        TimeRange::TwoWeeks,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::ThreeYears,
        TimeRange::FiveYears,
    ];

    /// Wire code understood by the backend (`1d`, `1w`, ...)
    pub fn code(self) -> &'static str {
        match self {
            TimeRange::OneDay => "1d",
            TimeRange::OneWeek => "1w",
            TimeRange::TwoWeeks => "2w",
            TimeRange::OneMonth => "1m",
            TimeRange::ThreeMonths => "3m",
            TimeRange::SixMonths => "6m",
            TimeRange::OneYear => "1y",
            TimeRange::ThreeYears => "3y",
            TimeRange::FiveYears => "5y",
        }
    }

    /// Number of days covered
    pub fn days(self) -> u32 {
        match self {
            TimeRange::OneDay => 1,
            TimeRange::OneWeek => 7,
            TimeRange::TwoWeeks => 14,
            TimeRange::OneMonth => 30,
            TimeRange::ThreeMonths => 90,
            TimeRange::SixMonths => 180,
            TimeRange::OneYear => 365,
            TimeRange::ThreeYears => 1095,
            TimeRange::FiveYears => 1825,
        }
    }

    /// Short label for display
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::OneDay => "24H",
            TimeRange::OneWeek => "1W",
            TimeRange::TwoWeeks => "2W",
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::SixMonths => "6M",
            TimeRange::OneYear => "1Y",
            TimeRange::ThreeYears => "3Y",
            TimeRange::FiveYears => "5Y",
        }
    }
}

impl FromStr for TimeRange {
    type Err = SentifyError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        TimeRange::ALL
            .into_iter()
            .find(|range| range.code() == code)
            .ok_or_else(|| SentifyError::InvalidTimeRange(s.to_string()))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_parse() {
        assert_eq!("1w".parse::<TimeRange>().unwrap(), TimeRange::OneWeek);
        assert_eq!(" 3Y ".parse::<TimeRange>().unwrap(), TimeRange::ThreeYears);
        assert!(matches!(
            "2d".parse::<TimeRange>(),
            Err(SentifyError::InvalidTimeRange(code)) if code == "2d"
        ));
    }

    #[test]
    fn test_time_range_days() {
        let days: Vec<u32> = TimeRange::ALL.iter().map(|r| r.days()).collect();
        assert_eq!(days, vec![1, 7, 14, 30, 90, 180, 365, 1095, 1825]);
        assert_eq!(TimeRange::default(), TimeRange::OneWeek);
    }

    #[test]
    fn test_time_range_serde_uses_codes() {
        let json = serde_json::to_string(&TimeRange::SixMonths).unwrap();
        assert_eq!(json, "\"6m\"");
        let parsed: TimeRange = serde_json::from_str("\"1d\"").unwrap();
        assert_eq!(parsed, TimeRange::OneDay);
        assert_eq!(TimeRange::OneDay.label(), "24H");
    }

    #[test]
    fn test_news_item_wire_format() {
        let item: NewsItem = serde_json::from_value(serde_json::json!({
            "id": "n1",
            "title": "Apple beats estimates",
            "source": "Reuters",
            "publishedAt": "2025-01-30T21:15:00Z",
            "url": "https://example.com/a",
            "summary": "Revenue grew."
        }))
        .unwrap();
        assert_eq!(item.source, "Reuters");
        assert_eq!(
            item.published_date(),
            chrono::NaiveDate::from_ymd_opt(2025, 1, 30)
        );
    }

    #[test]
    fn test_published_date_naive_timestamp() {
        let item = NewsItem {
            id: "n2".to_string(),
            title: String::new(),
            source: String::new(),
            published_at: "2025-02-01T08:00:00.123456".to_string(),
            url: String::new(),
            summary: String::new(),
        };
        assert_eq!(item.published_date(), chrono::NaiveDate::from_ymd_opt(2025, 2, 1));
    }
}
