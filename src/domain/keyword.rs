//! Tracked keyword model and keyword source payload parsing.
//!
//! A [`Keyword`] is a search term whose rank is tracked for one domain on one
//! device. Keywords are owned by the external keyword source; the plugin only
//! reads them and treats each collection as immutable for a render cycle.

use crate::domain::error::{Result, SerpdeckError};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Stable identifier of a tracked keyword.
pub type KeywordId = u64;

/// Device context a keyword's ranking applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Mobile,
}

impl Device {
    /// Every device, in tab order.
    pub const ALL: [Self; 2] = [Self::Desktop, Self::Mobile];

    /// Lowercase wire name (`desktop` / `mobile`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }

    /// Capitalized name for tabs and details.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Mobile => "Mobile",
        }
    }

    /// Returns the other device.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Desktop => Self::Mobile,
            Self::Mobile => Self::Desktop,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = SerpdeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "mobile" => Ok(Self::Mobile),
            other => Err(SerpdeckError::Config(format!("unknown device `{other}`"))),
        }
    }
}

/// A tracked search keyword.
///
/// Field names follow the keyword source's camelCase JSON. The identifier is
/// accepted as either `ID` or `id`, and `lastUpdated` as unix seconds or an
/// RFC 3339 / RFC 2822 date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    #[serde(rename = "ID", alias = "id")]
    pub id: KeywordId,
    pub keyword: String,
    pub device: Device,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Current rank. `0` means the keyword is not ranked.
    #[serde(default)]
    pub position: u32,
    /// Rank per day, keyed by `YYYY-M-D` date strings.
    #[serde(default)]
    pub history: BTreeMap<String, u32>,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_updated: i64,
    /// Favorite flag.
    #[serde(default)]
    pub sticky: bool,
    /// Set while the source is re-scraping this keyword.
    #[serde(default)]
    pub updating: bool,
}

impl Keyword {
    /// Creates a keyword with no tags, country, rank or history.
    ///
    /// # Examples
    ///
    /// ```
    /// use serpdeck::domain::{Device, Keyword};
    ///
    /// let keyword = Keyword::new(7, "best espresso", Device::Mobile);
    /// assert_eq!(keyword.id, 7);
    /// assert_eq!(keyword.position, 0);
    /// ```
    #[must_use]
    pub fn new(id: KeywordId, keyword: impl Into<String>, device: Device) -> Self {
        Self {
            id,
            keyword: keyword.into(),
            device,
            country: String::new(),
            tags: Vec::new(),
            position: 0,
            history: BTreeMap::new(),
            url: String::new(),
            last_updated: 0,
            sticky: false,
            updating: false,
        }
    }

    /// Whether the keyword currently holds a rank.
    #[must_use]
    pub const fn is_ranked(&self) -> bool {
        self.position > 0
    }

    /// Returns the history entries in chronological order.
    ///
    /// Keys that are not valid dates are skipped.
    #[must_use]
    pub fn dated_history(&self) -> Vec<(NaiveDate, u32)> {
        let mut entries: Vec<(NaiveDate, u32)> = self
            .history
            .iter()
            .filter_map(|(date, rank)| {
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .ok()
                    .map(|d| (d, *rank))
            })
            .collect();
        entries.sort_by_key(|(date, _)| *date);
        entries
    }

    /// Returns the last `days` history entries in chronological order.
    #[must_use]
    pub fn recent_history(&self, days: usize) -> Vec<(NaiveDate, u32)> {
        let entries = self.dated_history();
        let skip = entries.len().saturating_sub(days);
        entries.into_iter().skip(skip).collect()
    }

    /// Rank change between the previous history entry and the current position.
    ///
    /// Positive values mean the keyword moved up (towards rank 1). Returns `None`
    /// when either side is unranked or there is no previous entry.
    #[must_use]
    pub fn position_change(&self) -> Option<i64> {
        let entries = self.dated_history();
        let previous = match entries.as_slice() {
            [.., (_, prev), (_, last)] if *last == self.position => *prev,
            [.., (_, last)] if *last != self.position => *last,
            _ => return None,
        };
        if previous == 0 || !self.is_ranked() {
            return None;
        }
        Some(i64::from(previous) - i64::from(self.position))
    }

    /// Returns a short description of how long ago the keyword was updated.
    ///
    /// - Never updated: "never"
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn updated_ago(&self, now: i64) -> String {
        if self.last_updated <= 0 {
            return "never".to_string();
        }
        let diff = now - self.last_updated;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// Accepts a unix timestamp, a date string, or `null`.
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(i64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Seconds(secs)) => secs,
        Some(Raw::Text(text)) => chrono::DateTime::parse_from_rfc3339(&text)
            .or_else(|_| chrono::DateTime::parse_from_rfc2822(&text))
            .map(|dt| dt.timestamp())
            .unwrap_or(0),
        None => 0,
    })
}

/// Parses the keyword source's JSON output.
///
/// Accepts either a bare array of keywords or an object with a `keywords`
/// array. Entries that do not describe a valid keyword are skipped and logged.
///
/// # Errors
///
/// Returns [`SerpdeckError::Json`] if the payload is not JSON, and
/// [`SerpdeckError::Source`] if it holds neither shape.
///
/// # Examples
///
/// ```
/// use serpdeck::domain::parse_keywords;
///
/// let payload = r#"{"keywords": [{"ID": 3, "keyword": "rust", "device": "desktop"}]}"#;
/// let keywords = parse_keywords(payload).unwrap();
/// assert_eq!(keywords[0].id, 3);
/// ```
pub fn parse_keywords(payload: &str) -> Result<Vec<Keyword>> {
    let value: serde_json::Value = serde_json::from_str(payload)?;

    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        serde_json::Value::Object(mut map) => match map.remove("keywords") {
            Some(serde_json::Value::Array(entries)) => entries,
            _ => {
                return Err(SerpdeckError::Source(
                    "expected a `keywords` array in source output".to_string(),
                ))
            }
        },
        _ => {
            return Err(SerpdeckError::Source(
                "expected a JSON array or object from keyword source".to_string(),
            ))
        }
    };

    let total = entries.len();
    let keywords: Vec<Keyword> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Keyword>(entry) {
            Ok(keyword) => Some(keyword),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed keyword entry");
                None
            }
        })
        .collect();

    tracing::debug!(total, parsed = keywords.len(), "keyword source payload parsed");
    Ok(keywords)
}
