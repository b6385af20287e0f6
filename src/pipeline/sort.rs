//! Keyword ordering.
//!
//! Every ordering is a stable sort, so keywords that compare equal keep their
//! relative input order and re-rendering unchanged inputs never reshuffles rows.

use crate::domain::error::{Result, SerpdeckError};
use crate::domain::Keyword;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The active ordering of the keyword list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Least recently updated first.
    #[default]
    DateAsc,
    /// Most recently updated first.
    DateDesc,
    /// Best rank first; unranked keywords last.
    PosAsc,
    /// Worst rank first; unranked keywords first.
    PosDesc,
    /// Keyword text A to Z, case-insensitive.
    AlphaAsc,
    /// Keyword text Z to A, case-insensitive.
    AlphaDesc,
    /// Collection order as delivered by the keyword source.
    ///
    /// This is also where unrecognized sort names end up, see
    /// [`SortKey::parse_lenient`].
    Insertion,
}

impl SortKey {
    /// Keys offered by the sort cycle, in cycle order.
    pub const CYCLE: [Self; 6] = [
        Self::DateAsc,
        Self::DateDesc,
        Self::PosAsc,
        Self::PosDesc,
        Self::AlphaAsc,
        Self::AlphaDesc,
    ];

    /// Wire name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateAsc => "date_asc",
            Self::DateDesc => "date_desc",
            Self::PosAsc => "pos_asc",
            Self::PosDesc => "pos_desc",
            Self::AlphaAsc => "alpha_asc",
            Self::AlphaDesc => "alpha_desc",
            Self::Insertion => "insertion",
        }
    }

    /// Short human label for the toolbar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DateAsc => "Oldest update",
            Self::DateDesc => "Newest update",
            Self::PosAsc => "Top position",
            Self::PosDesc => "Lowest position",
            Self::AlphaAsc => "Alphabetically (A-Z)",
            Self::AlphaDesc => "Alphabetically (Z-A)",
            Self::Insertion => "As added",
        }
    }

    /// Next key in the sort cycle. `Insertion` re-enters the cycle at the start.
    #[must_use]
    pub fn next(self) -> Self {
        Self::CYCLE
            .iter()
            .position(|key| *key == self)
            .map_or(Self::CYCLE[0], |idx| Self::CYCLE[(idx + 1) % Self::CYCLE.len()])
    }

    /// Parses a sort name, falling back to [`SortKey::Insertion`] when it is
    /// not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use serpdeck::pipeline::SortKey;
    ///
    /// assert_eq!(SortKey::parse_lenient("pos_desc"), SortKey::PosDesc);
    /// assert_eq!(SortKey::parse_lenient("volume_desc"), SortKey::Insertion);
    /// ```
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|e| {
            tracing::debug!(sort = %name, error = %e, "unrecognized sort key, using insertion order");
            Self::Insertion
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SerpdeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "date_asc" => Ok(Self::DateAsc),
            "date_desc" => Ok(Self::DateDesc),
            "pos_asc" => Ok(Self::PosAsc),
            "pos_desc" => Ok(Self::PosDesc),
            "alpha_asc" => Ok(Self::AlphaAsc),
            "alpha_desc" => Ok(Self::AlphaDesc),
            "insertion" => Ok(Self::Insertion),
            other => Err(SerpdeckError::Config(format!("unknown sort key `{other}`"))),
        }
    }
}

/// Rank used for ordering; unranked keywords sort behind every real rank.
const fn effective_rank(keyword: &Keyword) -> u32 {
    if keyword.position == 0 {
        u32::MAX
    } else {
        keyword.position
    }
}

fn compare_text(a: &Keyword, b: &Keyword) -> Ordering {
    a.keyword.to_lowercase().cmp(&b.keyword.to_lowercase())
}

/// Returns a newly ordered copy of `keywords`.
///
/// # Examples
///
/// ```
/// use serpdeck::domain::{Device, Keyword};
/// use serpdeck::pipeline::{sort_keywords, SortKey};
///
/// let keywords = vec![
///     Keyword::new(1, "beta", Device::Desktop),
///     Keyword::new(2, "Alpha", Device::Desktop),
/// ];
/// let sorted = sort_keywords(&keywords, SortKey::AlphaAsc);
/// assert_eq!(sorted[0].id, 2);
/// assert_eq!(keywords[0].id, 1);
/// ```
#[must_use]
pub fn sort_keywords(keywords: &[Keyword], key: SortKey) -> Vec<Keyword> {
    let mut sorted = keywords.to_vec();
    match key {
        SortKey::DateAsc => sorted.sort_by_key(|k| k.last_updated),
        SortKey::DateDesc => sorted.sort_by(|a, b| b.last_updated.cmp(&a.last_updated)),
        SortKey::PosAsc => sorted.sort_by_key(effective_rank),
        SortKey::PosDesc => sorted.sort_by(|a, b| effective_rank(b).cmp(&effective_rank(a))),
        SortKey::AlphaAsc => sorted.sort_by(compare_text),
        SortKey::AlphaDesc => sorted.sort_by(|a, b| compare_text(b, a)),
        SortKey::Insertion => {}
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Device;

    fn keyword(id: u64, text: &str, position: u32, last_updated: i64) -> Keyword {
        Keyword {
            position,
            last_updated,
            ..Keyword::new(id, text, Device::Desktop)
        }
    }

    fn ids(keywords: &[Keyword]) -> Vec<u64> {
        keywords.iter().map(|k| k.id).collect()
    }

    fn sample() -> Vec<Keyword> {
        vec![
            keyword(1, "delta", 5, 300),
            keyword(2, "Alpha", 0, 100),
            keyword(3, "charlie", 2, 300),
            keyword(4, "bravo", 5, 200),
        ]
    }

    #[test]
    fn date_orders_are_stable() {
        assert_eq!(ids(&sort_keywords(&sample(), SortKey::DateAsc)), vec![2, 4, 1, 3]);
        assert_eq!(ids(&sort_keywords(&sample(), SortKey::DateDesc)), vec![1, 3, 4, 2]);
    }

    #[test]
    fn unranked_keywords_trail_ascending_rank() {
        assert_eq!(ids(&sort_keywords(&sample(), SortKey::PosAsc)), vec![3, 1, 4, 2]);
        assert_eq!(ids(&sort_keywords(&sample(), SortKey::PosDesc)), vec![2, 1, 4, 3]);
    }

    #[test]
    fn alphabetical_ignores_case() {
        assert_eq!(ids(&sort_keywords(&sample(), SortKey::AlphaAsc)), vec![2, 4, 3, 1]);
        assert_eq!(ids(&sort_keywords(&sample(), SortKey::AlphaDesc)), vec![1, 3, 4, 2]);
    }

    #[test]
    fn insertion_keeps_input_and_input_is_untouched() {
        let keywords = sample();
        let sorted = sort_keywords(&keywords, SortKey::Insertion);
        assert_eq!(sorted, keywords);
        let _ = sort_keywords(&keywords, SortKey::PosAsc);
        assert_eq!(ids(&keywords), vec![1, 2, 3, 4]);
    }

    #[test]
    fn equal_keys_preserve_relative_order() {
        let keywords = vec![
            keyword(10, "same", 3, 50),
            keyword(11, "same", 3, 50),
            keyword(12, "same", 3, 50),
        ];
        for key in SortKey::CYCLE {
            assert_eq!(ids(&sort_keywords(&keywords, key)), vec![10, 11, 12], "{key}");
        }
    }

    #[test]
    fn parsing_is_strict_or_lenient() {
        assert!("bogus".parse::<SortKey>().is_err());
        assert_eq!(SortKey::parse_lenient("bogus"), SortKey::Insertion);
        for key in SortKey::CYCLE {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn cycle_wraps_and_leaves_insertion() {
        assert_eq!(SortKey::AlphaDesc.next(), SortKey::DateAsc);
        assert_eq!(SortKey::Insertion.next(), SortKey::DateAsc);
        assert_eq!(SortKey::DateAsc.next(), SortKey::DateDesc);
    }
}
