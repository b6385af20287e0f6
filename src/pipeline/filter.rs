//! Keyword filtering by country, tag and free-text search.

use crate::domain::Keyword;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active filter criteria.
///
/// Every criterion is a pass-through when empty. Non-empty criteria are
/// combined conjunctively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterParams {
    /// Country codes to keep.
    pub countries: BTreeSet<String>,
    /// Tags to keep; a keyword matches if it carries any of them.
    pub tags: BTreeSet<String>,
    /// Case-insensitive substring of the keyword text.
    pub search: String,
}

impl FilterParams {
    /// Whether no criterion is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.tags.is_empty() && self.search.is_empty()
    }

    /// Adds the tag if absent, removes it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_string());
        }
    }

    /// Adds the country if absent, removes it otherwise.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.countries.remove(country) {
            self.countries.insert(country.to_string());
        }
    }

    /// Returns whether a single keyword satisfies every active criterion.
    #[must_use]
    pub fn matches(&self, keyword: &Keyword) -> bool {
        let country_ok = self.countries.is_empty()
            || (!keyword.country.is_empty() && self.countries.contains(&keyword.country));

        let tags_ok =
            self.tags.is_empty() || keyword.tags.iter().any(|tag| self.tags.contains(tag));

        let search_ok = self.search.is_empty()
            || keyword
                .keyword
                .to_lowercase()
                .contains(&self.search.to_lowercase());

        country_ok && tags_ok && search_ok
    }
}

/// Returns the keywords matching `params`, preserving input order.
///
/// # Examples
///
/// ```
/// use serpdeck::domain::{Device, Keyword};
/// use serpdeck::pipeline::{filter_keywords, FilterParams};
///
/// let keywords = vec![
///     Keyword::new(1, "Rust Book", Device::Desktop),
///     Keyword::new(2, "go tour", Device::Desktop),
/// ];
/// let params = FilterParams { search: "rust".to_string(), ..FilterParams::default() };
/// let kept = filter_keywords(&keywords, &params);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].id, 1);
/// ```
#[must_use]
pub fn filter_keywords(keywords: &[Keyword], params: &FilterParams) -> Vec<Keyword> {
    if params.is_empty() {
        return keywords.to_vec();
    }
    keywords
        .iter()
        .filter(|keyword| params.matches(keyword))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Device;

    fn keyword(id: u64, text: &str, country: &str, tags: &[&str]) -> Keyword {
        Keyword {
            country: country.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            ..Keyword::new(id, text, Device::Desktop)
        }
    }

    fn sample() -> Vec<Keyword> {
        vec![
            keyword(1, "Espresso Machine", "US", &["coffee", "hardware"]),
            keyword(2, "pour over guide", "DE", &["coffee"]),
            keyword(3, "tea kettle", "US", &[]),
            keyword(4, "cold brew", "", &["coffee"]),
        ]
    }

    fn ids(keywords: &[Keyword]) -> Vec<u64> {
        keywords.iter().map(|k| k.id).collect()
    }

    #[test]
    fn empty_params_pass_everything_through() {
        let keywords = sample();
        assert_eq!(filter_keywords(&keywords, &FilterParams::default()), keywords);
    }

    #[test]
    fn country_filter_excludes_missing_country() {
        let params = FilterParams {
            countries: ["US".to_string()].into_iter().collect(),
            ..FilterParams::default()
        };
        assert_eq!(ids(&filter_keywords(&sample(), &params)), vec![1, 3]);
    }

    #[test]
    fn tag_filter_matches_any_intersection() {
        let params = FilterParams {
            tags: ["hardware".to_string(), "unused".to_string()].into_iter().collect(),
            ..FilterParams::default()
        };
        assert_eq!(ids(&filter_keywords(&sample(), &params)), vec![1]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let params = FilterParams {
            search: "MACH".to_string(),
            ..FilterParams::default()
        };
        assert_eq!(ids(&filter_keywords(&sample(), &params)), vec![1]);
    }

    #[test]
    fn criteria_are_conjunctive() {
        let params = FilterParams {
            countries: ["US".to_string()].into_iter().collect(),
            tags: ["coffee".to_string()].into_iter().collect(),
            search: "e".to_string(),
        };
        assert_eq!(ids(&filter_keywords(&sample(), &params)), vec![1]);
    }

    #[test]
    fn toggles_add_and_remove() {
        let mut params = FilterParams::default();
        params.toggle_tag("coffee");
        params.toggle_country("US");
        assert!(params.tags.contains("coffee"));
        assert!(params.countries.contains("US"));
        params.toggle_tag("coffee");
        params.toggle_country("US");
        assert!(params.is_empty());
    }
}
