//! Keyword processing pipeline: filter, sort, then group by device.
//!
//! The pipeline turns the raw keyword collection plus the user's filter, sort
//! and device choices into the ordered view the table renders. It is pure:
//! identical inputs always produce a deep-equal [`DeviceGroups`], which is what
//! makes [`KeywordPipeline`]'s memoization safe.
//!
//! ```text
//! keywords ─► restrict to device ─► filter ─► sort ─► group by device ─► view
//! ```
//!
//! # Modules
//!
//! - [`filter`]: Country, tag and search criteria
//! - [`sort`]: Sort keys and stable ordering
//! - [`group`]: Device partitioning with a guaranteed active entry

pub mod filter;
pub mod group;
pub mod sort;

pub use filter::{filter_keywords, FilterParams};
pub use group::{group_by_device, DeviceGroups};
pub use sort::{sort_keywords, SortKey};

use crate::domain::{Device, Keyword};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Runs the full pipeline once.
///
/// Filtering always runs before sorting, since the filter decides which ties
/// the sort sees. Grouping is the final projection.
///
/// # Examples
///
/// ```
/// use serpdeck::domain::{Device, Keyword};
/// use serpdeck::pipeline::{process_keywords, FilterParams, SortKey};
///
/// let keywords = vec![
///     Keyword { tags: vec!["a".into()], ..Keyword::new(1, "one", Device::Desktop) },
///     Keyword { tags: vec!["b".into()], ..Keyword::new(2, "two", Device::Mobile) },
/// ];
/// let params = FilterParams { tags: ["a".to_string()].into_iter().collect(), ..FilterParams::default() };
/// let view = process_keywords(&keywords, &params, SortKey::DateAsc, Device::Desktop);
/// assert_eq!(view.visible_ids(), vec![1]);
/// ```
#[must_use]
pub fn process_keywords(
    keywords: &[Keyword],
    params: &FilterParams,
    sort: SortKey,
    device: Device,
) -> DeviceGroups {
    let on_device: Vec<Keyword> = keywords
        .iter()
        .filter(|k| k.device == device)
        .cloned()
        .collect();
    let filtered = filter_keywords(&on_device, params);
    let sorted = sort_keywords(&filtered, sort);
    group_by_device(&sorted, device)
}

/// Everything the pipeline output depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PipelineKey {
    revision: u64,
    device: Device,
    sort: SortKey,
    params: FilterParams,
}

/// Memoizing wrapper around [`process_keywords`].
///
/// The keyword collection is identified by a revision number that the owner
/// bumps whenever it replaces the collection.
#[derive(Debug, Clone, Default)]
pub struct KeywordPipeline {
    cached: Option<(PipelineKey, Arc<DeviceGroups>)>,
}

impl KeywordPipeline {
    /// Creates an empty pipeline cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { cached: None }
    }

    /// Returns the processed view, recomputing only when an input changed.
    pub fn view(
        &mut self,
        keywords: &[Keyword],
        revision: u64,
        params: &FilterParams,
        sort: SortKey,
        device: Device,
    ) -> Arc<DeviceGroups> {
        let key = PipelineKey {
            revision,
            device,
            sort,
            params: params.clone(),
        };

        if let Some((cached_key, groups)) = &self.cached {
            if *cached_key == key {
                return Arc::clone(groups);
            }
        }

        let _span = tracing::debug_span!(
            "process_keywords",
            total = keywords.len(),
            revision,
            device = %device,
            sort = %sort
        )
        .entered();

        let groups = Arc::new(process_keywords(keywords, params, sort, device));
        tracing::debug!(visible = groups.active().len(), "keyword view recomputed");
        self.cached = Some((key, Arc::clone(&groups)));
        groups
    }

    /// Drops the cached view.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

/// Unique tags across the collection, in first-seen order.
#[must_use]
pub fn all_tags(keywords: &[Keyword]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    keywords
        .iter()
        .flat_map(|k| k.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Unique non-empty countries across the collection, sorted.
#[must_use]
pub fn all_countries(keywords: &[Keyword]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.country.as_str())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
