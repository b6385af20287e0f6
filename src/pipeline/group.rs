//! Partitioning keywords by device context.

use crate::domain::{Device, Keyword, KeywordId};
use std::collections::BTreeMap;

/// Keywords keyed by device, with a guaranteed entry for the active device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceGroups {
    active: Device,
    groups: BTreeMap<Device, Vec<Keyword>>,
}

impl DeviceGroups {
    /// Keywords of the active device, in pipeline order.
    #[must_use]
    pub fn active(&self) -> &[Keyword] {
        self.groups.get(&self.active).map_or(&[], Vec::as_slice)
    }

    /// Keywords of any device; empty when the device has no entry.
    #[must_use]
    pub fn get(&self, device: Device) -> &[Keyword] {
        self.groups.get(&device).map_or(&[], Vec::as_slice)
    }

    /// Identifiers of the active device's keywords, in order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<KeywordId> {
        self.active().iter().map(|k| k.id).collect()
    }
}

/// Partitions keywords by device, keeping their relative order.
///
/// The result always contains an entry for `active`, even when no keyword
/// belongs to it.
///
/// # Examples
///
/// ```
/// use serpdeck::domain::{Device, Keyword};
/// use serpdeck::pipeline::group_by_device;
///
/// let groups = group_by_device(&[Keyword::new(1, "a", Device::Desktop)], Device::Mobile);
/// assert!(groups.active().is_empty());
/// assert_eq!(groups.get(Device::Desktop).len(), 1);
/// ```
#[must_use]
pub fn group_by_device(keywords: &[Keyword], active: Device) -> DeviceGroups {
    let mut groups: BTreeMap<Device, Vec<Keyword>> = BTreeMap::new();
    groups.insert(active, Vec::new());
    for keyword in keywords {
        groups.entry(keyword.device).or_default().push(keyword.clone());
    }
    DeviceGroups { active, groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_entry_exists_for_empty_input() {
        let groups = group_by_device(&[], Device::Desktop);
        assert_eq!(groups.groups.keys().copied().collect::<Vec<_>>(), vec![Device::Desktop]);
        assert!(groups.active().is_empty());
    }

    #[test]
    fn every_grouped_keyword_matches_its_device() {
        let keywords = vec![
            Keyword::new(1, "a", Device::Mobile),
            Keyword::new(2, "b", Device::Desktop),
            Keyword::new(3, "c", Device::Mobile),
        ];
        let groups = group_by_device(&keywords, Device::Mobile);
        for device in Device::ALL {
            assert!(groups.get(device).iter().all(|k| k.device == device));
        }
        assert_eq!(groups.visible_ids(), vec![1, 3]);
    }
}
