use serde::{Deserialize, Serialize};

use crate::codec::lenient;

/// Zone shuffling applied by the generator.
///
/// Each entry of `zones_to_swap` is a swap group: its first zone (the
/// anchor) may trade places with any other zone of the same group. A zone
/// may show up in several groups and in `zones_to_randomize` at once; the
/// model keeps such overlaps as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZoneRandomizationConfig {
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub zones_to_swap: Vec<Vec<i32>>,

    /// Mirror the swap picked for a group onto every group of equal size
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub is_symmetrical_swap: Option<bool>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub zones_to_randomize: Vec<i64>,
}

impl ZoneRandomizationConfig {
    pub fn with_swap_group(mut self, group: Vec<i32>) -> Self {
        self.zones_to_swap.push(group);
        self
    }

    pub fn with_swap_group_at(mut self, index: usize, group: Vec<i32>) -> Self {
        if let Some(slot) = self.zones_to_swap.get_mut(index) {
            *slot = group;
        }
        self
    }

    pub fn without_swap_group(mut self, index: usize) -> Self {
        if index < self.zones_to_swap.len() {
            self.zones_to_swap.remove(index);
        }
        self
    }

    pub fn with_symmetrical_swap(self, is_symmetrical_swap: Option<bool>) -> Self {
        Self { is_symmetrical_swap, ..self }
    }

    pub fn with_zone_to_randomize(mut self, zone_id: i64) -> Self {
        self.zones_to_randomize.push(zone_id);
        self
    }

    pub fn without_zone_to_randomize(mut self, zone_id: i64) -> Self {
        self.zones_to_randomize.retain(|id| *id != zone_id);
        self
    }

    /// First zone of a swap group.
    pub fn anchor(&self, group: usize) -> Option<i32> {
        self.zones_to_swap.get(group)?.first().copied()
    }

    /// Zones the anchor of `group` may be swapped with.
    pub fn swap_candidates(&self, group: usize) -> &[i32] {
        match self.zones_to_swap.get(group) {
            Some(zones) if !zones.is_empty() => &zones[1..],
            _ => &[],
        }
    }

    /// Every zone id mentioned by swap groups or the randomize list.
    pub fn referenced_zone_ids(&self) -> Vec<i64> {
        self.zones_to_swap
            .iter()
            .flatten()
            .map(|id| i64::from(*id))
            .chain(self.zones_to_randomize.iter().copied())
            .collect()
    }
}
