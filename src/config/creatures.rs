use serde::{Deserialize, Serialize};

use super::IntValueConfig;
use crate::codec::lenient;

/// Creature selection rules for generated dwellings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreaturesConfiguration {
    /// How many creature slots get replaced
    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub replacements_count: Option<IntValueConfig>,

    /// Prefer the faction native to the zone terrain
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub terrain_faction: Option<bool>,

    /// Allow factions no player has picked
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub non_player_factions: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub no_grades: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub grades_only: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub neutrals: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub base_cost_multiplier: Option<f64>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub tier_cost_multiplier: Option<f64>,

    /// Per-tier multiplier overrides
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub creature_modifiers: Vec<CreatureModifier>,

    /// Per-tier explicit creature pools
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub tier_replacements: Vec<CreatureTierReplacement>,
}

impl CreaturesConfiguration {
    /// Modifier for a tier; the first entry wins when tiers repeat.
    pub fn modifier_for(&self, tier: i32) -> Option<&CreatureModifier> {
        self.creature_modifiers.iter().find(|modifier| modifier.tier == tier)
    }

    /// Creature pool for a tier; the first entry wins when tiers repeat.
    pub fn replacement_for(&self, tier: i32) -> Option<&CreatureTierReplacement> {
        self.tier_replacements.iter().find(|replacement| replacement.tier == tier)
    }

    pub fn with_modifier(mut self, modifier: CreatureModifier) -> Self {
        self.creature_modifiers.push(modifier);
        self
    }

    pub fn without_modifier(mut self, index: usize) -> Self {
        if index < self.creature_modifiers.len() {
            self.creature_modifiers.remove(index);
        }
        self
    }

    pub fn with_tier_replacement(mut self, replacement: CreatureTierReplacement) -> Self {
        self.tier_replacements.push(replacement);
        self
    }

    pub fn without_tier_replacement(mut self, index: usize) -> Self {
        if index < self.tier_replacements.len() {
            self.tier_replacements.remove(index);
        }
        self
    }
}

/// Multiplier override for one creature tier (1-7).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatureModifier {
    pub tier: i32,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

/// Explicit creature ids to draw from for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatureTierReplacement {
    pub tier: i32,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub creature_ids: Vec<i32>,
}
