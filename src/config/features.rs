use serde::{Deserialize, Serialize};

use super::Faction;
use crate::codec::lenient;

/// Map-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeneralData {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub map_size: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub underground: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub max_heroes: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub starting_heroes: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub starting_gold: Option<i64>,
}

/// Toggles for behaviour implemented by the map script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScriptFeaturesConfig {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub disable_town_portal: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub disable_dimension_door: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub hero_hire_ban: Option<bool>,

    /// Days between guard strength increases
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub guards_progress_interval: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub guards_progress_value: Option<f64>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub experience_multiplier: Option<f64>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub combat_time_limit: Option<i32>,
}

/// Game content removed from the generated map. Every list holds catalog ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntitiesBanModel {
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub banned_spells: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub banned_artifacts: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub banned_creatures: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub banned_heroes: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub banned_skills: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub banned_buildings: Vec<i32>,
}

impl EntitiesBanModel {
    pub fn is_empty(&self) -> bool {
        self.banned_spells.is_empty()
            && self.banned_artifacts.is_empty()
            && self.banned_creatures.is_empty()
            && self.banned_heroes.is_empty()
            && self.banned_skills.is_empty()
            && self.banned_buildings.is_empty()
    }

    /// Add a spell ban unless already present.
    pub fn with_spell_banned(mut self, spell: i32) -> Self {
        push_unique(&mut self.banned_spells, spell);
        self
    }

    pub fn with_artifact_banned(mut self, artifact: i32) -> Self {
        push_unique(&mut self.banned_artifacts, artifact);
        self
    }

    pub fn with_creature_banned(mut self, creature: i32) -> Self {
        push_unique(&mut self.banned_creatures, creature);
        self
    }
}

fn push_unique(ids: &mut Vec<i32>, id: i32) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

/// Spells every hero starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartSpellsConfig {
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub global_spells: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub faction_spells: Vec<FactionStartSpells>,
}

impl StartSpellsConfig {
    /// Spells granted to heroes of `faction`, global ones first.
    pub fn spells_for(&self, faction: Faction) -> Vec<i32> {
        let specific = self
            .faction_spells
            .iter()
            .filter(|entry| entry.faction == faction)
            .flat_map(|entry| entry.spells.iter().copied());
        self.global_spells.iter().copied().chain(specific).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FactionStartSpells {
    pub faction: Faction,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub spells: Vec<i32>,
}

/// Creature banks the generator may pick from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatureBanksPool {
    /// Use `banks` instead of the stock pool
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub non_default: Option<bool>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub banks: Vec<CreatureBankPoolEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatureBankPoolEntry {
    pub bank_id: i32,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub guards_multiplier: Option<f64>,
}
