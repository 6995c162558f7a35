use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use super::{
    ConnectionModel, CreatureBanksPool, CustomBuildingConfig, EntitiesBanModel, Faction, GeneralData,
    ScriptFeaturesConfig, StartBuildingConfig, StartSpellsConfig, TerrainConfig, TerrainType,
    ZoneGenerationConfig, ZoneRandomizationConfig,
};
use crate::codec::lenient;

/// Top-level map template.
///
/// The value is never changed in place. Every edit consumes the current
/// template and returns the replacement, so holders can treat each returned
/// value as a complete new document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateGenerationConfig {
    #[validate(length(min = 1))]
    pub template_name: String,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<ZoneGenerationConfig>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<ConnectionModel>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub terrain_configs: Vec<TerrainConfig>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub start_building_configs: Vec<StartBuildingConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub general_data: Option<GeneralData>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub base_army_multiplier: Option<f64>,

    /// Army strength multiplier per faction
    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "BTreeMap::is_empty")]
    pub multipliers: BTreeMap<Faction, f64>,

    #[serde(default, deserialize_with = "lenient::record_or_default")]
    pub script_features_config: ScriptFeaturesConfig,

    #[serde(
        rename = "EntitiesBanConfig",
        default,
        deserialize_with = "lenient::record_or_default",
        skip_serializing_if = "EntitiesBanModel::is_empty"
    )]
    pub entities_ban_config: EntitiesBanModel,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub start_spells_config: Option<StartSpellsConfig>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub custom_building_configs: Vec<CustomBuildingConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub creature_banks_pool: Option<CreatureBanksPool>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub zone_randomization_config: Option<ZoneRandomizationConfig>,
}

impl TemplateGenerationConfig {
    pub fn new(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            zones: Vec::new(),
            connections: Vec::new(),
            terrain_configs: Vec::new(),
            start_building_configs: Vec::new(),
            general_data: None,
            base_army_multiplier: None,
            multipliers: BTreeMap::new(),
            script_features_config: ScriptFeaturesConfig::default(),
            entities_ban_config: EntitiesBanModel::default(),
            start_spells_config: None,
            custom_building_configs: Vec::new(),
            creature_banks_pool: None,
            zone_randomization_config: None,
        }
    }

    pub fn with_template_name(self, template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            ..self
        }
    }

    // ----- zones -----

    /// Id for the next added zone: one above the highest id in use, or 1.
    ///
    /// Deleting the highest zone frees its id for the next zone added. `None`
    /// once a zone already uses `i32::MAX`.
    pub fn next_zone_id(&self) -> Option<i32> {
        next_id(self.zones.iter().map(|zone| zone.zone_id))
    }

    pub fn zone(&self, zone_id: i32) -> Option<&ZoneGenerationConfig> {
        self.zones.iter().find(|zone| zone.zone_id == zone_id)
    }

    pub fn zone_ids(&self) -> Vec<i32> {
        self.zones.iter().map(|zone| zone.zone_id).collect()
    }

    /// Append a default zone under the next free id. Unchanged when no id is
    /// left above the highest one.
    pub fn with_new_zone(self) -> Self {
        match self.next_zone_id() {
            Some(zone_id) => self.with_zone(ZoneGenerationConfig::new(zone_id, TerrainType::default())),
            None => {
                tracing::warn!("no zone id left above i32::MAX, zone not added");
                self
            }
        }
    }

    /// Replace the zone sharing `zone.zone_id`, or append it.
    pub fn with_zone(mut self, zone: ZoneGenerationConfig) -> Self {
        match self.zones.iter_mut().find(|existing| existing.zone_id == zone.zone_id) {
            Some(existing) => *existing = zone,
            None => self.zones.push(zone),
        }
        self
    }

    /// Remove every zone with `zone_id`.
    ///
    /// Connections, mirrors, dependant dwellings and randomization groups
    /// that point at the zone are left as they are.
    pub fn without_zone(mut self, zone_id: i32) -> Self {
        self.zones.retain(|zone| zone.zone_id != zone_id);
        self
    }

    // ----- connections -----

    pub fn with_connection(mut self, connection: ConnectionModel) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn with_connection_at(mut self, index: usize, connection: ConnectionModel) -> Self {
        if let Some(slot) = self.connections.get_mut(index) {
            *slot = connection;
        }
        self
    }

    pub fn without_connection(mut self, index: usize) -> Self {
        if index < self.connections.len() {
            self.connections.remove(index);
        }
        self
    }

    pub fn connections_of(&self, zone_id: i32) -> impl Iterator<Item = &ConnectionModel> {
        self.connections.iter().filter(move |connection| connection.connects(zone_id))
    }

    // ----- terrain -----

    pub fn terrain_config(&self, terrain_type: TerrainType) -> Option<&TerrainConfig> {
        self.terrain_configs
            .iter()
            .find(|config| config.terrain_type == terrain_type)
    }

    /// Replace the config for the same terrain, or append it.
    pub fn with_terrain_config(mut self, config: TerrainConfig) -> Self {
        match self
            .terrain_configs
            .iter_mut()
            .find(|existing| existing.terrain_type == config.terrain_type)
        {
            Some(existing) => *existing = config,
            None => self.terrain_configs.push(config),
        }
        self
    }

    pub fn without_terrain_config(mut self, terrain_type: TerrainType) -> Self {
        self.terrain_configs.retain(|config| config.terrain_type != terrain_type);
        self
    }

    // ----- start buildings -----

    pub fn with_start_building_config(mut self, config: StartBuildingConfig) -> Self {
        self.start_building_configs.push(config);
        self
    }

    pub fn without_start_building_config(mut self, index: usize) -> Self {
        if index < self.start_building_configs.len() {
            self.start_building_configs.remove(index);
        }
        self
    }

    // ----- custom buildings -----

    /// Same rule as [`Self::next_zone_id`].
    pub fn next_custom_building_id(&self) -> Option<i32> {
        next_id(self.custom_building_configs.iter().map(|building| building.id))
    }

    pub fn custom_building(&self, id: i32) -> Option<&CustomBuildingConfig> {
        self.custom_building_configs.iter().find(|building| building.id == id)
    }

    /// Replace the building sharing `building.id`, or append it.
    pub fn with_custom_building(mut self, building: CustomBuildingConfig) -> Self {
        match self
            .custom_building_configs
            .iter_mut()
            .find(|existing| existing.id == building.id)
        {
            Some(existing) => *existing = building,
            None => self.custom_building_configs.push(building),
        }
        self
    }

    pub fn without_custom_building(mut self, id: i32) -> Self {
        self.custom_building_configs.retain(|building| building.id != id);
        self
    }

    // ----- multipliers -----

    /// Set the army multiplier of `faction`. Non-finite values have no JSON
    /// form and are ignored.
    pub fn with_multiplier(mut self, faction: Faction, value: f64) -> Self {
        if value.is_finite() {
            self.multipliers.insert(faction, value);
        } else {
            tracing::debug!(%faction, value, "ignored non-finite multiplier");
        }
        self
    }

    pub fn without_multiplier(mut self, faction: Faction) -> Self {
        self.multipliers.remove(&faction);
        self
    }

    pub fn with_base_army_multiplier(self, base_army_multiplier: Option<f64>) -> Self {
        Self {
            base_army_multiplier,
            ..self
        }
    }

    // ----- sections -----

    pub fn with_general_data(self, general_data: Option<GeneralData>) -> Self {
        Self { general_data, ..self }
    }

    pub fn with_script_features(self, script_features_config: ScriptFeaturesConfig) -> Self {
        Self {
            script_features_config,
            ..self
        }
    }

    pub fn with_entities_ban(self, entities_ban_config: EntitiesBanModel) -> Self {
        Self {
            entities_ban_config,
            ..self
        }
    }

    pub fn with_start_spells(self, start_spells_config: Option<StartSpellsConfig>) -> Self {
        Self {
            start_spells_config,
            ..self
        }
    }

    pub fn with_creature_banks_pool(self, creature_banks_pool: Option<CreatureBanksPool>) -> Self {
        Self {
            creature_banks_pool,
            ..self
        }
    }

    pub fn with_zone_randomization(self, zone_randomization_config: Option<ZoneRandomizationConfig>) -> Self {
        Self {
            zone_randomization_config,
            ..self
        }
    }
}

fn next_id(ids: impl Iterator<Item = i32>) -> Option<i32> {
    ids.max().unwrap_or(0).checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn template_with_zones(ids: &[i32]) -> TemplateGenerationConfig {
        ids.iter().fold(TemplateGenerationConfig::new("Test"), |template, id| {
            template.with_zone(ZoneGenerationConfig::new(*id, TerrainType::Grass))
        })
    }

    #[test]
    fn test_first_zone_gets_id_one() {
        let template = TemplateGenerationConfig::new("Empty").with_new_zone();
        assert_eq!(template.zone_ids(), vec![1]);
    }

    #[test]
    fn test_next_zone_id_follows_maximum() {
        let template = template_with_zones(&[2, 5, 7]);
        assert_eq!(template.next_zone_id(), Some(8));

        let template = template.with_new_zone();
        assert_eq!(template.zone_ids(), vec![2, 5, 7, 8]);
        assert_eq!(template.zone(8).map(|zone| zone.terrain_type), Some(TerrainType::FirstPlayer));
    }

    #[test]
    fn test_deleted_low_ids_are_not_reused() {
        let template = template_with_zones(&[1, 2, 3]).without_zone(2).with_new_zone();
        assert_eq!(template.zone_ids(), vec![1, 3, 4]);
    }

    #[test]
    fn test_no_zone_id_left_above_maximum() {
        let template = template_with_zones(&[1, i32::MAX]);
        assert_eq!(template.next_zone_id(), None);

        let template = template.with_new_zone();
        assert_eq!(template.zone_ids(), vec![1, i32::MAX]);

        let template = template_with_zones(&[i32::MAX - 1]).with_new_zone();
        assert_eq!(template.zone_ids(), vec![i32::MAX - 1, i32::MAX]);
    }

    #[test]
    fn test_no_custom_building_id_left_above_maximum() {
        let template = TemplateGenerationConfig::new("Full").with_custom_building(CustomBuildingConfig::new(i32::MAX));
        assert_eq!(template.next_custom_building_id(), None);
    }

    #[test]
    fn test_with_zone_replaces_by_id() {
        let template = template_with_zones(&[1, 2])
            .with_zone(ZoneGenerationConfig::new(2, TerrainType::Lava));

        assert_eq!(template.zones.len(), 2);
        assert_eq!(template.zone(2).map(|zone| zone.terrain_type), Some(TerrainType::Lava));
    }

    #[test]
    fn test_without_zone_does_not_cascade() {
        let randomization = ZoneRandomizationConfig::default().with_swap_group(vec![3, 1]);
        let template = template_with_zones(&[1, 2, 3])
            .with_zone(ZoneGenerationConfig::new(1, TerrainType::Grass).with_mirror_zone_id(Some(3)))
            .with_connection(ConnectionModel::new(3, 1))
            .with_zone_randomization(Some(randomization.clone()));

        let trimmed = template.clone().without_zone(3);

        assert_eq!(trimmed.zone_ids(), vec![1, 2]);
        assert_eq!(trimmed.connections, template.connections);
        assert_eq!(trimmed.zone(1).and_then(|zone| zone.mirror_zone_id), Some(3));
        assert_eq!(trimmed.zone_randomization_config, Some(randomization));
    }

    #[test]
    fn test_connection_edits() {
        let template = TemplateGenerationConfig::new("Edges")
            .with_connection(ConnectionModel::new(1, 2))
            .with_connection(ConnectionModel::new(2, 3))
            .with_connection_at(0, ConnectionModel::new(1, 3).with_main(true))
            .with_connection_at(7, ConnectionModel::new(9, 9));

        assert_eq!(template.connections.len(), 2);
        assert!(template.connections[0].is_main);
        assert_eq!(template.connections_of(3).count(), 2);
        assert_eq!(template.connections_of(1).count(), 1);

        let template = template.without_connection(0).without_connection(5);
        assert_eq!(template.connections, vec![ConnectionModel::new(2, 3)]);
    }

    #[test]
    fn test_terrain_config_is_unique_per_terrain() {
        let template = TemplateGenerationConfig::new("Terrain")
            .with_terrain_config(TerrainConfig::new(TerrainType::Snow).with_building_added(1))
            .with_terrain_config(TerrainConfig::new(TerrainType::Sand))
            .with_terrain_config(TerrainConfig::new(TerrainType::Snow).with_building_added(2));

        assert_eq!(template.terrain_configs.len(), 2);
        assert_eq!(
            template.terrain_config(TerrainType::Snow).map(|config| config.buildings_to_add.clone()),
            Some(vec![2])
        );

        let template = template.without_terrain_config(TerrainType::Snow);
        assert!(template.terrain_config(TerrainType::Snow).is_none());
    }

    #[test]
    fn test_custom_building_ids() {
        let template = TemplateGenerationConfig::new("Buildings");
        assert_eq!(template.next_custom_building_id(), Some(1));

        let template = template
            .with_custom_building(CustomBuildingConfig::new(4))
            .with_custom_building(CustomBuildingConfig::new(4).with_value(10));
        assert_eq!(template.custom_building_configs.len(), 1);
        assert_eq!(template.custom_building(4).map(|building| building.value), Some(10));
        assert_eq!(template.next_custom_building_id(), Some(5));

        assert!(template.without_custom_building(4).custom_building_configs.is_empty());
    }

    #[test]
    fn test_multipliers() {
        let template = TemplateGenerationConfig::new("Armies")
            .with_multiplier(Faction::Inferno, 1.2)
            .with_multiplier(Faction::Haven, 0.8)
            .with_multiplier(Faction::Inferno, 1.5)
            .without_multiplier(Faction::Haven);

        assert_eq!(template.multipliers.len(), 1);
        assert_eq!(template.multipliers.get(&Faction::Inferno), Some(&1.5));
    }

    #[test]
    fn test_non_finite_multipliers_are_ignored() {
        let template = TemplateGenerationConfig::new("Armies")
            .with_multiplier(Faction::Haven, 1.1)
            .with_multiplier(Faction::Haven, f64::INFINITY)
            .with_multiplier(Faction::Dungeon, f64::NAN);

        assert_eq!(template.multipliers.get(&Faction::Haven), Some(&1.1));
        assert!(!template.multipliers.contains_key(&Faction::Dungeon));
    }

    #[test]
    fn test_edits_leave_original_untouched() {
        let original = template_with_zones(&[1]);
        let edited = original.clone().with_new_zone().with_template_name("Other");

        assert_eq!(original.zone_ids(), vec![1]);
        assert_eq!(original.template_name, "Test");
        assert_eq!(edited.zone_ids(), vec![1, 2]);
    }

    #[test]
    fn test_template_name_must_not_be_empty() {
        assert!(TemplateGenerationConfig::new("").validate().is_err());
        assert!(TemplateGenerationConfig::new("Jebus").validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_next_zone_id_is_above_every_id(ids in proptest::collection::vec(-50i32..500, 0..20)) {
            let template = template_with_zones(&ids);
            let next = template.next_zone_id().unwrap();
            prop_assert!(template.zones.iter().all(|zone| zone.zone_id < next));
            prop_assert_eq!(next, ids.iter().copied().max().unwrap_or(0) + 1);
        }
    }
}
