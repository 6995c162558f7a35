use serde::{Deserialize, Serialize};

use super::{DwellingGeneration, DwellingGenerationConfig, Faction, IntValueConfig, ResourceType, TerrainType};
use crate::codec::lenient;

/// Generation rules for one zone of the map.
///
/// `zone_id` is the stable identity other records refer to (connections,
/// mirrors, dependant dwellings, randomization groups). It is never an index
/// into the zone list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZoneGenerationConfig {
    pub zone_id: i32,

    pub terrain_type: TerrainType,

    /// Zone whose content this one copies
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub mirror_zone_id: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub town: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub town_faction: Option<Faction>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub position_x: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub position_y: Option<i32>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub dwelling_generation_config: Option<DwellingGenerationConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub mine_generation_config: Option<ResourcesConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub treasure_value: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub treasure_density: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub resource_piles_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub treasure_chests_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub artifacts_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub pandora_boxes_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub shrines_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub witch_huts_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub prisons_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub scholars_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub learning_stones_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub marketplaces_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub creature_banks_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub guard_strength: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub town_guard_strength: Option<IntValueConfig>,
}

impl ZoneGenerationConfig {
    pub fn new(zone_id: i32, terrain_type: TerrainType) -> Self {
        Self {
            zone_id,
            terrain_type,
            mirror_zone_id: None,
            town: None,
            town_faction: None,
            size: None,
            position_x: None,
            position_y: None,
            dwelling_generation_config: None,
            mine_generation_config: None,
            treasure_value: None,
            treasure_density: None,
            resource_piles_count: None,
            treasure_chests_count: None,
            artifacts_count: None,
            pandora_boxes_count: None,
            shrines_count: None,
            witch_huts_count: None,
            prisons_count: None,
            scholars_count: None,
            learning_stones_count: None,
            marketplaces_count: None,
            creature_banks_count: None,
            guard_strength: None,
            town_guard_strength: None,
        }
    }

    pub fn with_terrain_type(self, terrain_type: TerrainType) -> Self {
        Self { terrain_type, ..self }
    }

    pub fn with_mirror_zone_id(self, mirror_zone_id: Option<i32>) -> Self {
        Self { mirror_zone_id, ..self }
    }

    pub fn with_dwelling_generation(self, dwelling_generation_config: Option<DwellingGenerationConfig>) -> Self {
        Self { dwelling_generation_config, ..self }
    }

    pub fn with_mine_generation(self, mine_generation_config: Option<ResourcesConfig>) -> Self {
        Self { mine_generation_config, ..self }
    }

    /// Feature amounts keyed by their wire name, in declaration order.
    pub fn feature_ranges(&self) -> [(&'static str, Option<&IntValueConfig>); 15] {
        [
            ("TreasureValue", self.treasure_value.as_ref()),
            ("TreasureDensity", self.treasure_density.as_ref()),
            ("ResourcePilesCount", self.resource_piles_count.as_ref()),
            ("TreasureChestsCount", self.treasure_chests_count.as_ref()),
            ("ArtifactsCount", self.artifacts_count.as_ref()),
            ("PandoraBoxesCount", self.pandora_boxes_count.as_ref()),
            ("ShrinesCount", self.shrines_count.as_ref()),
            ("WitchHutsCount", self.witch_huts_count.as_ref()),
            ("PrisonsCount", self.prisons_count.as_ref()),
            ("ScholarsCount", self.scholars_count.as_ref()),
            ("LearningStonesCount", self.learning_stones_count.as_ref()),
            ("MarketplacesCount", self.marketplaces_count.as_ref()),
            ("CreatureBanksCount", self.creature_banks_count.as_ref()),
            ("GuardStrength", self.guard_strength.as_ref()),
            ("TownGuardStrength", self.town_guard_strength.as_ref()),
        ]
    }

    /// Zone ids this zone points at.
    pub fn referenced_zone_ids(&self) -> Vec<i32> {
        let dependant = self
            .dwelling_generation_config
            .as_ref()
            .and_then(|dwellings| match dwellings.active_generation() {
                Some(DwellingGeneration::Dependant(config)) => Some(config.zone_id),
                _ => None,
            });
        self.mirror_zone_id.into_iter().chain(dependant).collect()
    }
}

/// Mine counts per resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourcesConfig {
    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub wood: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub ore: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub mercury: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub crystal: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub sulfur: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub gem: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub gold: Option<IntValueConfig>,
}

impl ResourcesConfig {
    pub fn get(&self, resource: ResourceType) -> Option<&IntValueConfig> {
        match resource {
            ResourceType::Wood => self.wood.as_ref(),
            ResourceType::Ore => self.ore.as_ref(),
            ResourceType::Mercury => self.mercury.as_ref(),
            ResourceType::Crystal => self.crystal.as_ref(),
            ResourceType::Sulfur => self.sulfur.as_ref(),
            ResourceType::Gem => self.gem.as_ref(),
            ResourceType::Gold => self.gold.as_ref(),
        }
    }

    pub fn with(self, resource: ResourceType, amount: Option<IntValueConfig>) -> Self {
        match resource {
            ResourceType::Wood => Self { wood: amount, ..self },
            ResourceType::Ore => Self { ore: amount, ..self },
            ResourceType::Mercury => Self { mercury: amount, ..self },
            ResourceType::Crystal => Self { crystal: amount, ..self },
            ResourceType::Sulfur => Self { sulfur: amount, ..self },
            ResourceType::Gem => Self { gem: amount, ..self },
            ResourceType::Gold => Self { gold: amount, ..self },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildingTexture, DependantDwellingConfig};
    use serde_json::json;

    #[test]
    fn test_new_zone_encodes_identity_only() {
        let zone = ZoneGenerationConfig::new(3, TerrainType::Snow);
        assert_eq!(
            serde_json::to_value(&zone).unwrap(),
            json!({"ZoneId": 3, "TerrainType": "Snow"})
        );
    }

    #[test]
    fn test_decode_is_case_insensitive_for_terrain() {
        let lower: ZoneGenerationConfig =
            serde_json::from_value(json!({"ZoneId": 1, "TerrainType": "firstplayer"})).unwrap();
        let canonical: ZoneGenerationConfig =
            serde_json::from_value(json!({"ZoneId": 1, "TerrainType": "FirstPlayer"})).unwrap();
        assert_eq!(lower, canonical);
        assert_eq!(lower.terrain_type, TerrainType::FirstPlayer);
    }

    #[test]
    fn test_required_fields() {
        assert!(serde_json::from_value::<ZoneGenerationConfig>(json!({"TerrainType": "Sand"})).is_err());
        assert!(serde_json::from_value::<ZoneGenerationConfig>(json!({"ZoneId": 1})).is_err());
        assert!(
            serde_json::from_value::<ZoneGenerationConfig>(json!({"ZoneId": 1, "TerrainType": "Ocean"}))
                .is_err()
        );
    }

    #[test]
    fn test_optional_fields_are_coerced() {
        let zone: ZoneGenerationConfig = serde_json::from_value(json!({
            "ZoneId": 2,
            "TerrainType": "Lava",
            "Town": "yes",
            "TownFaction": "Pirates",
            "ShrinesCount": 4,
            "MirrorZoneId": 1
        }))
        .unwrap();

        assert_eq!(zone.town, None);
        assert_eq!(zone.town_faction, None);
        assert_eq!(zone.shrines_count, None);
        assert_eq!(zone.mirror_zone_id, Some(1));
    }

    #[test]
    fn test_feature_ranges_follow_fields() {
        let zone = ZoneGenerationConfig {
            prisons_count: Some(IntValueConfig::fixed(1)),
            ..ZoneGenerationConfig::new(1, TerrainType::Grass)
        };

        let ranges = zone.feature_ranges();
        let set: Vec<_> = ranges.iter().filter(|(_, range)| range.is_some()).map(|(name, _)| *name).collect();
        assert_eq!(set, vec!["PrisonsCount"]);
    }

    #[test]
    fn test_referenced_zone_ids() {
        let dwellings = DwellingGenerationConfig::new(BuildingTexture::Neutral)
            .with_generation(Some(DwellingGeneration::Dependant(DependantDwellingConfig::new(7))));
        let zone = ZoneGenerationConfig::new(1, TerrainType::Grass)
            .with_mirror_zone_id(Some(4))
            .with_dwelling_generation(Some(dwellings));

        assert_eq!(zone.referenced_zone_ids(), vec![4, 7]);
    }

    #[test]
    fn test_resources_by_type() {
        let mines = ResourcesConfig::default()
            .with(ResourceType::Gold, Some(IntValueConfig::fixed(1)))
            .with(ResourceType::Wood, Some(IntValueConfig::range(1, 2)));

        assert_eq!(mines.get(ResourceType::Gold), Some(&IntValueConfig::fixed(1)));
        assert_eq!(mines.get(ResourceType::Ore), None);
        assert_eq!(
            serde_json::to_value(&mines).unwrap(),
            json!({"Wood": {"Min": 1, "Max": 2}, "Gold": {"Min": 1, "Max": 1}})
        );
    }
}
