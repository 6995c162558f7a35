use serde::{Deserialize, Serialize};

use super::{Faction, TerrainType};
use crate::codec::lenient;

/// Building overrides for one terrain.
///
/// When `mirror_terrain_type` is set the terrain copies the other terrain's
/// rules and the remaining fields are ignored downstream. They are still
/// kept and written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TerrainConfig {
    pub terrain_type: TerrainType,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub mirror_terrain_type: Option<TerrainType>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub buildings_to_add: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub buildings_to_delete: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub resource_buildings: Option<TerrainBuildingsConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub magic_buildings: Option<TerrainBuildingsConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub treasure_buildings: Option<TerrainBuildingsConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub dwelling_buildings: Option<TerrainBuildingsConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub utility_buildings: Option<TerrainBuildingsConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub guarded_buildings: Option<TerrainBuildingsConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub decorative_buildings: Option<TerrainBuildingsConfig>,
}

impl TerrainConfig {
    pub fn new(terrain_type: TerrainType) -> Self {
        Self {
            terrain_type,
            mirror_terrain_type: None,
            buildings_to_add: Vec::new(),
            buildings_to_delete: Vec::new(),
            resource_buildings: None,
            magic_buildings: None,
            treasure_buildings: None,
            dwelling_buildings: None,
            utility_buildings: None,
            guarded_buildings: None,
            decorative_buildings: None,
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirror_terrain_type.is_some()
    }

    /// Setting a mirror leaves the override fields untouched.
    pub fn with_mirror(self, mirror_terrain_type: Option<TerrainType>) -> Self {
        Self { mirror_terrain_type, ..self }
    }

    pub fn with_building_added(mut self, building: i32) -> Self {
        self.buildings_to_add.push(building);
        self
    }

    pub fn with_building_deleted(mut self, building: i32) -> Self {
        self.buildings_to_delete.push(building);
        self
    }

    /// Category overrides keyed by their wire name.
    pub fn categories(&self) -> [(&'static str, Option<&TerrainBuildingsConfig>); 7] {
        [
            ("ResourceBuildings", self.resource_buildings.as_ref()),
            ("MagicBuildings", self.magic_buildings.as_ref()),
            ("TreasureBuildings", self.treasure_buildings.as_ref()),
            ("DwellingBuildings", self.dwelling_buildings.as_ref()),
            ("UtilityBuildings", self.utility_buildings.as_ref()),
            ("GuardedBuildings", self.guarded_buildings.as_ref()),
            ("DecorativeBuildings", self.decorative_buildings.as_ref()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TerrainBuildingsConfig {
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub buildings: Vec<i32>,

    /// Replace the stock list instead of extending it
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub replace_default: Option<bool>,
}

/// Town buildings granted at game start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartBuildingConfig {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub terrain_type: Option<TerrainType>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub faction: Option<Faction>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub buildings: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub apply_to_all_zones: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mirror_keeps_overrides() {
        let config = TerrainConfig::new(TerrainType::Snow)
            .with_building_added(12)
            .with_mirror(Some(TerrainType::FirstPlayer));

        assert!(config.is_mirrored());
        assert_eq!(config.buildings_to_add, vec![12]);

        let encoded = serde_json::to_value(&config).unwrap();
        assert_eq!(
            encoded,
            json!({"TerrainType": "Snow", "MirrorTerrainType": "FirstPlayer", "BuildingsToAdd": [12]})
        );
    }

    #[test]
    fn test_decode_categories() {
        let config: TerrainConfig = serde_json::from_value(json!({
            "TerrainType": "sand",
            "MagicBuildings": {"Buildings": [1, 2], "ReplaceDefault": true},
            "GuardedBuildings": "none"
        }))
        .unwrap();

        let set: Vec<_> = config
            .categories()
            .iter()
            .filter_map(|(name, category)| category.map(|_| *name))
            .collect();
        assert_eq!(set, vec!["MagicBuildings"]);
        assert_eq!(config.magic_buildings.unwrap().buildings, vec![1, 2]);
    }

    #[test]
    fn test_empty_start_building_config() {
        let decoded: StartBuildingConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(decoded, StartBuildingConfig::default());
        assert_eq!(serde_json::to_value(&decoded).unwrap(), json!({}));
    }
}
