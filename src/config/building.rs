use serde::{Deserialize, Serialize};

use super::{BuildingTexture, IntValueConfig, ResourceType, RoadType};
use crate::codec::lenient;
use crate::codec::variant::CustomBuildingWire;

/// A template-defined building placed by the generator.
///
/// The building behaviour is one of nine variants; see [`BuildingVariant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CustomBuildingWire", into = "CustomBuildingWire")]
pub struct CustomBuildingConfig {
    /// Unique within the template
    pub id: i32,
    pub value: i64,
    pub guard_strength: i64,
    pub building_texture: Option<BuildingTexture>,
    pub road_type: Option<RoadType>,
    pub variant: Option<BuildingVariant>,
}

impl CustomBuildingConfig {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            value: 0,
            guard_strength: 0,
            building_texture: None,
            road_type: None,
            variant: None,
        }
    }

    pub fn active_variant(&self) -> Option<&BuildingVariant> {
        self.variant.as_ref()
    }

    /// Replace the active behaviour; `None` clears it.
    pub fn with_variant(self, variant: Option<BuildingVariant>) -> Self {
        Self { variant, ..self }
    }

    pub fn without_variant(self) -> Self {
        self.with_variant(None)
    }

    pub fn with_value(self, value: i64) -> Self {
        Self { value, ..self }
    }

    pub fn with_guard_strength(self, guard_strength: i64) -> Self {
        Self { guard_strength, ..self }
    }
}

/// Behaviour of a custom building.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildingVariant {
    Creature(CreatureBuildingConfig),
    Xdb(XdbBuildingConfig),
    PandoraBox(PandoraBoxConfig),
    Script(ScriptBuildingConfig),
    Resource(ResourceBuildingConfig),
    MageEye(MageEyeConfig),
    RunicChest(RunicChestConfig),
    Default(DefaultBuildingConfig),
    CreatureBank(CreatureBankConfig),
}

impl BuildingVariant {
    pub fn kind(&self) -> BuildingKind {
        match self {
            BuildingVariant::Creature(_) => BuildingKind::Creature,
            BuildingVariant::Xdb(_) => BuildingKind::Xdb,
            BuildingVariant::PandoraBox(_) => BuildingKind::PandoraBox,
            BuildingVariant::Script(_) => BuildingKind::Script,
            BuildingVariant::Resource(_) => BuildingKind::Resource,
            BuildingVariant::MageEye(_) => BuildingKind::MageEye,
            BuildingVariant::RunicChest(_) => BuildingKind::RunicChest,
            BuildingVariant::Default(_) => BuildingKind::Default,
            BuildingVariant::CreatureBank(_) => BuildingKind::CreatureBank,
        }
    }
}

/// Payload-free discriminant of [`BuildingVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    Creature,
    Xdb,
    PandoraBox,
    Script,
    Resource,
    MageEye,
    RunicChest,
    Default,
    CreatureBank,
}

impl BuildingKind {
    /// Priority order used when a document has several variants set.
    pub const ALL: [BuildingKind; 9] = [
        BuildingKind::Creature,
        BuildingKind::Xdb,
        BuildingKind::PandoraBox,
        BuildingKind::Script,
        BuildingKind::Resource,
        BuildingKind::MageEye,
        BuildingKind::RunicChest,
        BuildingKind::Default,
        BuildingKind::CreatureBank,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            BuildingKind::Creature => "CreatureBuildingConfig",
            BuildingKind::Xdb => "XdbBuildingConfig",
            BuildingKind::PandoraBox => "PandoraBoxConfig",
            BuildingKind::Script => "ScriptBuildingConfig",
            BuildingKind::Resource => "ResourceBuildingConfig",
            BuildingKind::MageEye => "MageEyeConfig",
            BuildingKind::RunicChest => "RunicChestConfig",
            BuildingKind::Default => "DefaultBuildingConfig",
            BuildingKind::CreatureBank => "CreatureBankConfig",
        }
    }

    /// Fresh payload for a selector switching to this variant.
    pub fn default_payload(self) -> BuildingVariant {
        match self {
            BuildingKind::Creature => BuildingVariant::Creature(CreatureBuildingConfig::default()),
            BuildingKind::Xdb => BuildingVariant::Xdb(XdbBuildingConfig::default()),
            BuildingKind::PandoraBox => BuildingVariant::PandoraBox(PandoraBoxConfig::default()),
            BuildingKind::Script => BuildingVariant::Script(ScriptBuildingConfig::default()),
            BuildingKind::Resource => BuildingVariant::Resource(ResourceBuildingConfig::default()),
            BuildingKind::MageEye => BuildingVariant::MageEye(MageEyeConfig::default()),
            BuildingKind::RunicChest => BuildingVariant::RunicChest(RunicChestConfig::default()),
            BuildingKind::Default => BuildingVariant::Default(DefaultBuildingConfig::default()),
            BuildingKind::CreatureBank => BuildingVariant::CreatureBank(CreatureBankConfig::default()),
        }
    }
}

/// Recruitable creature dwelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatureBuildingConfig {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub tier: Option<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub creature_ids: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub weekly_growth: Option<bool>,
}

/// Building taken verbatim from a game database reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XdbBuildingConfig {
    pub xdb: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PandoraBoxConfig {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub gold: Option<i64>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub experience: Option<i64>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub spells: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub creature_ids: Vec<i32>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub creature_count: Option<IntValueConfig>,
}

/// Building driven by a map script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScriptBuildingConfig {
    pub script_name: String,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceBuildingConfig {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceType>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub amount: Option<IntValueConfig>,
}

/// Reveals the surroundings, or the listed zones, when visited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MageEyeConfig {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub radius: Option<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub zone_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunicChestConfig {
    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub rune_level: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub experience_value: Option<i64>,
}

/// One of the game's stock adventure-map buildings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefaultBuildingConfig {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub building_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatureBankConfig {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub creature_bank_id: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub guards_multiplier: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_payload_matches_kind() {
        for kind in BuildingKind::ALL {
            assert_eq!(kind.default_payload().kind(), kind);
        }
    }

    #[test]
    fn test_wire_names_are_unique() {
        let mut names: Vec<_> = BuildingKind::ALL.iter().map(|kind| kind.wire_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), BuildingKind::ALL.len());
    }

    #[test]
    fn test_switching_variant_keeps_other_fields() {
        let building = CustomBuildingConfig::new(3)
            .with_value(1500)
            .with_guard_strength(40)
            .with_variant(Some(BuildingKind::MageEye.default_payload()))
            .with_variant(Some(BuildingVariant::Script(ScriptBuildingConfig {
                script_name: "Tavern".to_string(),
                object_name: None,
            })));

        assert_eq!(building.id, 3);
        assert_eq!(building.value, 1500);
        assert_eq!(building.guard_strength, 40);
        assert_eq!(building.active_variant().map(BuildingVariant::kind), Some(BuildingKind::Script));
    }

    #[test]
    fn test_encode_minimal_building() {
        let encoded = serde_json::to_value(CustomBuildingConfig::new(1)).unwrap();
        assert_eq!(encoded, json!({"Id": 1}));
    }

    #[test]
    fn test_encode_active_variant_under_its_own_field() {
        let building = CustomBuildingConfig::new(2).with_variant(Some(BuildingVariant::Resource(
            ResourceBuildingConfig {
                resource: Some(ResourceType::Gold),
                amount: Some(IntValueConfig::range(500, 1000)),
            },
        )));

        assert_eq!(
            serde_json::to_value(&building).unwrap(),
            json!({
                "Id": 2,
                "ResourceBuildingConfig": {
                    "Resource": "Gold",
                    "Amount": {"Min": 500, "Max": 1000}
                }
            })
        );
    }

    #[test]
    fn test_xdb_payload_requires_reference() {
        let err = serde_json::from_value::<CustomBuildingConfig>(json!({
            "Id": 1,
            "XdbBuildingConfig": {}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Xdb"));
    }
}
