//! Wire shape of the one-of owners.
//!
//! The JSON format stores each variant of an owner under its own nullable
//! field. These records keep that shape so documents with several variants set
//! can still be represented and inspected; conversion into the model keeps the
//! first non-null field in priority order.

use serde::{Deserialize, Serialize};

use super::lenient;
use crate::config::{
    BuildingTexture, BuildingVariant, CreatureBankConfig, CreatureBuildingConfig, CreaturesConfiguration,
    CustomBuildingConfig, DefaultBuildingConfig, DependantDwellingConfig, DwellingByPointsConfig,
    DwellingGeneration, DwellingGenerationConfig, MageEyeConfig, PandoraBoxConfig, RandomDwellingConfig,
    ResourceBuildingConfig, RoadType, RunicChestConfig, ScriptBuildingConfig, StaticDwellingConfig,
    XdbBuildingConfig,
};

/// A record holding one nullable field per variant.
pub trait OneOf {
    type Variant;

    /// First non-null variant in priority order.
    fn active_variant(&self) -> Option<Self::Variant>;

    /// Clear every variant field, then set the one matching `variant`.
    fn set_variant(self, variant: Option<Self::Variant>) -> Self;

    fn clear_variants(self) -> Self;

    /// Number of non-null variant fields; above one means an ambiguous document.
    fn active_count(&self) -> usize;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DwellingGenerationWire {
    pub building_texture: BuildingTexture,

    #[serde(default, deserialize_with = "lenient::record_or_default")]
    pub creatures_configuration: CreaturesConfiguration,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub random_dwelling_config: Option<RandomDwellingConfig>,

    #[serde(default, deserialize_with = "lenient::list_option", skip_serializing_if = "Option::is_none")]
    pub static_dwelling_configs: Option<Vec<StaticDwellingConfig>>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub dwelling_by_points_config: Option<DwellingByPointsConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub dependant_dwelling_config: Option<DependantDwellingConfig>,
}

impl OneOf for DwellingGenerationWire {
    type Variant = DwellingGeneration;

    fn active_variant(&self) -> Option<DwellingGeneration> {
        if let Some(config) = &self.random_dwelling_config {
            return Some(DwellingGeneration::Random(config.clone()));
        }
        if let Some(configs) = &self.static_dwelling_configs {
            return Some(DwellingGeneration::Static(configs.clone()));
        }
        if let Some(config) = &self.dwelling_by_points_config {
            return Some(DwellingGeneration::ByPoints(config.clone()));
        }
        self.dependant_dwelling_config
            .as_ref()
            .map(|config| DwellingGeneration::Dependant(config.clone()))
    }

    fn set_variant(self, variant: Option<DwellingGeneration>) -> Self {
        let mut wire = self.clear_variants();
        match variant {
            Some(DwellingGeneration::Random(config)) => wire.random_dwelling_config = Some(config),
            Some(DwellingGeneration::Static(configs)) => wire.static_dwelling_configs = Some(configs),
            Some(DwellingGeneration::ByPoints(config)) => wire.dwelling_by_points_config = Some(config),
            Some(DwellingGeneration::Dependant(config)) => wire.dependant_dwelling_config = Some(config),
            None => {}
        }
        wire
    }

    fn clear_variants(self) -> Self {
        Self {
            random_dwelling_config: None,
            static_dwelling_configs: None,
            dwelling_by_points_config: None,
            dependant_dwelling_config: None,
            ..self
        }
    }

    fn active_count(&self) -> usize {
        [
            self.random_dwelling_config.is_some(),
            self.static_dwelling_configs.is_some(),
            self.dwelling_by_points_config.is_some(),
            self.dependant_dwelling_config.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

impl From<DwellingGenerationWire> for DwellingGenerationConfig {
    fn from(wire: DwellingGenerationWire) -> Self {
        let active = wire.active_count();
        if active > 1 {
            tracing::warn!(active, "dwelling generation has several strategies set, keeping the first");
        }
        let generation = wire.active_variant();
        Self {
            building_texture: wire.building_texture,
            creatures_configuration: wire.creatures_configuration,
            generation,
        }
    }
}

impl From<DwellingGenerationConfig> for DwellingGenerationWire {
    fn from(config: DwellingGenerationConfig) -> Self {
        Self {
            building_texture: config.building_texture,
            creatures_configuration: config.creatures_configuration,
            ..Self::default()
        }
        .set_variant(config.generation)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomBuildingWire {
    pub id: i32,

    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "is_zero")]
    pub value: i64,

    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "is_zero")]
    pub guard_strength: i64,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub building_texture: Option<BuildingTexture>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub road_type: Option<RoadType>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub creature_building_config: Option<CreatureBuildingConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub xdb_building_config: Option<XdbBuildingConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub pandora_box_config: Option<PandoraBoxConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub script_building_config: Option<ScriptBuildingConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub resource_building_config: Option<ResourceBuildingConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub mage_eye_config: Option<MageEyeConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub runic_chest_config: Option<RunicChestConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub default_building_config: Option<DefaultBuildingConfig>,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub creature_bank_config: Option<CreatureBankConfig>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl OneOf for CustomBuildingWire {
    type Variant = BuildingVariant;

    fn active_variant(&self) -> Option<BuildingVariant> {
        let candidates = [
            self.creature_building_config.clone().map(BuildingVariant::Creature),
            self.xdb_building_config.clone().map(BuildingVariant::Xdb),
            self.pandora_box_config.clone().map(BuildingVariant::PandoraBox),
            self.script_building_config.clone().map(BuildingVariant::Script),
            self.resource_building_config.clone().map(BuildingVariant::Resource),
            self.mage_eye_config.clone().map(BuildingVariant::MageEye),
            self.runic_chest_config.clone().map(BuildingVariant::RunicChest),
            self.default_building_config.clone().map(BuildingVariant::Default),
            self.creature_bank_config.clone().map(BuildingVariant::CreatureBank),
        ];
        candidates.into_iter().flatten().next()
    }

    fn set_variant(self, variant: Option<BuildingVariant>) -> Self {
        let mut wire = self.clear_variants();
        match variant {
            Some(BuildingVariant::Creature(config)) => wire.creature_building_config = Some(config),
            Some(BuildingVariant::Xdb(config)) => wire.xdb_building_config = Some(config),
            Some(BuildingVariant::PandoraBox(config)) => wire.pandora_box_config = Some(config),
            Some(BuildingVariant::Script(config)) => wire.script_building_config = Some(config),
            Some(BuildingVariant::Resource(config)) => wire.resource_building_config = Some(config),
            Some(BuildingVariant::MageEye(config)) => wire.mage_eye_config = Some(config),
            Some(BuildingVariant::RunicChest(config)) => wire.runic_chest_config = Some(config),
            Some(BuildingVariant::Default(config)) => wire.default_building_config = Some(config),
            Some(BuildingVariant::CreatureBank(config)) => wire.creature_bank_config = Some(config),
            None => {}
        }
        wire
    }

    fn clear_variants(self) -> Self {
        Self {
            creature_building_config: None,
            xdb_building_config: None,
            pandora_box_config: None,
            script_building_config: None,
            resource_building_config: None,
            mage_eye_config: None,
            runic_chest_config: None,
            default_building_config: None,
            creature_bank_config: None,
            ..self
        }
    }

    fn active_count(&self) -> usize {
        [
            self.creature_building_config.is_some(),
            self.xdb_building_config.is_some(),
            self.pandora_box_config.is_some(),
            self.script_building_config.is_some(),
            self.resource_building_config.is_some(),
            self.mage_eye_config.is_some(),
            self.runic_chest_config.is_some(),
            self.default_building_config.is_some(),
            self.creature_bank_config.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

impl From<CustomBuildingWire> for CustomBuildingConfig {
    fn from(wire: CustomBuildingWire) -> Self {
        let active = wire.active_count();
        if active > 1 {
            tracing::warn!(id = wire.id, active, "custom building has several variants set, keeping the first");
        }
        let variant = wire.active_variant();
        Self {
            id: wire.id,
            value: wire.value,
            guard_strength: wire.guard_strength,
            building_texture: wire.building_texture,
            road_type: wire.road_type,
            variant,
        }
    }
}

impl From<CustomBuildingConfig> for CustomBuildingWire {
    fn from(config: CustomBuildingConfig) -> Self {
        Self {
            id: config.id,
            value: config.value,
            guard_strength: config.guard_strength,
            building_texture: config.building_texture,
            road_type: config.road_type,
            ..Self::default()
        }
        .set_variant(config.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildingKind, DwellingKind, IntValueConfig};
    use serde_json::json;

    /// Every building variant field set at once.
    fn ambiguous_building() -> CustomBuildingWire {
        CustomBuildingWire {
            id: 5,
            value: 100,
            creature_building_config: Some(CreatureBuildingConfig::default()),
            xdb_building_config: Some(XdbBuildingConfig { xdb: "/Objects/Windmill.xdb".to_string() }),
            pandora_box_config: Some(PandoraBoxConfig::default()),
            script_building_config: Some(ScriptBuildingConfig::default()),
            resource_building_config: Some(ResourceBuildingConfig::default()),
            mage_eye_config: Some(MageEyeConfig::default()),
            runic_chest_config: Some(RunicChestConfig::default()),
            default_building_config: Some(DefaultBuildingConfig::default()),
            creature_bank_config: Some(CreatureBankConfig::default()),
            ..CustomBuildingWire::default()
        }
    }

    fn ambiguous_dwelling() -> DwellingGenerationWire {
        DwellingGenerationWire {
            random_dwelling_config: Some(RandomDwellingConfig::default()),
            static_dwelling_configs: Some(Vec::new()),
            dwelling_by_points_config: Some(DwellingByPointsConfig::default()),
            dependant_dwelling_config: Some(DependantDwellingConfig::new(1)),
            ..DwellingGenerationWire::default()
        }
    }

    #[test]
    fn test_set_variant_leaves_exactly_one_building_field() {
        let priors = [CustomBuildingWire::default(), ambiguous_building()];
        for prior in priors {
            for kind in BuildingKind::ALL {
                let variant = kind.default_payload();
                let wire = prior.clone().set_variant(Some(variant.clone()));
                assert_eq!(wire.active_count(), 1, "{kind:?}");
                assert_eq!(wire.active_variant(), Some(variant));
                assert_eq!(wire.id, prior.id);
                assert_eq!(wire.value, prior.value);
            }
        }
    }

    #[test]
    fn test_set_variant_leaves_exactly_one_dwelling_field() {
        let priors = [DwellingGenerationWire::default(), ambiguous_dwelling()];
        for prior in priors {
            for kind in DwellingKind::ALL {
                let generation = kind.default_payload(3);
                let wire = prior.clone().set_variant(Some(generation.clone()));
                assert_eq!(wire.active_count(), 1, "{kind:?}");
                assert_eq!(wire.active_variant(), Some(generation));
            }
        }
    }

    #[test]
    fn test_set_none_and_clear_remove_every_variant() {
        assert_eq!(ambiguous_building().set_variant(None).active_count(), 0);
        assert_eq!(ambiguous_building().clear_variants().active_variant(), None);
        assert_eq!(ambiguous_dwelling().clear_variants().active_count(), 0);
    }

    #[test]
    fn test_first_variant_in_priority_order_wins() {
        let wire = ambiguous_building();
        assert_eq!(wire.active_count(), 9);
        assert_eq!(wire.active_variant().map(|v| v.kind()), Some(BuildingKind::Creature));

        let wire = CustomBuildingWire { creature_building_config: None, ..wire };
        assert_eq!(wire.active_variant().map(|v| v.kind()), Some(BuildingKind::Xdb));

        let wire = DwellingGenerationWire { random_dwelling_config: None, ..ambiguous_dwelling() };
        assert_eq!(wire.active_variant().map(|g| g.kind()), Some(DwellingKind::Static));
    }

    #[test]
    fn test_ambiguous_document_decodes_with_first_variant() {
        let building: CustomBuildingConfig = serde_json::from_value(json!({
            "Id": 4,
            "MageEyeConfig": {"Radius": 8},
            "PandoraBoxConfig": {"Gold": 5000}
        }))
        .unwrap();

        assert_eq!(
            building.active_variant(),
            Some(&BuildingVariant::PandoraBox(PandoraBoxConfig {
                gold: Some(5000),
                ..PandoraBoxConfig::default()
            }))
        );

        let encoded = serde_json::to_value(&building).unwrap();
        assert!(encoded.get("MageEyeConfig").is_none());
        assert!(encoded.get("PandoraBoxConfig").is_some());
    }

    #[test]
    fn test_null_variant_fields_are_inactive() {
        let building: CustomBuildingConfig = serde_json::from_value(json!({
            "Id": 4,
            "CreatureBuildingConfig": null,
            "RunicChestConfig": {"RuneLevel": {"Min": 1, "Max": 2}}
        }))
        .unwrap();

        assert_eq!(
            building.active_variant(),
            Some(&BuildingVariant::RunicChest(RunicChestConfig {
                rune_level: Some(IntValueConfig::range(1, 2)),
                experience_value: None,
            }))
        );
    }

    #[test]
    fn test_wrong_shape_variant_is_ignored() {
        let building: CustomBuildingConfig = serde_json::from_value(json!({
            "Id": 4,
            "CreatureBuildingConfig": "yes",
            "DefaultBuildingConfig": {"BuildingId": 12}
        }))
        .unwrap();

        assert_eq!(building.active_variant().map(BuildingVariant::kind), Some(BuildingKind::Default));
    }

    #[test]
    fn test_defaulted_numbers_are_coerced_and_omitted() {
        let building: CustomBuildingConfig =
            serde_json::from_value(json!({"Id": 8, "Value": "lots", "GuardStrength": 300})).unwrap();
        assert_eq!(building.value, 0);
        assert_eq!(building.guard_strength, 300);

        assert_eq!(serde_json::to_value(&building).unwrap(), json!({"Id": 8, "GuardStrength": 300}));
    }

    #[test]
    fn test_missing_id_is_an_error() {
        assert!(serde_json::from_value::<CustomBuildingConfig>(json!({"Value": 3})).is_err());
    }
}
