use serde::{Deserialize, Serialize};

use super::{BuildingTexture, CreaturesConfiguration, Faction, IntValueConfig};
use crate::codec::lenient;
use crate::codec::variant::DwellingGenerationWire;

/// Dwelling generation rules of a zone.
///
/// At most one generation strategy is active at a time. On the wire each
/// strategy has its own nullable field; see [`DwellingGenerationWire`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DwellingGenerationWire", into = "DwellingGenerationWire")]
pub struct DwellingGenerationConfig {
    pub building_texture: BuildingTexture,
    pub creatures_configuration: CreaturesConfiguration,
    pub generation: Option<DwellingGeneration>,
}

impl DwellingGenerationConfig {
    pub fn new(building_texture: BuildingTexture) -> Self {
        Self {
            building_texture,
            creatures_configuration: CreaturesConfiguration::default(),
            generation: None,
        }
    }

    pub fn active_generation(&self) -> Option<&DwellingGeneration> {
        self.generation.as_ref()
    }

    /// Replace the active strategy; `None` clears it.
    pub fn with_generation(self, generation: Option<DwellingGeneration>) -> Self {
        Self { generation, ..self }
    }

    pub fn without_generation(self) -> Self {
        self.with_generation(None)
    }

    pub fn with_building_texture(self, building_texture: BuildingTexture) -> Self {
        Self { building_texture, ..self }
    }

    pub fn with_creatures_configuration(self, creatures_configuration: CreaturesConfiguration) -> Self {
        Self { creatures_configuration, ..self }
    }
}

/// The mutually exclusive dwelling generation strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum DwellingGeneration {
    Random(RandomDwellingConfig),
    Static(Vec<StaticDwellingConfig>),
    ByPoints(DwellingByPointsConfig),
    Dependant(DependantDwellingConfig),
}

impl DwellingGeneration {
    pub fn kind(&self) -> DwellingKind {
        match self {
            DwellingGeneration::Random(_) => DwellingKind::Random,
            DwellingGeneration::Static(_) => DwellingKind::Static,
            DwellingGeneration::ByPoints(_) => DwellingKind::ByPoints,
            DwellingGeneration::Dependant(_) => DwellingKind::Dependant,
        }
    }
}

/// Payload-free discriminant of [`DwellingGeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DwellingKind {
    Random,
    Static,
    ByPoints,
    Dependant,
}

impl DwellingKind {
    /// Priority order used when a document has several strategies set.
    pub const ALL: [DwellingKind; 4] = [
        DwellingKind::Random,
        DwellingKind::Static,
        DwellingKind::ByPoints,
        DwellingKind::Dependant,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            DwellingKind::Random => "RandomDwellingConfig",
            DwellingKind::Static => "StaticDwellingConfigs",
            DwellingKind::ByPoints => "DwellingByPointsConfig",
            DwellingKind::Dependant => "DependantDwellingConfig",
        }
    }

    /// Fresh payload for a selector switching to this strategy.
    ///
    /// `zone_id` seeds the dependant strategy, which must point at a zone.
    pub fn default_payload(self, zone_id: i32) -> DwellingGeneration {
        match self {
            DwellingKind::Random => DwellingGeneration::Random(RandomDwellingConfig::default()),
            DwellingKind::Static => DwellingGeneration::Static(Vec::new()),
            DwellingKind::ByPoints => DwellingGeneration::ByPoints(DwellingByPointsConfig::default()),
            DwellingKind::Dependant => DwellingGeneration::Dependant(DependantDwellingConfig::new(zone_id)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RandomDwellingConfig {
    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub dwellings_count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub min_tier: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub max_tier: Option<i32>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub allowed_factions: Vec<Faction>,
}

/// One fixed dwelling placement rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaticDwellingConfig {
    pub tier: i32,

    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub count: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub faction: Option<Faction>,
}

/// Dwellings bought from a point budget, each tier having a price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DwellingByPointsConfig {
    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub points: Option<IntValueConfig>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub tier_points: Vec<TierPoints>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TierPoints {
    pub tier: i32,
    pub points: i32,
}

/// Copies the dwellings generated for another zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DependantDwellingConfig {
    /// `ZoneId` of the zone to copy from
    pub zone_id: i32,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub copy_creatures: Option<bool>,
}

impl DependantDwellingConfig {
    pub fn new(zone_id: i32) -> Self {
        Self { zone_id, copy_creatures: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn every_generation() -> Vec<DwellingGeneration> {
        DwellingKind::ALL.iter().map(|kind| kind.default_payload(4)).collect()
    }

    #[test]
    fn test_default_payload_matches_kind() {
        for kind in DwellingKind::ALL {
            assert_eq!(kind.default_payload(1).kind(), kind);
        }
    }

    #[test]
    fn test_with_generation_replaces_previous() {
        let config = DwellingGenerationConfig::new(BuildingTexture::Haven);
        for generation in every_generation() {
            let switched = config
                .clone()
                .with_generation(Some(DwellingGeneration::Random(RandomDwellingConfig::default())))
                .with_generation(Some(generation.clone()));
            assert_eq!(switched.active_generation(), Some(&generation));
        }
    }

    #[test]
    fn test_without_generation_clears() {
        let config = DwellingGenerationConfig::new(BuildingTexture::Haven)
            .with_generation(Some(DwellingGeneration::Dependant(DependantDwellingConfig::new(2))))
            .without_generation();
        assert!(config.active_generation().is_none());
    }

    #[test]
    fn test_encode_uses_wire_field_per_strategy() {
        let config = DwellingGenerationConfig::new(BuildingTexture::Academy).with_generation(Some(
            DwellingGeneration::ByPoints(DwellingByPointsConfig {
                points: Some(IntValueConfig::fixed(30)),
                tier_points: vec![TierPoints { tier: 1, points: 2 }],
            }),
        ));

        let encoded = serde_json::to_value(&config).unwrap();
        assert_eq!(
            encoded,
            json!({
                "BuildingTexture": "Academy",
                "CreaturesConfiguration": {},
                "DwellingByPointsConfig": {
                    "Points": {"Min": 30, "Max": 30},
                    "TierPoints": [{"Tier": 1, "Points": 2}]
                }
            })
        );
    }

    #[test]
    fn test_empty_static_list_stays_active() {
        let config = DwellingGenerationConfig::new(BuildingTexture::Neutral)
            .with_generation(Some(DwellingGeneration::Static(Vec::new())));

        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"StaticDwellingConfigs\":[]"));

        let decoded: DwellingGenerationConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_decode_requires_texture() {
        assert!(serde_json::from_value::<DwellingGenerationConfig>(json!({})).is_err());
        assert!(
            serde_json::from_value::<DwellingGenerationConfig>(json!({"BuildingTexture": "Marble"})).is_err()
        );
    }

    #[test]
    fn test_decode_defaults_creatures_configuration() {
        let decoded: DwellingGenerationConfig =
            serde_json::from_value(json!({"BuildingTexture": "fortress", "CreaturesConfiguration": null})).unwrap();
        assert_eq!(decoded.building_texture, BuildingTexture::Fortress);
        assert_eq!(decoded.creatures_configuration, CreaturesConfiguration::default());
        assert!(decoded.generation.is_none());
    }
}
