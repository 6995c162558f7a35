/// Map template data model
///
/// This module contains the immutable value records making up a
/// `TemplateGenerationConfig` document, from catalog enums up to the root.

mod catalog;
mod building;
mod connection;
mod creatures;
mod dwelling;
mod features;
mod randomization;
mod root;
mod terrain;
mod values;
mod zone;

pub use building::{
    BuildingKind, BuildingVariant, CreatureBankConfig, CreatureBuildingConfig, CustomBuildingConfig,
    DefaultBuildingConfig, MageEyeConfig, PandoraBoxConfig, ResourceBuildingConfig, RunicChestConfig,
    ScriptBuildingConfig, XdbBuildingConfig,
};
pub use catalog::{BuildingTexture, Faction, ResourceType, RoadType, TerrainType, UnknownCatalogValue};
pub use connection::ConnectionModel;
pub use creatures::{CreatureModifier, CreatureTierReplacement, CreaturesConfiguration};
pub use dwelling::{
    DependantDwellingConfig, DwellingByPointsConfig, DwellingGeneration, DwellingGenerationConfig, DwellingKind,
    RandomDwellingConfig, StaticDwellingConfig, TierPoints,
};
pub use features::{
    CreatureBankPoolEntry, CreatureBanksPool, EntitiesBanModel, FactionStartSpells, GeneralData,
    ScriptFeaturesConfig, StartSpellsConfig,
};
pub use randomization::ZoneRandomizationConfig;
pub use root::TemplateGenerationConfig;
pub use terrain::{StartBuildingConfig, TerrainBuildingsConfig, TerrainConfig};
pub use values::IntValueConfig;
pub use zone::{ResourcesConfig, ZoneGenerationConfig};
