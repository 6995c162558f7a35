/// Template validation
///
/// Checks that run on a decoded template and report problems without
/// rejecting anything. Decoding stays lenient; callers decide whether a
/// warning matters.

pub mod diagnostics;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use validator::Validate;

use crate::config::{
    DwellingGeneration, IntValueConfig, ResourceType, TemplateGenerationConfig, ZoneGenerationConfig,
    ZoneRandomizationConfig,
};

/// Problems found in a decoded template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    EmptyTemplateName,

    /// Several zones share one id; lookups only see the first
    DuplicateZoneId { zone_id: i32 },

    /// A connection end names no zone
    DanglingConnection { index: usize, zone_id: i32 },

    DanglingMirrorZone { zone_id: i32, mirror_zone_id: i32 },

    DanglingDependantZone { zone_id: i32, dependant_zone_id: i32 },

    DanglingSwapZone { group: usize, zone_id: i32 },

    DanglingRandomizedZone { zone_id: i64 },

    ZoneInSeveralSwapGroups { zone_id: i32 },

    ZoneSwappedAndRandomized { zone_id: i32 },

    /// A swap group without at least one candidate besides its anchor
    UndersizedSwapGroup { group: usize, len: usize },

    DuplicateTerrainConfig { terrain_type: String },

    DuplicateCustomBuildingId { id: i32 },

    /// `Min` above `Max` at the given document path
    InvertedRange { path: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptyTemplateName => write!(f, "Template name is empty"),
            Warning::DuplicateZoneId { zone_id } => write!(f, "Zone id {} is used more than once", zone_id),
            Warning::DanglingConnection { index, zone_id } => {
                write!(f, "Connection {} points at missing zone {}", index, zone_id)
            }
            Warning::DanglingMirrorZone { zone_id, mirror_zone_id } => {
                write!(f, "Zone {} mirrors missing zone {}", zone_id, mirror_zone_id)
            }
            Warning::DanglingDependantZone {
                zone_id,
                dependant_zone_id,
            } => write!(
                f,
                "Zone {} copies dwellings from missing zone {}",
                zone_id, dependant_zone_id
            ),
            Warning::DanglingSwapZone { group, zone_id } => {
                write!(f, "Swap group {} names missing zone {}", group, zone_id)
            }
            Warning::DanglingRandomizedZone { zone_id } => {
                write!(f, "Randomized zone {} does not exist", zone_id)
            }
            Warning::ZoneInSeveralSwapGroups { zone_id } => {
                write!(f, "Zone {} appears in more than one swap group", zone_id)
            }
            Warning::ZoneSwappedAndRandomized { zone_id } => {
                write!(f, "Zone {} is both swapped and randomized", zone_id)
            }
            Warning::UndersizedSwapGroup { group, len } => {
                write!(f, "Swap group {} has {} zone(s), needs at least 2", group, len)
            }
            Warning::DuplicateTerrainConfig { terrain_type } => {
                write!(f, "Terrain {} is configured more than once", terrain_type)
            }
            Warning::DuplicateCustomBuildingId { id } => {
                write!(f, "Custom building id {} is used more than once", id)
            }
            Warning::InvertedRange { path } => write!(f, "{}: Min is greater than Max", path),
        }
    }
}

/// Collect every warning for `template`, in document order.
pub fn validate(template: &TemplateGenerationConfig) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if template.validate().is_err() {
        warnings.push(Warning::EmptyTemplateName);
    }

    let zone_ids: BTreeSet<i32> = template.zones.iter().map(|zone| zone.zone_id).collect();
    for zone_id in duplicates(template.zones.iter().map(|zone| zone.zone_id)) {
        warnings.push(Warning::DuplicateZoneId { zone_id });
    }

    for (index, zone) in template.zones.iter().enumerate() {
        check_zone_references(zone, &zone_ids, &mut warnings);
        check_zone_ranges(index, zone, &mut warnings);
    }

    for (index, connection) in template.connections.iter().enumerate() {
        let mut ends = vec![connection.source_zone_index];
        if connection.dest_zone_index != connection.source_zone_index {
            ends.push(connection.dest_zone_index);
        }
        for zone_id in ends {
            if !zone_ids.contains(&zone_id) {
                warnings.push(Warning::DanglingConnection { index, zone_id });
            }
        }
    }

    if let Some(randomization) = &template.zone_randomization_config {
        check_randomization(randomization, &zone_ids, &mut warnings);
    }

    for terrain_type in duplicates(template.terrain_configs.iter().map(|config| config.terrain_type)) {
        warnings.push(Warning::DuplicateTerrainConfig {
            terrain_type: terrain_type.to_string(),
        });
    }

    for id in duplicates(template.custom_building_configs.iter().map(|building| building.id)) {
        warnings.push(Warning::DuplicateCustomBuildingId { id });
    }

    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), template = %template.template_name, "template has warnings");
    }
    warnings
}

fn check_zone_references(zone: &ZoneGenerationConfig, zone_ids: &BTreeSet<i32>, warnings: &mut Vec<Warning>) {
    if let Some(mirror_zone_id) = zone.mirror_zone_id {
        if !zone_ids.contains(&mirror_zone_id) {
            warnings.push(Warning::DanglingMirrorZone {
                zone_id: zone.zone_id,
                mirror_zone_id,
            });
        }
    }

    let dependant = zone
        .dwelling_generation_config
        .as_ref()
        .and_then(|dwellings| dwellings.active_generation());
    if let Some(DwellingGeneration::Dependant(config)) = dependant {
        if !zone_ids.contains(&config.zone_id) {
            warnings.push(Warning::DanglingDependantZone {
                zone_id: zone.zone_id,
                dependant_zone_id: config.zone_id,
            });
        }
    }
}

fn check_zone_ranges(index: usize, zone: &ZoneGenerationConfig, warnings: &mut Vec<Warning>) {
    let prefix = format!("Zones[{}]", index);

    for (name, range) in zone.feature_ranges() {
        check_range(range, || format!("{}.{}", prefix, name), warnings);
    }

    if let Some(mines) = &zone.mine_generation_config {
        for resource in ResourceType::ALL {
            check_range(
                mines.get(*resource),
                || format!("{}.MineGenerationConfig.{}", prefix, resource),
                warnings,
            );
        }
    }

    let Some(dwellings) = &zone.dwelling_generation_config else {
        return;
    };
    let Some(generation) = dwellings.active_generation() else {
        return;
    };
    let section = format!("{}.DwellingGenerationConfig.{}", prefix, generation.kind().wire_name());
    match generation {
        DwellingGeneration::Random(config) => {
            check_range(
                config.dwellings_count.as_ref(),
                || format!("{}.DwellingsCount", section),
                warnings,
            );
        }
        DwellingGeneration::Static(configs) => {
            for (position, config) in configs.iter().enumerate() {
                check_range(
                    config.count.as_ref(),
                    || format!("{}[{}].Count", section, position),
                    warnings,
                );
            }
        }
        DwellingGeneration::ByPoints(_) | DwellingGeneration::Dependant(_) => {}
    }
}

fn check_range(range: Option<&IntValueConfig>, path: impl FnOnce() -> String, warnings: &mut Vec<Warning>) {
    if range.is_some_and(|range| range.validate().is_err()) {
        warnings.push(Warning::InvertedRange { path: path() });
    }
}

fn check_randomization(
    randomization: &ZoneRandomizationConfig,
    zone_ids: &BTreeSet<i32>,
    warnings: &mut Vec<Warning>,
) {
    let mut groups_per_zone: BTreeMap<i32, usize> = BTreeMap::new();

    for (group, zones) in randomization.zones_to_swap.iter().enumerate() {
        if zones.len() < 2 {
            warnings.push(Warning::UndersizedSwapGroup { group, len: zones.len() });
        }
        let unique: BTreeSet<i32> = zones.iter().copied().collect();
        for zone_id in &unique {
            if !zone_ids.contains(zone_id) {
                warnings.push(Warning::DanglingSwapZone {
                    group,
                    zone_id: *zone_id,
                });
            }
            *groups_per_zone.entry(*zone_id).or_default() += 1;
        }
    }

    for (zone_id, groups) in &groups_per_zone {
        if *groups > 1 {
            warnings.push(Warning::ZoneInSeveralSwapGroups { zone_id: *zone_id });
        }
    }

    let randomized: BTreeSet<i64> = randomization.zones_to_randomize.iter().copied().collect();
    for zone_id in &randomized {
        let exists = i32::try_from(*zone_id).is_ok_and(|id| zone_ids.contains(&id));
        if !exists {
            warnings.push(Warning::DanglingRandomizedZone { zone_id: *zone_id });
        }
    }

    for zone_id in groups_per_zone.keys() {
        if randomized.contains(&i64::from(*zone_id)) {
            warnings.push(Warning::ZoneSwappedAndRandomized { zone_id: *zone_id });
        }
    }
}

/// Values seen more than once, each reported once, in first-seen order.
fn duplicates<T: Ord + Copy>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut result = Vec::new();
    for value in values {
        if !seen.insert(value) && reported.insert(value) {
            result.push(value);
        }
    }
    result
}
