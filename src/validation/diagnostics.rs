//! Checks on the raw JSON document, before or instead of decoding.
//!
//! Decoding stops at the first missing required field and silently resolves
//! ambiguous variants. These checks report all of it at once so a template
//! author can fix a file in one pass.

use jsonpath_rust::JsonPath;
use serde_json::{Value, json};

use crate::config::{BuildingKind, DwellingKind};

/// An owner record with more than one variant field set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousVariant {
    /// Location of the owner, e.g. `Zones[2].DwellingGenerationConfig`
    pub path: String,
    /// Variant fields set with a decodable shape, in priority order; the first one wins on decode
    pub fields: Vec<&'static str>,
}

/// Schema of the fields decoding cannot do without.
fn required_fields_schema() -> Value {
    json!({
        "type": "object",
        "required": ["TemplateName"],
        "properties": {
            "TemplateName": { "type": "string" },
            "Zones": {
                "items": {
                    "type": "object",
                    "required": ["ZoneId", "TerrainType"],
                    "properties": {
                        "ZoneId": { "type": "integer" },
                        "TerrainType": { "type": "string" },
                        "DwellingGenerationConfig": {
                            "required": ["BuildingTexture"],
                            "properties": {
                                "BuildingTexture": { "type": "string" },
                                "StaticDwellingConfigs": {
                                    "items": { "required": ["Tier"] }
                                },
                                "DependantDwellingConfig": { "required": ["ZoneId"] }
                            }
                        }
                    }
                }
            },
            "Connections": {
                "items": {
                    "type": "object",
                    "required": ["SourceZoneIndex", "DestZoneIndex"],
                    "properties": {
                        "SourceZoneIndex": { "type": "integer" },
                        "DestZoneIndex": { "type": "integer" }
                    }
                }
            },
            "TerrainConfigs": {
                "items": {
                    "type": "object",
                    "required": ["TerrainType"]
                }
            },
            "CustomBuildingConfigs": {
                "items": {
                    "type": "object",
                    "required": ["Id"],
                    "properties": {
                        "Id": { "type": "integer" },
                        "XdbBuildingConfig": { "required": ["Xdb"] },
                        "ScriptBuildingConfig": { "required": ["ScriptName"] }
                    }
                }
            }
        }
    })
}

/// Every required-field violation in `document`.
///
/// Wrong-shaped optional sections are not reported; decoding coerces those.
pub fn structural_errors(document: &Value) -> Result<Vec<String>, String> {
    let validator = jsonschema::validator_for(&required_fields_schema())
        .map_err(|e| format!("Failed to compile schema: {}", e))?;

    if validator.is_valid(document) {
        return Ok(Vec::new());
    }
    Ok(validator.iter_errors(document).map(|e| e.to_string()).collect())
}

/// Owners whose raw record sets several variant fields at once.
pub fn ambiguous_variants(document: &Value) -> Result<Vec<AmbiguousVariant>, String> {
    let mut found = Vec::new();

    let dwelling_fields: Vec<VariantField> = DwellingKind::ALL
        .iter()
        .map(|kind| match kind {
            DwellingKind::Static => (kind.wire_name(), Value::is_array as fn(&Value) -> bool),
            _ => (kind.wire_name(), Value::is_object as fn(&Value) -> bool),
        })
        .collect();
    for (index, zone) in query(document, "$.Zones[*]")?.into_iter().enumerate() {
        if let Some(owner) = zone.get("DwellingGenerationConfig") {
            push_if_ambiguous(
                &mut found,
                format!("Zones[{}].DwellingGenerationConfig", index),
                owner,
                &dwelling_fields,
            );
        }
    }

    let building_fields: Vec<VariantField> = BuildingKind::ALL
        .iter()
        .map(|kind| (kind.wire_name(), Value::is_object as fn(&Value) -> bool))
        .collect();
    for (index, owner) in query(document, "$.CustomBuildingConfigs[*]")?.into_iter().enumerate() {
        push_if_ambiguous(
            &mut found,
            format!("CustomBuildingConfigs[{}]", index),
            owner,
            &building_fields,
        );
    }

    Ok(found)
}

fn query<'a>(document: &'a Value, path: &str) -> Result<Vec<&'a Value>, String> {
    document
        .query(path)
        .map_err(|e| format!("JSONPath query failed for '{}': {}", path, e))
}

/// Wire name of a variant field and the JSON shape decoding accepts for it.
type VariantField = (&'static str, fn(&Value) -> bool);

/// Only fields of the accepted shape count; decoding ignores the rest.
fn push_if_ambiguous(found: &mut Vec<AmbiguousVariant>, path: String, owner: &Value, fields: &[VariantField]) {
    let set: Vec<&'static str> = fields
        .iter()
        .filter(|(field, has_shape)| owner.get(*field).is_some_and(|value| has_shape(value)))
        .map(|(field, _)| *field)
        .collect();
    if set.len() > 1 {
        tracing::debug!(path = %path, fields = ?set, "ambiguous variant");
        found.push(AmbiguousVariant { path, fields: set });
    }
}
