use serde::{Deserialize, Serialize};

use super::RoadType;
use crate::codec::lenient;

/// A passage between two zones.
///
/// Both ends hold `ZoneId` values. Nothing here checks that the zones exist;
/// a connection may keep pointing at a deleted zone.
///
/// Example:
/// ```json
/// { "SourceZoneIndex": 1, "DestZoneIndex": 2, "IsMain": true, "GuardStrength": 9000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionModel {
    pub source_zone_index: i32,

    pub dest_zone_index: i32,

    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "std::ops::Not::not")]
    pub is_main: bool,

    /// Drops a connection the generator would otherwise create
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub remove_connection: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub guard_strength: Option<i64>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub guard_multiplier: Option<f64>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub guard_escape: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub wide: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub border_guard: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub static_position: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub static_position_x: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub static_position_y: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub min_radius_to_source: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub min_radius_to_dest: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub has_road: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub road_type: Option<RoadType>,
}

impl ConnectionModel {
    pub fn new(source_zone_index: i32, dest_zone_index: i32) -> Self {
        Self {
            source_zone_index,
            dest_zone_index,
            is_main: false,
            remove_connection: None,
            guard_strength: None,
            guard_multiplier: None,
            guard_escape: None,
            wide: None,
            border_guard: None,
            static_position: None,
            static_position_x: None,
            static_position_y: None,
            min_radius_to_source: None,
            min_radius_to_dest: None,
            has_road: None,
            road_type: None,
        }
    }

    pub fn with_main(self, is_main: bool) -> Self {
        Self { is_main, ..self }
    }

    pub fn with_guard_strength(self, guard_strength: Option<i64>) -> Self {
        Self { guard_strength, ..self }
    }

    pub fn with_ends(self, source_zone_index: i32, dest_zone_index: i32) -> Self {
        Self {
            source_zone_index,
            dest_zone_index,
            ..self
        }
    }

    /// Whether either end is `zone_id`.
    pub fn connects(&self, zone_id: i32) -> bool {
        self.source_zone_index == zone_id || self.dest_zone_index == zone_id
    }

    /// Same connection with its ends swapped, radii following their zones.
    pub fn reversed(self) -> Self {
        Self {
            source_zone_index: self.dest_zone_index,
            dest_zone_index: self.source_zone_index,
            min_radius_to_source: self.min_radius_to_dest,
            min_radius_to_dest: self.min_radius_to_source,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_connection_encoding() {
        let connection = ConnectionModel::new(1, 2);
        assert_eq!(
            serde_json::to_value(&connection).unwrap(),
            json!({"SourceZoneIndex": 1, "DestZoneIndex": 2})
        );

        let main = connection.with_main(true);
        assert_eq!(
            serde_json::to_value(&main).unwrap(),
            json!({"SourceZoneIndex": 1, "DestZoneIndex": 2, "IsMain": true})
        );
    }

    #[test]
    fn test_decode_tolerates_bad_optional_values() {
        let connection: ConnectionModel = serde_json::from_value(json!({
            "SourceZoneIndex": 1,
            "DestZoneIndex": 3,
            "IsMain": "true",
            "GuardStrength": 12000,
            "RoadType": "gravel",
            "Wide": 1
        }))
        .unwrap();

        assert!(!connection.is_main);
        assert_eq!(connection.guard_strength, Some(12000));
        assert_eq!(connection.road_type, Some(RoadType::Gravel));
        assert_eq!(connection.wide, None);
    }

    #[test]
    fn test_zone_indices_are_required() {
        assert!(serde_json::from_value::<ConnectionModel>(json!({"SourceZoneIndex": 1})).is_err());
    }

    #[test]
    fn test_connects_and_reversed() {
        let connection = ConnectionModel {
            min_radius_to_source: Some(4),
            ..ConnectionModel::new(2, 5)
        };
        assert!(connection.connects(2));
        assert!(connection.connects(5));
        assert!(!connection.connects(3));

        let reversed = connection.clone().reversed();
        assert_eq!((reversed.source_zone_index, reversed.dest_zone_index), (5, 2));
        assert_eq!(reversed.min_radius_to_dest, Some(4));
        assert_eq!(reversed.min_radius_to_source, None);
        assert_eq!(reversed.reversed(), connection);
    }
}
