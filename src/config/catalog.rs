use thiserror::Error;

/// Error returned when a name matches no member of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {catalog} '{value}'")]
pub struct UnknownCatalogValue {
    pub catalog: &'static str,
    pub value: String,
}

/// Declares a closed catalog enum.
///
/// Every member carries a numeric id and a description. Names decode ignoring
/// ASCII case and always encode in their declared case, so catalogs can be
/// used both as field values and as JSON object keys.
macro_rules! catalog {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $id:literal => $desc:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every member in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Canonical names in declaration order.
            pub const NAMES: &'static [&'static str] = &[ $( stringify!($variant), )+ ];

            pub fn id(self) -> u32 {
                match self {
                    $( $name::$variant => $id, )+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant), )+
                }
            }

            pub fn description(self) -> &'static str {
                match self {
                    $( $name::$variant => $desc, )+
                }
            }

            pub fn from_id(id: u32) -> Option<Self> {
                Self::ALL.iter().copied().find(|member| member.id() == id)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::config::UnknownCatalogValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| $crate::config::UnknownCatalogValue {
                        catalog: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct NameVisitor;

                impl<'de> ::serde::de::Visitor<'de> for NameVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                        write!(f, "a {} name", stringify!($name))
                    }

                    fn visit_str<E: ::serde::de::Error>(self, v: &str) -> Result<$name, E> {
                        v.parse::<$name>()
                            .map_err(|_| E::unknown_variant(v, $name::NAMES))
                    }
                }

                deserializer.deserialize_str(NameVisitor)
            }
        }
    };
}

catalog! {
    /// Terrain of a zone. The player entries resolve to the native terrain of
    /// whichever faction that player picks.
    #[derive(Default)]
    pub enum TerrainType {
        #[default]
        FirstPlayer = 0 => "Native terrain of the first player",
        SecondPlayer = 1 => "Native terrain of the second player",
        ThirdPlayer = 2 => "Native terrain of the third player",
        FourthPlayer = 3 => "Native terrain of the fourth player",
        FifthPlayer = 4 => "Native terrain of the fifth player",
        SixthPlayer = 5 => "Native terrain of the sixth player",
        SeventhPlayer = 6 => "Native terrain of the seventh player",
        EighthPlayer = 7 => "Native terrain of the eighth player",
        Grass = 8 => "Grass",
        Dirt = 9 => "Dirt",
        Lava = 10 => "Lava",
        Snow = 11 => "Snow",
        Sand = 12 => "Sand",
        Subterranean = 13 => "Subterranean",
        Taiga = 14 => "Taiga",
        Wasteland = 15 => "Wasteland",
    }
}

catalog! {
    /// Playable faction.
    pub enum Faction {
        Haven = 1 => "Haven",
        Inferno = 2 => "Inferno",
        Necropolis = 3 => "Necropolis",
        Preserve = 4 => "Sylvan preserve",
        Dungeon = 5 => "Dungeon",
        Academy = 6 => "Academy",
        Fortress = 7 => "Fortress",
        Stronghold = 8 => "Stronghold",
    }
}

catalog! {
    /// Visual style applied to generated buildings.
    #[derive(Default)]
    pub enum BuildingTexture {
        #[default]
        Neutral = 0 => "Neutral look",
        Haven = 1 => "Haven look",
        Inferno = 2 => "Inferno look",
        Necropolis = 3 => "Necropolis look",
        Preserve = 4 => "Sylvan preserve look",
        Dungeon = 5 => "Dungeon look",
        Academy = 6 => "Academy look",
        Fortress = 7 => "Fortress look",
        Stronghold = 8 => "Stronghold look",
    }
}

catalog! {
    pub enum RoadType {
        Dirt = 0 => "Dirt road",
        Gravel = 1 => "Gravel road",
        Cobblestone = 2 => "Cobblestone road",
    }
}

catalog! {
    pub enum ResourceType {
        Wood = 0 => "Wood",
        Ore = 1 => "Ore",
        Mercury = 2 => "Mercury",
        Crystal = 3 => "Crystal",
        Sulfur = 4 => "Sulfur",
        Gem = 5 => "Gem",
        Gold = 6 => "Gold",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_decode_ignores_case() {
        let lower: TerrainType = serde_json::from_value(json!("firstplayer")).unwrap();
        let canonical: TerrainType = serde_json::from_value(json!("FirstPlayer")).unwrap();
        let shouting: TerrainType = serde_json::from_value(json!("FIRSTPLAYER")).unwrap();

        assert_eq!(lower, TerrainType::FirstPlayer);
        assert_eq!(lower, canonical);
        assert_eq!(lower, shouting);
    }

    #[test]
    fn test_encode_uses_canonical_case() {
        let parsed: RoadType = "COBBLESTONE".parse().unwrap();
        assert_eq!(serde_json::to_value(parsed).unwrap(), json!("Cobblestone"));
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = serde_json::from_value::<Faction>(json!("Pirates")).unwrap_err();
        assert!(err.to_string().contains("Pirates"));

        let err = "Pirates".parse::<Faction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown Faction 'Pirates'");
    }

    #[test]
    fn test_non_string_is_rejected() {
        assert!(serde_json::from_value::<ResourceType>(json!(3)).is_err());
    }

    #[test]
    fn test_ids_and_descriptions() {
        assert_eq!(TerrainType::Taiga.id(), 14);
        assert_eq!(TerrainType::from_id(14), Some(TerrainType::Taiga));
        assert_eq!(TerrainType::from_id(99), None);
        assert_eq!(Faction::Preserve.description(), "Sylvan preserve");
        assert_eq!(ResourceType::ALL.len(), ResourceType::NAMES.len());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TerrainType::default(), TerrainType::FirstPlayer);
        assert_eq!(BuildingTexture::default(), BuildingTexture::Neutral);
    }

    #[test]
    fn test_catalog_as_map_key() {
        let decoded: BTreeMap<Faction, f64> =
            serde_json::from_value(json!({"haven": 1.5, "Inferno": 0.5})).unwrap();
        assert_eq!(decoded.get(&Faction::Haven), Some(&1.5));

        let encoded = serde_json::to_value(&decoded).unwrap();
        assert_eq!(encoded, json!({"Haven": 1.5, "Inferno": 0.5}));
    }
}
