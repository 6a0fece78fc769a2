//! Object type lookup table.
//!
//! Each type has a canonical name, a short display name, a set of
//! lowercase synonyms accepted on input, and a flag telling whether objects
//! of that type sit at a fixed position on the sky.

use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use indexmap::IndexSet;

use crate::FieldError;

macro_rules! object_types {
    ($($variant:ident => ($canonical:literal, $short:literal, $fixed:literal, [$($synonym:literal),* $(,)?])),+ $(,)?) => {
        /// A kind of astronomical object.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ObjectType {
            $($variant),+
        }

        impl ObjectType {
            /// Every object type, in table order.
            pub const ALL: &'static [ObjectType] = &[$(ObjectType::$variant),+];

            pub fn canonical_name(self) -> &'static str {
                match self {
                    $(ObjectType::$variant => $canonical),+
                }
            }

            /// Name used when writing records and listings.
            pub fn short_name(self) -> &'static str {
                match self {
                    $(ObjectType::$variant => $short),+
                }
            }

            /// Whether objects of this type have a constellation, RA and Dec.
            pub fn is_fixed_location(self) -> bool {
                match self {
                    $(ObjectType::$variant => $fixed),+
                }
            }

            fn synonyms(self) -> &'static [&'static str] {
                match self {
                    $(ObjectType::$variant => &[$($synonym),*]),+
                }
            }
        }
    };
}

object_types! {
    Asterism => ("Asterism", "Ast", true, ["asterism"]),
    CarbonStar => ("Carbon Star", "Carbon", true, ["carbon star"]),
    Constellation => ("Constellation", "Con", true, ["constellation"]),
    DarkNebula => ("Dark Nebula", "DN", true, ["dark nebula"]),
    DoubleStar => ("Double Star", "Double", true, ["double star", "ds", "dbl", "multiple star"]),
    EmissionNebula => ("Emission Nebula", "EN", true, ["emission nebula"]),
    Galaxy => ("Galaxy", "Gal", true, ["galaxy", "gx", "g"]),
    GlobularCluster => ("Globular Cluster", "GCl", true, ["globular cl.", "gc", "globular", "globular cluster"]),
    Nova => ("Nova", "Nova", true, []),
    OpenCluster => ("Open Cluster", "OCl", true, ["opcl", "open cl.", "oc", "open cluster"]),
    PlanetaryNebula => ("Planetary Nebula", "PN", true, ["planetary neb.", "planetary", "pln"]),
    Quasar => ("Quasar", "Q", true, ["quasar"]),
    ReflectionNebula => ("Reflection Nebula", "RN", true, ["reflection nebula"]),
    Star => ("Star", "Star", true, ["*"]),
    StarCloud => ("Star Cloud", "Star Cloud", true, ["*'s"]),
    Supernova => ("Supernova", "Supernova", true, ["sn"]),
    SupernovaRemnant => ("Supernova Remnant", "SNR", true, ["supernova remnant", "sr"]),
    VariableStar => ("Variable Star", "Variable", true, ["variable star", "var"]),
    Asteroid => ("Asteroid", "Asteroid", false, ["minor planet"]),
    Aurora => ("Aurora", "Aurora", false, []),
    Comet => ("Comet", "Comet", false, []),
    Moon => ("Moon", "Moon", false, ["lunar feature"]),
    Planet => ("Planet", "Planet", false, ["planetary feature"]),
    Sun => ("Sun", "Sun", false, ["solar feature"]),
}

static LOOKUP: LazyLock<HashMap<String, ObjectType>> = LazyLock::new(|| {
    let mut lookup = HashMap::new();
    for &object_type in ObjectType::ALL {
        let names = [object_type.short_name(), object_type.canonical_name()]
            .into_iter()
            .chain(object_type.synonyms().iter().copied());
        for name in names {
            lookup.insert(name.to_lowercase(), object_type);
        }
    }
    lookup
});

impl ObjectType {
    /// Looks up a single type name, case-insensitively.
    pub fn lookup(name: &str) -> Option<ObjectType> {
        LOOKUP.get(&name.trim().to_lowercase()).copied()
    }
}

impl FromStr for ObjectType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| FieldError::UnknownObjectType {
            field: s.to_string(),
        })
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Whether a set of types calls for a fixed sky position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Fixed,
    Unfixed,
    Mixed,
}

/// The ordered, duplicate-free set of types assigned to one object.
///
/// Parsed from a field whose entries are separated by `,` or `+`
/// (`Gal+Q`, `OCl, EN`) and displayed joined with `+`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectTypes(IndexSet<ObjectType>);

impl ObjectTypes {
    pub fn new(types: impl IntoIterator<Item = ObjectType>) -> Self {
        Self(types.into_iter().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectType> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, object_type: ObjectType) -> bool {
        self.0.contains(&object_type)
    }

    pub fn intersects(&self, other: &ObjectTypes) -> bool {
        self.iter().any(|object_type| other.contains(object_type))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn location_kind(&self) -> LocationKind {
        let fixed = self.iter().filter(|t| t.is_fixed_location()).count();
        if fixed == self.len() {
            LocationKind::Fixed
        } else if fixed == 0 {
            LocationKind::Unfixed
        } else {
            LocationKind::Mixed
        }
    }
}

impl FromStr for ObjectTypes {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || FieldError::UnknownObjectType {
            field: s.to_string(),
        };
        let types = s
            .split([',', '+'])
            .map(|name| ObjectType::lookup(name).ok_or_else(unknown))
            .collect::<Result<IndexSet<_>, _>>()?;
        Ok(Self(types))
    }
}

impl fmt::Display for ObjectTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(ObjectType::short_name).collect();
        f.write_str(&names.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_synonyms_case_insensitive() {
        assert_eq!(ObjectType::lookup("GX"), Some(ObjectType::Galaxy));
        assert_eq!(ObjectType::lookup("gal"), Some(ObjectType::Galaxy));
        assert_eq!(ObjectType::lookup("Open Cluster"), Some(ObjectType::OpenCluster));
        assert_eq!(ObjectType::lookup(" pn "), Some(ObjectType::PlanetaryNebula));
        assert_eq!(ObjectType::lookup("blob"), None);
    }

    #[test]
    fn test_every_short_name_resolves_to_itself() {
        for &object_type in ObjectType::ALL {
            assert_eq!(ObjectType::lookup(object_type.short_name()), Some(object_type));
        }
    }

    #[test]
    fn test_parse_set_with_both_separators() {
        let types: ObjectTypes = "OCl+EN, rn".parse().unwrap();
        assert_eq!(
            types.iter().collect::<Vec<_>>(),
            vec![
                ObjectType::OpenCluster,
                ObjectType::EmissionNebula,
                ObjectType::ReflectionNebula
            ]
        );
        assert_eq!(types.to_string(), "OCl+EN+RN");
    }

    #[test]
    fn test_parse_set_rejects_unknown_naming_whole_field() {
        assert_eq!(
            "Gal+Blob".parse::<ObjectTypes>(),
            Err(FieldError::UnknownObjectType {
                field: "Gal+Blob".to_string()
            })
        );
        assert!("".parse::<ObjectTypes>().is_err());
    }

    #[test]
    fn test_location_kind() {
        let fixed: ObjectTypes = "Gal+Q".parse().unwrap();
        assert_eq!(fixed.location_kind(), LocationKind::Fixed);

        let unfixed: ObjectTypes = "Planet".parse().unwrap();
        assert_eq!(unfixed.location_kind(), LocationKind::Unfixed);

        let mixed: ObjectTypes = "Planet+Star".parse().unwrap();
        assert_eq!(mixed.location_kind(), LocationKind::Mixed);
    }

    #[test]
    fn test_intersects() {
        let object: ObjectTypes = "Double+Variable".parse().unwrap();
        let wanted: ObjectTypes = "Variable, Carbon".parse().unwrap();
        let other: ObjectTypes = "Gal".parse().unwrap();
        assert!(object.intersects(&wanted));
        assert!(!object.intersects(&other));
    }
}
