//! Field type definitions
//!
//! Declared field types and the semantic families indexing and query code
//! reason about (string, integer, float, date, ...).

use once_cell::sync::Lazy;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Field data type
///
/// A closed set of the type names accepted in a mapping definition.
/// Names that are not recognized map to [`FieldType::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    // String family
    Keyword,
    Text,
    Wildcard,
    ConstantKeyword,
    MatchOnlyText,

    // Integer family
    Byte,
    Short,
    Integer,
    IntegerRange,
    Long,
    LongRange,
    UnsignedLong,

    // Float family
    HalfFloat,
    Float,
    FloatRange,
    Double,
    DoubleRange,
    ScaledFloat,

    // Date family
    Date,
    DateRange,
    DateNanos,

    Ip,
    IpRange,
    Version,
    Boolean,
    Binary,
    TokenCount,

    /// Container with its own properties
    Object,
    /// Container whose objects are indexed as separate hidden documents
    Nested,
    /// Redirects to another field through `path`
    Alias,
    /// Whole object indexed as keywords, sub-keys are not declared
    Flattened,

    Shape,
    GeoPoint,
    GeoShape,
    Point,
    DenseVector,
    Completion,
    SearchAsYouType,

    /// Unrecognized type name
    Unknown,
}

static STRING_TYPES: Lazy<HashSet<FieldType>> = Lazy::new(|| {
    HashSet::from([
        FieldType::Keyword,
        FieldType::Text,
        FieldType::Wildcard,
        FieldType::ConstantKeyword,
        FieldType::MatchOnlyText,
    ])
});

static INT_TYPES: Lazy<HashSet<FieldType>> = Lazy::new(|| {
    HashSet::from([
        FieldType::Byte,
        FieldType::Short,
        FieldType::Integer,
        FieldType::IntegerRange,
        FieldType::Long,
        FieldType::LongRange,
    ])
});

static UINT_TYPES: Lazy<HashSet<FieldType>> =
    Lazy::new(|| HashSet::from([FieldType::UnsignedLong]));

static FLOAT_TYPES: Lazy<HashSet<FieldType>> = Lazy::new(|| {
    HashSet::from([
        FieldType::HalfFloat,
        FieldType::Float,
        FieldType::FloatRange,
        FieldType::Double,
        FieldType::DoubleRange,
        FieldType::ScaledFloat,
    ])
});

static DATE_TYPES: Lazy<HashSet<FieldType>> = Lazy::new(|| {
    HashSet::from([FieldType::Date, FieldType::DateRange, FieldType::DateNanos])
});

static IP_TYPES: Lazy<HashSet<FieldType>> =
    Lazy::new(|| HashSet::from([FieldType::Ip, FieldType::IpRange]));

static VERSION_TYPES: Lazy<HashSet<FieldType>> =
    Lazy::new(|| HashSet::from([FieldType::Version]));

static NUMBER_TYPES: Lazy<HashSet<FieldType>> = Lazy::new(|| {
    INT_TYPES
        .iter()
        .chain(UINT_TYPES.iter())
        .chain(FLOAT_TYPES.iter())
        .copied()
        .collect()
});

/// Types backed directly by the inverted index and doc values.
static LUCENE_SUPPORTED_TYPES: Lazy<HashSet<FieldType>> = Lazy::new(|| {
    let mut types: HashSet<FieldType> = STRING_TYPES
        .iter()
        .chain(NUMBER_TYPES.iter())
        .chain(DATE_TYPES.iter())
        .chain(IP_TYPES.iter())
        .chain(VERSION_TYPES.iter())
        .copied()
        .collect();
    types.extend([FieldType::Boolean, FieldType::Binary, FieldType::TokenCount]);
    types
});

/// Check if the type belongs to the string family
pub fn check_string_type(t: FieldType) -> bool {
    STRING_TYPES.contains(&t)
}

/// Check if the type belongs to the signed integer family (ranges included)
pub fn check_int_type(t: FieldType) -> bool {
    INT_TYPES.contains(&t)
}

/// Check if the type is an unsigned integer
pub fn check_uint_type(t: FieldType) -> bool {
    UINT_TYPES.contains(&t)
}

/// Check if the type belongs to the floating point family (ranges included)
pub fn check_float_type(t: FieldType) -> bool {
    FLOAT_TYPES.contains(&t)
}

/// Check if the type belongs to the date family
pub fn check_date_type(t: FieldType) -> bool {
    DATE_TYPES.contains(&t)
}

pub fn check_ip_type(t: FieldType) -> bool {
    IP_TYPES.contains(&t)
}

pub fn check_version_type(t: FieldType) -> bool {
    VERSION_TYPES.contains(&t)
}

/// Union of the integer, unsigned integer and float families
pub fn check_number_type(t: FieldType) -> bool {
    NUMBER_TYPES.contains(&t)
}

/// Check if the type can be served by the generic index storage
///
/// Returns false for geometric and other specialized types, which cannot
/// take the generic sort and aggregation paths.
pub fn check_type_support_lucene(t: FieldType) -> bool {
    LUCENE_SUPPORTED_TYPES.contains(&t)
}

impl FieldType {
    /// Every declared type, `Unknown` last
    pub const ALL: [FieldType; 39] = [
        FieldType::Keyword,
        FieldType::Text,
        FieldType::Wildcard,
        FieldType::ConstantKeyword,
        FieldType::MatchOnlyText,
        FieldType::Byte,
        FieldType::Short,
        FieldType::Integer,
        FieldType::IntegerRange,
        FieldType::Long,
        FieldType::LongRange,
        FieldType::UnsignedLong,
        FieldType::HalfFloat,
        FieldType::Float,
        FieldType::FloatRange,
        FieldType::Double,
        FieldType::DoubleRange,
        FieldType::ScaledFloat,
        FieldType::Date,
        FieldType::DateRange,
        FieldType::DateNanos,
        FieldType::Ip,
        FieldType::IpRange,
        FieldType::Version,
        FieldType::Boolean,
        FieldType::Binary,
        FieldType::TokenCount,
        FieldType::Object,
        FieldType::Nested,
        FieldType::Alias,
        FieldType::Flattened,
        FieldType::Shape,
        FieldType::GeoPoint,
        FieldType::GeoShape,
        FieldType::Point,
        FieldType::DenseVector,
        FieldType::Completion,
        FieldType::SearchAsYouType,
        FieldType::Unknown,
    ];

    /// Name used in mapping definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Keyword => "keyword",
            FieldType::Text => "text",
            FieldType::Wildcard => "wildcard",
            FieldType::ConstantKeyword => "constant_keyword",
            FieldType::MatchOnlyText => "match_only_text",
            FieldType::Byte => "byte",
            FieldType::Short => "short",
            FieldType::Integer => "integer",
            FieldType::IntegerRange => "integer_range",
            FieldType::Long => "long",
            FieldType::LongRange => "long_range",
            FieldType::UnsignedLong => "unsigned_long",
            FieldType::HalfFloat => "half_float",
            FieldType::Float => "float",
            FieldType::FloatRange => "float_range",
            FieldType::Double => "double",
            FieldType::DoubleRange => "double_range",
            FieldType::ScaledFloat => "scaled_float",
            FieldType::Date => "date",
            FieldType::DateRange => "date_range",
            FieldType::DateNanos => "date_nanos",
            FieldType::Ip => "ip",
            FieldType::IpRange => "ip_range",
            FieldType::Version => "version",
            FieldType::Boolean => "boolean",
            FieldType::Binary => "binary",
            FieldType::TokenCount => "token_count",
            FieldType::Object => "object",
            FieldType::Nested => "nested",
            FieldType::Alias => "alias",
            FieldType::Flattened => "flattened",
            FieldType::Shape => "shape",
            FieldType::GeoPoint => "geo_point",
            FieldType::GeoShape => "geo_shape",
            FieldType::Point => "point",
            FieldType::DenseVector => "dense_vector",
            FieldType::Completion => "completion",
            FieldType::SearchAsYouType => "search_as_you_type",
            FieldType::Unknown => "unknown",
        }
    }

    /// Object and nested fields own a sub-mapping instead of a value
    pub fn is_container(&self) -> bool {
        matches!(self, FieldType::Object | FieldType::Nested)
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let field_type = FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .unwrap_or(FieldType::Unknown);
        Ok(field_type)
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name: String = Deserialize::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or(FieldType::Unknown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_type_support_lucene() {
        assert!(check_type_support_lucene(FieldType::Keyword));
        assert!(check_type_support_lucene(FieldType::ScaledFloat));
        assert!(!check_type_support_lucene(FieldType::Shape));
        assert!(!check_type_support_lucene(FieldType::GeoShape));
        assert!(!check_type_support_lucene(FieldType::Object));
        assert!(!check_type_support_lucene(FieldType::Unknown));
    }

    #[test]
    fn test_lucene_support_table() {
        let unsupported = [
            FieldType::Object,
            FieldType::Nested,
            FieldType::Alias,
            FieldType::Flattened,
            FieldType::Shape,
            FieldType::GeoPoint,
            FieldType::GeoShape,
            FieldType::Point,
            FieldType::DenseVector,
            FieldType::Completion,
            FieldType::SearchAsYouType,
            FieldType::Unknown,
        ];
        for t in FieldType::ALL {
            assert_eq!(
                check_type_support_lucene(t),
                !unsupported.contains(&t),
                "lucene support mismatch for {t}"
            );
        }
        assert!(check_type_support_lucene(FieldType::Boolean));
        assert!(check_type_support_lucene(FieldType::Binary));
        assert!(check_type_support_lucene(FieldType::TokenCount));
    }

    #[test]
    fn test_check_string_type() {
        for t in [
            FieldType::Keyword,
            FieldType::Text,
            FieldType::Wildcard,
            FieldType::ConstantKeyword,
            FieldType::MatchOnlyText,
        ] {
            assert!(check_string_type(t), "{t} should be a string type");
        }
        assert!(!check_string_type(FieldType::Integer));
    }

    #[test]
    fn test_check_int_type() {
        for t in [
            FieldType::Integer,
            FieldType::IntegerRange,
            FieldType::Byte,
            FieldType::Short,
            FieldType::Long,
            FieldType::LongRange,
        ] {
            assert!(check_int_type(t), "{t} should be an int type");
        }
        assert!(!check_int_type(FieldType::DoubleRange));
        assert!(!check_int_type(FieldType::UnsignedLong));
    }

    #[test]
    fn test_check_uint_type() {
        assert!(check_uint_type(FieldType::UnsignedLong));
        assert!(!check_uint_type(FieldType::Unknown));
    }

    #[test]
    fn test_check_float_type() {
        for t in [
            FieldType::HalfFloat,
            FieldType::Float,
            FieldType::FloatRange,
            FieldType::Double,
            FieldType::DoubleRange,
            FieldType::ScaledFloat,
        ] {
            assert!(check_float_type(t), "{t} should be a float type");
        }
        assert!(!check_float_type(FieldType::Unknown));
    }

    #[test]
    fn test_check_date_ip_version_types() {
        assert!(check_date_type(FieldType::Date));
        assert!(check_date_type(FieldType::DateRange));
        assert!(check_date_type(FieldType::DateNanos));
        assert!(!check_date_type(FieldType::Unknown));

        assert!(check_ip_type(FieldType::Ip));
        assert!(check_ip_type(FieldType::IpRange));
        assert!(!check_ip_type(FieldType::Unknown));

        assert!(check_version_type(FieldType::Version));
        assert!(!check_version_type(FieldType::Unknown));
    }

    #[test]
    fn test_number_is_union_of_numeric_families() {
        for t in FieldType::ALL {
            assert_eq!(
                check_number_type(t),
                check_int_type(t) || check_uint_type(t) || check_float_type(t),
                "number family mismatch for {t}"
            );
        }
        assert!(!check_number_type(FieldType::Flattened));
    }

    #[test]
    fn test_families_are_disjoint() {
        let families: [fn(FieldType) -> bool; 7] = [
            check_string_type,
            check_int_type,
            check_uint_type,
            check_float_type,
            check_date_type,
            check_ip_type,
            check_version_type,
        ];
        for t in FieldType::ALL {
            let hits = families.iter().filter(|check| check(t)).count();
            assert!(hits <= 1, "{t} belongs to {hits} families");
        }
    }

    #[test]
    fn test_parse_and_display() {
        for t in FieldType::ALL {
            assert_eq!(t.as_str().parse::<FieldType>(), Ok(t));
        }
        assert_eq!("murmur3".parse::<FieldType>(), Ok(FieldType::Unknown));
        assert_eq!(FieldType::DateNanos.to_string(), "date_nanos");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&FieldType::ScaledFloat).unwrap();
        assert_eq!(json, "\"scaled_float\"");

        let parsed: FieldType = serde_json::from_str("\"match_only_text\"").unwrap();
        assert_eq!(parsed, FieldType::MatchOnlyText);

        let unknown: FieldType = serde_json::from_str("\"histogram\"").unwrap();
        assert_eq!(unknown, FieldType::Unknown);
    }
}
