//! Index mapping definitions
//!
//! A mapping is a tree of named properties. Object and nested properties own
//! a sub-mapping, leaf properties may declare multi-fields, and alias
//! properties point at another field by its full dotted path.

use super::field_type::FieldType;
use crate::error::Result;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Dynamic mapping behavior for unmapped fields
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DynamicMapping {
    /// Automatically detect and map new fields (default)
    #[default]
    True,
    /// Ignore unmapped fields (don't index them)
    False,
    /// Reject documents with unmapped fields
    Strict,
    /// Map new fields as runtime fields
    Runtime,
}

impl From<bool> for DynamicMapping {
    fn from(enabled: bool) -> Self {
        if enabled {
            DynamicMapping::True
        } else {
            DynamicMapping::False
        }
    }
}

// Mapping definitions carry `dynamic` either as a JSON boolean or as one of
// the strings "true", "false", "strict", "runtime".
impl Serialize for DynamicMapping {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DynamicMapping::True => serializer.serialize_bool(true),
            DynamicMapping::False => serializer.serialize_bool(false),
            DynamicMapping::Strict => serializer.serialize_str("strict"),
            DynamicMapping::Runtime => serializer.serialize_str("runtime"),
        }
    }
}

impl<'de> Deserialize<'de> for DynamicMapping {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DynamicHelper {
            Bool(bool),
            Name(String),
        }

        match DynamicHelper::deserialize(deserializer)? {
            DynamicHelper::Bool(enabled) => Ok(enabled.into()),
            DynamicHelper::Name(name) => match name.to_lowercase().as_str() {
                "true" => Ok(DynamicMapping::True),
                "false" => Ok(DynamicMapping::False),
                "strict" => Ok(DynamicMapping::Strict),
                "runtime" => Ok(DynamicMapping::Runtime),
                other => Err(de::Error::custom(format!(
                    "unknown dynamic mapping `{other}`, expected true, false, strict or runtime"
                ))),
            },
        }
    }
}

/// A named collection of properties
///
/// Property names are case-sensitive and may contain literal dots.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    /// Field definitions at this level
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Property>,

    /// Dynamic mapping behavior, `None` until defaults are filled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicMapping>,
}

impl Mapping {
    /// Create a new empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a mapping definition from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(json: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }

    /// Add a property
    pub fn property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Set dynamic mapping behavior
    pub fn with_dynamic(mut self, dynamic: DynamicMapping) -> Self {
        self.dynamic = Some(dynamic);
        self
    }

    /// True when no property is declared at this level
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Full paths of every addressable leaf field, sorted
    ///
    /// Declared multi-fields are listed under their parent. Containers,
    /// flattened fields and aliases are not listed.
    pub fn field_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_field_names(self, "", &mut names);
        names.sort();
        names
    }
}

fn collect_field_names(mapping: &Mapping, prefix: &str, names: &mut Vec<String>) {
    for (name, property) in &mapping.properties {
        let full_name = format!("{prefix}{name}");

        if property.is_container() {
            collect_field_names(&property.mapping, &format!("{full_name}."), names);
            continue;
        }
        if property.is_flattened() || property.is_alias() {
            continue;
        }

        for sub_name in property.fields.keys() {
            names.push(format!("{full_name}.{sub_name}"));
        }
        names.push(full_name);
    }
}

/// A single field definition
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Declared type, absent for an implicit object
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,

    /// Sub-tree of an object or nested field
    #[serde(flatten)]
    pub mapping: Mapping,

    /// Multi-fields: secondary views of this field, addressed as `<field>.<name>`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, Property>,

    /// Target of an alias field (full dotted path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Date parse and display format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Multiplier applied to scaled_float values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling_factor: Option<f64>,
}

impl Property {
    /// Create a property of the given type
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Default::default()
        }
    }

    /// Create an object property holding `mapping`
    pub fn object(mapping: Mapping) -> Self {
        Self {
            field_type: Some(FieldType::Object),
            mapping,
            ..Default::default()
        }
    }

    /// Create a nested property holding `mapping`
    pub fn nested(mapping: Mapping) -> Self {
        Self {
            field_type: Some(FieldType::Nested),
            mapping,
            ..Default::default()
        }
    }

    /// Create a property without a declared type, an implicit object
    pub fn untyped(mapping: Mapping) -> Self {
        Self {
            mapping,
            ..Default::default()
        }
    }

    /// Create an alias property pointing at `path`
    pub fn alias(path: impl Into<String>) -> Self {
        Self {
            field_type: Some(FieldType::Alias),
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn keyword() -> Self {
        Self::new(FieldType::Keyword)
    }

    pub fn text() -> Self {
        Self::new(FieldType::Text)
    }

    pub fn long() -> Self {
        Self::new(FieldType::Long)
    }

    pub fn date() -> Self {
        Self::new(FieldType::Date)
    }

    /// Add a multi-field
    pub fn with_field(mut self, name: impl Into<String>, property: Property) -> Self {
        self.fields.insert(name.into(), property);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_scaling_factor(mut self, scaling_factor: f64) -> Self {
        self.scaling_factor = Some(scaling_factor);
        self
    }

    /// Declared type, `Object` when absent
    pub fn effective_type(&self) -> FieldType {
        self.field_type.unwrap_or(FieldType::Object)
    }

    /// Object, nested, or a property without a type (implicit object)
    pub fn is_container(&self) -> bool {
        self.effective_type().is_container()
    }

    pub fn is_flattened(&self) -> bool {
        self.field_type == Some(FieldType::Flattened)
    }

    pub fn is_alias(&self) -> bool {
        self.field_type == Some(FieldType::Alias)
    }

    /// Alias target, `None` when missing or empty
    pub fn alias_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|path| !path.is_empty())
    }

    /// Whether a reference naming exactly this property resolves to it
    ///
    /// Containers and flattened fields have no value of their own.
    pub fn is_addressable(&self) -> bool {
        !self.is_container() && !self.is_flattened()
    }
}
