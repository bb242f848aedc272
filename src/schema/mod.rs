//! Schema and mapping resolution
//!
//! This module defines the mapping model and the logic that answers
//! "what is the type and shape of field X":
//! - Field types and their semantic families
//! - Mapping trees (properties, multi-fields, aliases)
//! - Dotted path resolution with conflict detection
//! - Alias extraction and default parameters
//! - Cached, atomically replaceable mapping generations

mod alias;
mod defaults;
mod field_type;
mod holder;
mod mapping;
mod property_mapping;
mod resolver;

pub use alias::extract_field_alias_map;
pub use defaults::fill_default_parameter;
pub use field_type::{
    check_date_type, check_float_type, check_int_type, check_ip_type, check_number_type,
    check_string_type, check_type_support_lucene, check_uint_type, check_version_type, FieldType,
};
pub use holder::MappingHolder;
pub use mapping::{DynamicMapping, Mapping, Property};
pub use property_mapping::PropertyMapping;
pub use resolver::{get_property, ResolvedProperties, MULTI_FIELD_WILDCARD};
