//! Default parameters
//!
//! Normalizes a mapping definition before it is wrapped into a
//! [`PropertyMapping`](super::PropertyMapping): unset dynamic flags, implicit
//! object types, date formats and scaling factors are filled in. Values that
//! are already set are never overwritten, so filling is idempotent.

use super::field_type::FieldType;
use super::mapping::{Mapping, Property};
use crate::config::DefaultParameters;

/// Fill unset parameters of `mapping` and every mapping below it
pub fn fill_default_parameter(mapping: &mut Mapping, defaults: &DefaultParameters) {
    if mapping.dynamic.is_none() {
        mapping.dynamic = Some(defaults.dynamic);
    }

    for property in mapping.properties.values_mut() {
        fill_property(property, defaults);
    }
}

fn fill_property(property: &mut Property, defaults: &DefaultParameters) {
    if property.field_type.is_none() && !property.mapping.is_empty() {
        property.field_type = Some(FieldType::Object);
    }

    match property.field_type {
        Some(FieldType::Date | FieldType::DateRange) if format_unset(property) => {
            property.format = Some(defaults.date_format.clone());
        }
        Some(FieldType::DateNanos) if format_unset(property) => {
            property.format = Some(defaults.date_nanos_format.clone());
        }
        Some(FieldType::ScaledFloat)
            if property.scaling_factor.map_or(true, |factor| factor == 0.0) =>
        {
            property.scaling_factor = Some(defaults.scaling_factor);
        }
        _ => {}
    }

    if property.is_container() {
        fill_default_parameter(&mut property.mapping, defaults);
    }

    for sub_field in property.fields.values_mut() {
        fill_property(sub_field, defaults);
    }
}

/// An empty format string counts as unset
fn format_unset(property: &Property) -> bool {
    property.format.as_deref().map_or(true, str::is_empty)
}
