//! Field alias extraction
//!
//! Collects every alias declared in a mapping into a flat table from the
//! alias full path to its target path. Targets are checked to exist but are
//! not followed: an alias pointing at another alias is recorded as is.

use super::mapping::Mapping;
use super::resolver::get_property;
use crate::error::{AliasError, MappingError, Result};
use std::collections::HashMap;

/// Build the alias table of `root`, failing on the first invalid alias
pub fn extract_field_alias_map(root: &Mapping) -> Result<HashMap<String, String>> {
    let mut aliases = HashMap::new();
    collect_aliases(root, root, "", &mut aliases)?;
    Ok(aliases)
}

fn collect_aliases(
    root: &Mapping,
    mapping: &Mapping,
    prefix: &str,
    aliases: &mut HashMap<String, String>,
) -> Result<()> {
    // Sorted so the reported error does not depend on hash order.
    let mut names: Vec<&String> = mapping.properties.keys().collect();
    names.sort();

    for name in names {
        let property = &mapping.properties[name];
        let full_name = format!("{prefix}{name}");

        if property.is_container() {
            collect_aliases(root, &property.mapping, &format!("{full_name}."), aliases)?;
        } else if property.is_alias() {
            let target = validate_alias(root, &full_name, property.alias_path())?;
            aliases.insert(full_name, target.to_string());
        }
    }
    Ok(())
}

fn validate_alias<'a>(root: &Mapping, alias: &str, target: Option<&'a str>) -> Result<&'a str> {
    let invalid = |reason| MappingError::InvalidAlias {
        alias: alias.to_string(),
        reason,
    };

    let target = target.ok_or_else(|| invalid(AliasError::MissingTarget))?;
    if target == alias {
        return Err(invalid(AliasError::SelfReference));
    }
    match get_property(root, target) {
        Ok(resolved) if resolved.is_empty() => Err(invalid(AliasError::TargetNotFound {
            target: target.to_string(),
        })),
        Ok(_) => Ok(target),
        Err(MappingError::ConflictingDefinition { first, second, .. }) => {
            Err(invalid(AliasError::ConflictingTarget {
                target: target.to_string(),
                first,
                second,
            }))
        }
        Err(err) => Err(err),
    }
}
