//! Dotted path resolution
//!
//! Turns a field reference such as `author.name`, `title.raw` or
//! `title.raw\*` into the properties it denotes. A reference can reach a
//! property through several addressing schemes at once (literal dotted
//! keys, object descent, multi-fields, flattened sub-keys); every scheme is
//! tried and the results are merged per full path. Two schemes producing
//! different types for the same path is a conflict.

use super::field_type::FieldType;
use super::mapping::{Mapping, Property};
use crate::error::{MappingError, Result};
use std::borrow::Cow;
use std::collections::HashMap;

/// Resolved properties keyed by their full dotted path
pub type ResolvedProperties = HashMap<String, Property>;

/// Trailing marker selecting every multi-field starting with a prefix
pub const MULTI_FIELD_WILDCARD: &str = "\\*";

/// How a candidate was reached, in order of precedence
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Strategy {
    Literal,
    Descent,
    MultiField,
    Flattened,
}

#[derive(Debug)]
struct Candidate<'a> {
    strategy: Strategy,
    property: Cow<'a, Property>,
}

impl Candidate<'_> {
    fn field_type(&self) -> FieldType {
        self.property.effective_type()
    }
}

type Candidates<'a> = HashMap<String, Vec<Candidate<'a>>>;

/// Resolve `target` against `root`
///
/// An empty result means no addressable field lives at `target`; that is
/// not an error. Containers and flattened fields are never returned for
/// their own name.
pub fn get_property(root: &Mapping, target: &str) -> Result<ResolvedProperties> {
    let mut candidates = Candidates::new();
    collect_candidates(root, "", target, &mut candidates);

    let mut resolved = ResolvedProperties::with_capacity(candidates.len());
    for (path, mut found) in candidates {
        // Precedence only picks which agreeing definition is returned.
        found.sort_by_key(|candidate| candidate.strategy);
        check_agreement(&path, &found)?;
        if let Some(first) = found.into_iter().next() {
            resolved.insert(path, first.property.into_owned());
        }
    }
    Ok(resolved)
}

fn push<'a>(
    candidates: &mut Candidates<'a>,
    path: String,
    strategy: Strategy,
    property: Cow<'a, Property>,
) {
    candidates
        .entry(path)
        .or_default()
        .push(Candidate { strategy, property });
}

fn collect_candidates<'a>(
    mapping: &'a Mapping,
    prefix: &str,
    remaining: &str,
    candidates: &mut Candidates<'a>,
) {
    if remaining.is_empty() {
        return;
    }

    if let Some(property) = mapping.properties.get(remaining) {
        if property.is_addressable() {
            push(
                candidates,
                format!("{prefix}{remaining}"),
                Strategy::Literal,
                Cow::Borrowed(property),
            );
        }
    }

    // Every dot is a possible boundary since names may contain dots.
    for (dot, _) in remaining.match_indices('.') {
        let head = &remaining[..dot];
        let tail = &remaining[dot + 1..];
        if head.is_empty() || tail.is_empty() {
            continue;
        }
        let Some(property) = mapping.properties.get(head) else {
            continue;
        };
        let base = format!("{prefix}{head}");

        if property.is_container() {
            collect_candidates(&property.mapping, &format!("{base}."), tail, candidates);
        } else if property.is_flattened() {
            // Sub-keys are unbounded, so wildcards never apply here.
            if !tail.ends_with('*') {
                push(
                    candidates,
                    format!("{base}.{tail}"),
                    Strategy::Flattened,
                    Cow::Owned(Property::keyword()),
                );
            }
        } else if !property.fields.is_empty() {
            collect_multi_fields(property, &base, tail, candidates);
        }
    }
}

fn collect_multi_fields<'a>(
    property: &'a Property,
    base: &str,
    selector: &str,
    candidates: &mut Candidates<'a>,
) {
    match selector.strip_suffix(MULTI_FIELD_WILDCARD) {
        Some(name_prefix) => {
            for (name, sub_field) in &property.fields {
                if name.starts_with(name_prefix) {
                    push(
                        candidates,
                        format!("{base}.{name}"),
                        Strategy::MultiField,
                        Cow::Borrowed(sub_field),
                    );
                }
            }
        }
        None => {
            if let Some(sub_field) = property.fields.get(selector) {
                push(
                    candidates,
                    format!("{base}.{selector}"),
                    Strategy::MultiField,
                    Cow::Borrowed(sub_field),
                );
            }
        }
    }
}

/// Every pair of candidates for `path` must agree on the field type.
fn check_agreement(path: &str, found: &[Candidate<'_>]) -> Result<()> {
    for (i, first) in found.iter().enumerate() {
        for second in &found[i + 1..] {
            if first.field_type() != second.field_type() {
                return Err(MappingError::ConflictingDefinition {
                    path: path.to_string(),
                    first: first.field_type(),
                    second: second.field_type(),
                });
            }
        }
    }
    Ok(())
}
