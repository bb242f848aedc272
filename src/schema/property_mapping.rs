//! Resolved view over one mapping generation
//!
//! A [`PropertyMapping`] owns a normalized mapping tree, the alias table
//! extracted from it, and a cache of resolved paths. The tree and the alias
//! table never change after construction; a schema change builds a new
//! `PropertyMapping`.

use super::alias::extract_field_alias_map;
use super::defaults::fill_default_parameter;
use super::field_type::FieldType;
use super::mapping::Mapping;
use super::resolver::{get_property, ResolvedProperties};
use crate::config::ResolverSettings;
use crate::error::Result;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub struct PropertyMapping {
    field_mapping: Mapping,
    field_alias_map: HashMap<String, String>,
    /// Resolved target reference -> resolved properties
    property_cache: DashMap<String, Arc<ResolvedProperties>>,
    settings: ResolverSettings,
    /// Publication number assigned by a `MappingHolder`
    generation: u64,
}

impl PropertyMapping {
    /// Normalize `mapping` with default settings and build its alias table
    pub fn new(mapping: Mapping) -> Result<Self> {
        Self::with_settings(mapping, ResolverSettings::default())
    }

    /// Normalize `mapping` and build its alias table
    ///
    /// Fails when an alias is invalid or its target cannot be resolved.
    pub fn with_settings(mut mapping: Mapping, settings: ResolverSettings) -> Result<Self> {
        fill_default_parameter(&mut mapping, &settings.defaults);
        let field_alias_map = extract_field_alias_map(&mapping)?;
        debug!(
            aliases = field_alias_map.len(),
            properties = mapping.properties.len(),
            "built property mapping"
        );

        Ok(Self {
            field_mapping: mapping,
            field_alias_map,
            property_cache: DashMap::new(),
            settings,
            generation: 1,
        })
    }

    /// Resolve a field reference, memoizing the result
    ///
    /// Aliases are returned as alias properties; see [`Self::resolve_field`]
    /// to follow them.
    pub fn resolve(&self, path: &str) -> Result<Arc<ResolvedProperties>> {
        if let Some(cached) = self.property_cache.get(path) {
            debug!(path, "property cache hit");
            return Ok(Arc::clone(cached.value()));
        }

        let resolved = Arc::new(get_property(&self.field_mapping, path)?);
        if self.settings.cache_enabled
            && self.property_cache.len() < self.settings.max_cached_paths
        {
            // Concurrent misses compute the same value, last writer wins.
            self.property_cache
                .insert(path.to_string(), Arc::clone(&resolved));
        }
        debug!(path, matches = resolved.len(), "resolved field reference");
        Ok(resolved)
    }

    /// Resolve a field reference, first redirecting it through the alias table
    ///
    /// Only one alias hop is taken; results are keyed by target paths.
    pub fn resolve_field(&self, path: &str) -> Result<Arc<ResolvedProperties>> {
        match self.alias_target(path) {
            Some(target) => self.resolve(target),
            None => self.resolve(path),
        }
    }

    /// Type of the single field `path` resolves to, following aliases
    pub fn field_type(&self, path: &str) -> Result<Option<FieldType>> {
        let resolved = self.resolve_field(path)?;
        if resolved.len() != 1 {
            return Ok(None);
        }
        Ok(resolved.values().next().map(|property| property.effective_type()))
    }

    /// Target path of the alias `name`
    pub fn alias_target(&self, name: &str) -> Option<&str> {
        self.field_alias_map.get(name).map(String::as_str)
    }

    pub fn field_aliases(&self) -> &HashMap<String, String> {
        &self.field_alias_map
    }

    /// The normalized mapping tree
    pub fn mapping(&self) -> &Mapping {
        &self.field_mapping
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Get generation number
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(super) fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }

    /// Number of memoized field references
    pub fn cached_paths(&self) -> usize {
        self.property_cache.len()
    }
}

impl std::fmt::Debug for PropertyMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyMapping")
            .field("field_mapping", &self.field_mapping)
            .field("field_alias_map", &self.field_alias_map)
            .field("generation", &self.generation)
            .field("cached_paths", &self.property_cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MappingError;
    use crate::schema::{DynamicMapping, Property};
    use std::thread;

    fn sample_mapping() -> Mapping {
        Mapping::new()
            .property(
                "title",
                Property::text().with_field("raw", Property::keyword()),
            )
            .property(
                "author",
                Property::untyped(
                    Mapping::new()
                        .property("name", Property::text())
                        .property("born", Property::new(FieldType::DateNanos)),
                ),
            )
            .property("headline", Property::alias("title"))
            .property("writer", Property::alias("author.name"))
    }

    #[test]
    fn test_construction_fills_defaults_and_aliases() {
        let pm = PropertyMapping::new(sample_mapping()).unwrap();

        assert_eq!(pm.mapping().dynamic, Some(DynamicMapping::True));
        let author = &pm.mapping().properties["author"];
        assert_eq!(author.field_type, Some(FieldType::Object));
        assert_eq!(
            author.mapping.properties["born"].format.as_deref(),
            Some("strict_date_optional_time_nanos||epoch_millis")
        );

        assert_eq!(pm.alias_target("headline"), Some("title"));
        assert_eq!(pm.alias_target("writer"), Some("author.name"));
        assert_eq!(pm.alias_target("title"), None);
        assert_eq!(pm.field_aliases().len(), 2);
    }

    #[test]
    fn test_invalid_alias_fails_construction() {
        let mapping = Mapping::new().property("broken", Property::alias("missing"));
        let err = PropertyMapping::new(mapping).unwrap_err();
        assert!(err.is_schema_error());

        let mapping = Mapping::new()
            .property("a.b", Property::long())
            .property("a", Property::object(Mapping::new().property("b", Property::text())))
            .property("ab", Property::alias("a.b"));
        let err = PropertyMapping::new(mapping).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_resolve_is_cached() {
        let pm = PropertyMapping::new(sample_mapping()).unwrap();
        assert_eq!(pm.cached_paths(), 0);

        let first = pm.resolve("title.raw").unwrap();
        assert_eq!(pm.cached_paths(), 1);
        let second = pm.resolve("title.raw").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second["title.raw"].field_type, Some(FieldType::Keyword));

        // Misses are cached too.
        assert!(pm.resolve("nope").unwrap().is_empty());
        assert_eq!(pm.cached_paths(), 2);
    }

    #[test]
    fn test_cache_limits() {
        let disabled = PropertyMapping::with_settings(
            sample_mapping(),
            ResolverSettings::default().with_cache(false),
        )
        .unwrap();
        disabled.resolve("title").unwrap();
        assert_eq!(disabled.cached_paths(), 0);

        let bounded = PropertyMapping::with_settings(
            sample_mapping(),
            ResolverSettings::default().with_max_cached_paths(1),
        )
        .unwrap();
        bounded.resolve("title").unwrap();
        let uncached = bounded.resolve("author.name").unwrap();
        assert_eq!(bounded.cached_paths(), 1);
        assert_eq!(uncached["author.name"].field_type, Some(FieldType::Text));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mapping = Mapping::new()
            .property("a.b", Property::date())
            .property("a", Property::new(FieldType::Flattened));
        let pm = PropertyMapping::new(mapping).unwrap();

        assert!(matches!(
            pm.resolve("a.b"),
            Err(MappingError::ConflictingDefinition { .. })
        ));
        assert_eq!(pm.cached_paths(), 0);
    }

    #[test]
    fn test_resolve_field_follows_alias() {
        let pm = PropertyMapping::new(sample_mapping()).unwrap();

        let direct = pm.resolve("writer").unwrap();
        assert_eq!(direct["writer"].field_type, Some(FieldType::Alias));

        let followed = pm.resolve_field("writer").unwrap();
        assert_eq!(followed.len(), 1);
        assert_eq!(followed["author.name"].field_type, Some(FieldType::Text));

        assert_eq!(pm.field_type("headline").unwrap(), Some(FieldType::Text));
        assert_eq!(pm.field_type("author").unwrap(), None);
        assert_eq!(pm.field_type("title.raw").unwrap(), Some(FieldType::Keyword));
    }

    #[test]
    fn test_concurrent_resolution() {
        let pm = Arc::new(PropertyMapping::new(sample_mapping()).unwrap());
        let paths = ["title", "title.raw", "author.name", "author.born", "missing"];

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pm = Arc::clone(&pm);
                thread::spawn(move || {
                    for path in paths {
                        pm.resolve(path).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(pm.cached_paths(), paths.len());
        assert!(pm.resolve("missing").unwrap().is_empty());
        assert_eq!(
            pm.resolve("author.born").unwrap()["author.born"].field_type,
            Some(FieldType::DateNanos)
        );
    }
}
