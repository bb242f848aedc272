//! Atomic publication of mapping generations

use super::mapping::Mapping;
use super::property_mapping::PropertyMapping;
use crate::config::ResolverSettings;
use crate::error::Result;
use arc_swap::{ArcSwap, Guard};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// Thread-safe holder of the current [`PropertyMapping`]
///
/// Readers load the current generation without locking; a schema change
/// builds a complete new generation and swaps it in. The generation number
/// travels inside the published value, so a reader always sees the number
/// of the mapping it loaded.
pub struct MappingHolder {
    inner: ArcSwap<PropertyMapping>,
    /// Serializes publishers, holds the last published generation
    publish_lock: Mutex<u64>,
    settings: ResolverSettings,
}

impl MappingHolder {
    pub fn new(mut property_mapping: PropertyMapping) -> Self {
        let settings = property_mapping.settings().clone();
        property_mapping.set_generation(1);
        Self {
            inner: ArcSwap::from_pointee(property_mapping),
            publish_lock: Mutex::new(1),
            settings,
        }
    }

    /// Build the first generation from a raw mapping
    pub fn build(mapping: Mapping, settings: ResolverSettings) -> Result<Self> {
        Ok(Self::new(PropertyMapping::with_settings(mapping, settings)?))
    }

    /// Get the current generation
    pub fn load(&self) -> Guard<Arc<PropertyMapping>> {
        self.inner.load()
    }

    /// Get an owned handle on the current generation
    pub fn current(&self) -> Arc<PropertyMapping> {
        self.inner.load_full()
    }

    /// Atomically replace the current generation
    pub fn store(&self, mut property_mapping: PropertyMapping) {
        let mut last = self.publish_lock.lock();
        *last += 1;
        property_mapping.set_generation(*last);
        self.inner.store(Arc::new(property_mapping));
        info!(generation = *last, "published mapping generation");
    }

    /// Build a generation from `mapping` and publish it
    ///
    /// The current generation stays in place when the new mapping is invalid.
    pub fn rebuild(&self, mapping: Mapping) -> Result<()> {
        let property_mapping = PropertyMapping::with_settings(mapping, self.settings.clone())?;
        self.store(property_mapping);
        Ok(())
    }

    /// Get generation number
    pub fn generation(&self) -> u64 {
        self.inner.load().generation()
    }
}
