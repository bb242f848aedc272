use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::DynamicMapping;

/// Values filled into a mapping where the definition leaves them unset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultParameters {
    /// Format of `date` and `date_range` fields
    pub date_format: String,
    /// Format of `date_nanos` fields
    pub date_nanos_format: String,
    /// Scaling factor of `scaled_float` fields
    pub scaling_factor: f64,
    /// Dynamic behavior of every mapping level
    pub dynamic: DynamicMapping,
}

impl Default for DefaultParameters {
    fn default() -> Self {
        Self {
            date_format: "strict_date_optional_time||epoch_millis".to_string(),
            date_nanos_format: "strict_date_optional_time_nanos||epoch_millis".to_string(),
            scaling_factor: 1.0,
            dynamic: DynamicMapping::True,
        }
    }
}

/// Resolver configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Memoize resolved paths
    pub cache_enabled: bool,
    /// Results past this many cached paths are returned but not cached
    pub max_cached_paths: usize,
    pub defaults: DefaultParameters,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            max_cached_paths: 10_000,
            defaults: DefaultParameters::default(),
        }
    }
}

impl ResolverSettings {
    /// Load settings from JSON, missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable or disable the path cache
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Set the maximum number of cached paths
    pub fn with_max_cached_paths(mut self, max_cached_paths: usize) -> Self {
        self.max_cached_paths = max_cached_paths;
        self
    }

    pub fn with_defaults(mut self, defaults: DefaultParameters) -> Self {
        self.defaults = defaults;
        self
    }
}
