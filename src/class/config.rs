//! Storage Class Configuration
//!
//! The immutable declarative spec of a storage class: requested attributes
//! plus an optional explicit backend/pool allow-list. Constructed from JSON
//! or rebuilt from a persisted projection; never mutated afterwards.

use crate::config::ORCHESTRATOR_API_VERSION;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Declarative storage class spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageClassConfig {
    /// Schema version; defaults to the orchestrator API version when absent
    #[serde(default)]
    pub version: String,

    /// Unique name, used as the class's external key
    pub name: String,

    /// Requested capability values, keyed by attribute name. An empty map is
    /// meaningful: without an allow-list hit the class matches nothing.
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,

    /// Explicit allow-list of backend name to permitted pool names. A listed
    /// pool matches unconditionally, bypassing attribute matching.
    #[serde(default)]
    pub backend_storage_pools: BTreeMap<String, Vec<String>>,
}

impl StorageClassConfig {
    /// Parse a configuration from its JSON wire form. Malformed input is a
    /// recoverable error; no partial config is returned.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.name.is_empty() {
            return Err(Error::Configuration(
                "storage class name must not be empty".to_string(),
            ));
        }
        Ok(config.with_default_version())
    }

    /// Stamp the orchestrator API version on configs that omit one
    pub(crate) fn with_default_version(mut self) -> Self {
        if self.version.is_empty() {
            self.version = ORCHESTRATOR_API_VERSION.to_string();
        }
        self
    }

    /// Copy with every allow-list entry sorted lexicographically, as both
    /// projections require
    pub(crate) fn with_sorted_backend_storage_pools(&self) -> Self {
        let mut config = self.clone();
        for list in config.backend_storage_pools.values_mut() {
            list.sort();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let config = StorageClassConfig::from_json(
            r#"{
                "version": "2",
                "name": "gold",
                "attributes": {"tier": "fast", "iops": 1000},
                "backendStoragePools": {"backend-1": ["p2", "p1"]}
            }"#,
        )
        .unwrap();

        assert_eq!(config.version, "2");
        assert_eq!(config.name, "gold");
        assert_eq!(config.attributes["tier"], json!("fast"));
        assert_eq!(config.attributes["iops"], json!(1000));
        assert_eq!(
            config.backend_storage_pools["backend-1"],
            vec!["p2".to_string(), "p1".to_string()]
        );
    }

    #[test]
    fn test_version_defaults() {
        let config = StorageClassConfig::from_json(r#"{"name": "gold"}"#).unwrap();
        assert_eq!(config.version, ORCHESTRATOR_API_VERSION);
        assert!(config.attributes.is_empty());
        assert!(config.backend_storage_pools.is_empty());
    }

    #[test]
    fn test_malformed_json_is_recoverable() {
        assert_matches!(
            StorageClassConfig::from_json("{not json"),
            Err(Error::JsonParse(_))
        );
        // Missing required name
        assert_matches!(
            StorageClassConfig::from_json(r#"{"version": "1"}"#),
            Err(Error::JsonParse(_))
        );
        assert_matches!(
            StorageClassConfig::from_json(r#"{"name": ""}"#),
            Err(Error::Configuration(_))
        );
    }

    #[test]
    fn test_sorted_allow_list_copy() {
        let config = StorageClassConfig::from_json(
            r#"{"name": "gold", "backendStoragePools": {"b": ["z", "a", "m"]}}"#,
        )
        .unwrap();

        let sorted = config.with_sorted_backend_storage_pools();
        assert_eq!(
            sorted.backend_storage_pools["b"],
            vec!["a".to_string(), "m".to_string(), "z".to_string()]
        );
        // Source config untouched
        assert_eq!(config.backend_storage_pools["b"][0], "z");
    }
}
