//! Storage Class Projections
//!
//! Derived, serializable views of a storage class. The external projection
//! captures configuration plus current membership for operators and UIs; the
//! persistent projection captures declared intent only, since live membership
//! is recomputed after reload by replaying backend registration. Field names
//! keep the wire form of the original orchestrator records.

use crate::class::config::StorageClassConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// External view: configuration plus a sorted snapshot of which pools on
/// which backends currently match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageClassExternal {
    #[serde(rename = "Config")]
    pub config: StorageClassConfig,

    /// Backend name to lexicographically sorted matching pool names
    #[serde(rename = "StoragePools")]
    pub storage_pools: BTreeMap<String, Vec<String>>,
}

impl StorageClassExternal {
    pub fn name(&self) -> &str {
        &self.config.name
    }
}

/// Durable-store record: configuration with sorted allow-lists, membership
/// discarded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageClassPersistent {
    #[serde(rename = "Config")]
    pub config: StorageClassConfig,
}

impl StorageClassPersistent {
    pub fn name(&self) -> &str {
        &self.config.name
    }
}
