//! Volumes
//!
//! A provisioned volume and its declarative configuration. A pool can serve
//! volumes for more than one storage class, so the class name lives on the
//! volume config and queries re-check it rather than trusting pool
//! membership.

use crate::config::Protocol;
use serde::{Deserialize, Serialize};

/// Declarative configuration of a volume
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeConfig {
    pub name: String,
    /// Name of the storage class this volume was provisioned under
    pub storage_class: String,
    pub size_bytes: u64,
    pub protocol: Protocol,
}

/// A provisioned volume
#[derive(Debug, Clone)]
pub struct Volume {
    config: VolumeConfig,
}

impl Volume {
    pub fn new(config: VolumeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VolumeConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Storage class this volume belongs to
    pub fn storage_class(&self) -> &str {
        &self.config.storage_class
    }
}
