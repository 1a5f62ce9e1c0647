//! Storage Pool
//!
//! A pool is one capacity unit exposed by a backend, advertising offered
//! capability values. Pools carry a back-reference set naming every storage
//! class that claimed them, so the class-to-pool relationship stays an
//! explicit bidirectional registry instead of bare shared pointers.

use crate::storage::backend::StorageBackend;
use crate::storage::volume::Volume;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Weak};

/// Offered capability values, keyed by attribute name
pub type AttributeMap = BTreeMap<String, Value>;

// =============================================================================
// Pool Spec
// =============================================================================

/// Construction input for a pool
#[derive(Debug, Clone)]
pub struct PoolSpec {
    pub name: String,
    /// `None` models a pool built without its capability map initialized,
    /// which is a defect in the discovering subsystem (see
    /// `Error::InvalidPoolState`)
    pub attributes: Option<AttributeMap>,
}

impl PoolSpec {
    pub fn new(name: impl Into<String>, attributes: AttributeMap) -> Self {
        Self {
            name: name.into(),
            attributes: Some(attributes),
        }
    }

    /// A pool whose capability map was never initialized
    pub fn uninitialized(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: None,
        }
    }
}

// =============================================================================
// Storage Pool
// =============================================================================

/// Storage pool entity. Owned by its backend; classes hold non-owning
/// references.
#[derive(Debug)]
pub struct StoragePool {
    name: String,
    backend: Weak<StorageBackend>,
    backend_name: String,
    attributes: Option<AttributeMap>,
    volumes: RwLock<Vec<Arc<Volume>>>,
    storage_classes: RwLock<BTreeSet<String>>,
}

impl StoragePool {
    pub(crate) fn new(spec: PoolSpec, backend: Weak<StorageBackend>, backend_name: String) -> Self {
        Self {
            name: spec.name,
            backend,
            backend_name,
            attributes: spec.attributes,
            volumes: RwLock::new(Vec::new()),
            storage_classes: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning backend, if still alive
    pub fn backend(&self) -> Option<Arc<StorageBackend>> {
        self.backend.upgrade()
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Identity comparison against a backend. Two backends with the same
    /// name are still distinct owners.
    pub fn is_owned_by(&self, backend: &Arc<StorageBackend>) -> bool {
        std::ptr::eq(self.backend.as_ptr(), Arc::as_ptr(backend))
    }

    /// Offered capability map; `None` when the pool was constructed without
    /// one
    pub fn attributes(&self) -> Option<&AttributeMap> {
        self.attributes.as_ref()
    }

    // -------------------------------------------------------------------------
    // Volumes
    // -------------------------------------------------------------------------

    /// Snapshot of the volumes currently provisioned on this pool
    pub fn volumes(&self) -> Vec<Arc<Volume>> {
        self.volumes.read().clone()
    }

    pub fn add_volume(&self, volume: Arc<Volume>) {
        self.volumes.write().push(volume);
    }

    // -------------------------------------------------------------------------
    // Class Back-References
    // -------------------------------------------------------------------------

    /// Names of the storage classes that currently claim this pool
    pub fn storage_classes(&self) -> BTreeSet<String> {
        self.storage_classes.read().clone()
    }

    pub(crate) fn add_storage_class(&self, class_name: &str) {
        self.storage_classes.write().insert(class_name.to_string());
    }

    pub(crate) fn remove_storage_class(&self, class_name: &str) {
        self.storage_classes.write().remove(class_name);
    }
}
