//! Storage Backend
//!
//! A backend is the connection to one physical or virtual storage system. It
//! owns its pools; every pool carries a weak pointer back to its owner so
//! membership pruning can compare backend identity rather than names.

use crate::config::Protocol;
use crate::storage::pool::{PoolSpec, StoragePool};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Storage backend entity. Constructed online; the orchestrator flips the
/// flag when the connection drops.
#[derive(Debug)]
pub struct StorageBackend {
    name: String,
    protocol: Protocol,
    online: AtomicBool,
    pools: Vec<Arc<StoragePool>>,
}

impl StorageBackend {
    /// Create a backend owning the given pools. Pool back-pointers are wired
    /// during construction, so the backend is only ever handed out as an
    /// `Arc`.
    pub fn new(
        name: impl Into<String>,
        protocol: Protocol,
        pool_specs: Vec<PoolSpec>,
    ) -> Arc<Self> {
        let name = name.into();
        Arc::new_cyclic(|backend| {
            let pools = pool_specs
                .into_iter()
                .map(|spec| Arc::new(StoragePool::new(spec, backend.clone(), name.clone())))
                .collect();
            StorageBackend {
                name,
                protocol,
                online: AtomicBool::new(true),
                pools,
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Release);
    }

    /// Pools exposed by this backend
    pub fn pools(&self) -> &[Arc<StoragePool>] {
        &self.pools
    }

    /// Look up a pool by name
    pub fn pool(&self, name: &str) -> Option<&Arc<StoragePool>> {
        self.pools.iter().find(|p| p.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::pool::AttributeMap;
    use serde_json::json;

    fn attrs(pairs: &[(&str, serde_json::Value)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_backend_wires_pool_backrefs() {
        let backend = StorageBackend::new(
            "backend-1",
            Protocol::Block,
            vec![
                PoolSpec::new("p1", attrs(&[("media", json!("ssd"))])),
                PoolSpec::new("p2", attrs(&[("media", json!("hdd"))])),
            ],
        );

        assert_eq!(backend.pools().len(), 2);
        for pool in backend.pools() {
            assert_eq!(pool.backend_name(), "backend-1");
            assert!(pool.is_owned_by(&backend));
            let owner = pool.backend().unwrap();
            assert!(Arc::ptr_eq(&owner, &backend));
        }
    }

    #[test]
    fn test_backend_online_toggle() {
        let backend = StorageBackend::new("backend-1", Protocol::File, vec![]);
        assert!(backend.is_online());
        backend.set_online(false);
        assert!(!backend.is_online());
    }

    #[test]
    fn test_pool_lookup() {
        let backend = StorageBackend::new(
            "backend-1",
            Protocol::Object,
            vec![PoolSpec::new("p1", AttributeMap::new())],
        );
        assert!(backend.pool("p1").is_some());
        assert!(backend.pool("p2").is_none());
    }
}
