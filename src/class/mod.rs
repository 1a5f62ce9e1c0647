//! Storage Class entity
//!
//! Wraps an immutable [`StorageClassConfig`] plus the mutable live set of
//! matching pools, and owns the matching predicate, membership maintenance,
//! queries, and projection construction.
//!
//! The entity is a passive data structure: no internal locking, no I/O, no
//! blocking. The orchestrator serializes access to it, typically under one
//! coarse lock over all storage classes. The only state it mutates outside
//! itself is the claimed-class back-reference set on pools, through the
//! pool's own registration calls.

pub mod config;
pub mod projection;

pub use config::StorageClassConfig;
pub use projection::{StorageClassExternal, StorageClassPersistent};

use crate::capability::CapabilityComparator;
use crate::config::Protocol;
use crate::error::{Error, Result};
use crate::events::{EventSink, MatchEvent};
use crate::storage::{StorageBackend, StoragePool, Volume};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

// =============================================================================
// Invalid Pool Handling
// =============================================================================

/// What backend registration does with a pool whose capability map was never
/// initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidPoolHandling {
    /// Exclude the pool, emit an event, and keep evaluating the rest of the
    /// backend
    Skip,
    /// Abort the registration batch with `Error::InvalidPoolState`
    #[default]
    Fail,
}

// =============================================================================
// Storage Class
// =============================================================================

/// A named provisioning profile and the live set of pools known to satisfy it
pub struct StorageClass {
    config: StorageClassConfig,
    /// Non-owning references to currently matching pools; backends own the
    /// pools themselves
    pools: Vec<Arc<StoragePool>>,
    comparator: Arc<dyn CapabilityComparator>,
    events: Arc<dyn EventSink>,
}

impl StorageClass {
    /// Create a storage class around a configuration, with the capability
    /// comparator and event sink injected by the orchestrator
    pub fn new(
        config: StorageClassConfig,
        comparator: Arc<dyn CapabilityComparator>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            config: config.with_default_version(),
            pools: Vec::new(),
            comparator,
            events,
        }
    }

    /// Create a storage class from its JSON configuration
    pub fn from_json(
        json: &str,
        comparator: Arc<dyn CapabilityComparator>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self> {
        Ok(Self::new(
            StorageClassConfig::from_json(json)?,
            comparator,
            events,
        ))
    }

    /// Rebuild a storage class from a persisted record. Membership starts
    /// empty; the orchestrator replays backend registration to restore it.
    pub fn from_persistent(
        persistent: StorageClassPersistent,
        comparator: Arc<dyn CapabilityComparator>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self::new(persistent.config, comparator, events)
    }

    // -------------------------------------------------------------------------
    // Matching Predicate
    // -------------------------------------------------------------------------

    /// Decide whether a pool satisfies this class.
    ///
    /// An allow-list entry naming the pool is an unconditional override;
    /// otherwise every requested attribute must be offered and accepted by
    /// the comparator, and a class with no requirements matches nothing. A
    /// pool without an initialized capability map is a data-integrity defect
    /// surfaced as [`Error::InvalidPoolState`].
    pub fn matches(&self, pool: &StoragePool) -> Result<bool> {
        if !self.config.backend_storage_pools.is_empty() {
            if let Some(pool_names) = self.config.backend_storage_pools.get(pool.backend_name()) {
                if pool_names.iter().any(|n| n == pool.name()) {
                    return Ok(true);
                }
            }
        }

        if self.config.attributes.is_empty() {
            return Ok(false);
        }
        for (attribute, requested) in &self.config.attributes {
            let offered_map = pool.attributes().ok_or_else(|| Error::InvalidPoolState {
                storage_class: self.config.name.clone(),
                pool: pool.name().to_string(),
                attribute: attribute.clone(),
            })?;
            match offered_map.get(attribute) {
                Some(offered) if self.comparator.matches(attribute, requested, offered) => {}
                offered => {
                    self.events.emit(MatchEvent::AttributeMismatch {
                        storage_class: self.config.name.clone(),
                        pool: pool.name().to_string(),
                        attribute: attribute.clone(),
                        requested: requested.clone(),
                        offered: offered.cloned(),
                    });
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Membership Maintenance
    // -------------------------------------------------------------------------

    /// Evaluate every pool an online backend exposes and add the matches to
    /// this class's membership. Returns the number of pools added; an
    /// offline backend adds nothing.
    ///
    /// Registration is idempotent: any pools this backend already has in the
    /// membership are pruned before re-evaluation, so repeated calls never
    /// duplicate references.
    ///
    /// A pool with an uninitialized capability map aborts the batch; the
    /// backend may then be left partially registered and should be
    /// deregistered. Use [`check_and_add_backend_with`] to skip such pools
    /// instead.
    ///
    /// [`check_and_add_backend_with`]: Self::check_and_add_backend_with
    pub fn check_and_add_backend(&mut self, backend: &Arc<StorageBackend>) -> Result<usize> {
        self.check_and_add_backend_with(backend, InvalidPoolHandling::Fail)
    }

    /// [`check_and_add_backend`](Self::check_and_add_backend) with an
    /// explicit policy for invalid pools
    pub fn check_and_add_backend_with(
        &mut self,
        backend: &Arc<StorageBackend>,
        on_invalid: InvalidPoolHandling,
    ) -> Result<usize> {
        if !backend.is_online() {
            return Ok(0);
        }
        self.remove_pools_for_backend(backend);

        let mut added = 0;
        for pool in backend.pools() {
            match self.matches(pool) {
                Ok(true) => {
                    self.pools.push(Arc::clone(pool));
                    pool.add_storage_class(&self.config.name);
                    self.events.emit(MatchEvent::PoolClaimed {
                        storage_class: self.config.name.clone(),
                        backend: backend.name().to_string(),
                        pool: pool.name().to_string(),
                    });
                    added += 1;
                }
                Ok(false) => {}
                Err(err) => match on_invalid {
                    InvalidPoolHandling::Skip => {
                        if let Error::InvalidPoolState { attribute, .. } = &err {
                            self.events.emit(MatchEvent::InvalidPoolSkipped {
                                storage_class: self.config.name.clone(),
                                pool: pool.name().to_string(),
                                attribute: attribute.clone(),
                            });
                        }
                    }
                    InvalidPoolHandling::Fail => return Err(err),
                },
            }
        }
        Ok(added)
    }

    /// Drop every member pool owned by the given backend, compared by
    /// identity rather than name. Pruned pools also lose this class from
    /// their back-reference set. No-op for a backend with no members;
    /// survivors keep their insertion order.
    pub fn remove_pools_for_backend(&mut self, backend: &Arc<StorageBackend>) {
        let class_name = &self.config.name;
        let before = self.pools.len();
        self.pools.retain(|pool| {
            if pool.is_owned_by(backend) {
                pool.remove_storage_class(class_name);
                false
            } else {
                true
            }
        });
        let removed = before - self.pools.len();
        if removed > 0 {
            self.events.emit(MatchEvent::PoolsPruned {
                storage_class: self.config.name.clone(),
                backend: backend.name().to_string(),
                removed,
            });
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Every volume across all member pools whose own configuration names
    /// this class. Pools can serve several classes, so each volume is
    /// re-checked against its own metadata.
    pub fn volumes(&self) -> Vec<Arc<Volume>> {
        let mut ret = Vec::new();
        for pool in &self.pools {
            for volume in pool.volumes() {
                if volume.storage_class() == self.config.name {
                    ret.push(volume);
                }
            }
        }
        ret
    }

    /// Member pools whose backend serves the requested protocol.
    /// [`Protocol::Any`] returns every member, including pools whose
    /// backend has already been dropped; a concrete protocol excludes
    /// such pools since their protocol can no longer be read.
    pub fn pools_for_protocol(&self, protocol: Protocol) -> Vec<Arc<StoragePool>> {
        if protocol.is_wildcard() {
            return self.pools.to_vec();
        }
        self.pools
            .iter()
            .filter(|pool| {
                pool.backend()
                    .map_or(false, |b| protocol.accepts(b.protocol()))
            })
            .cloned()
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.config.attributes
    }

    pub fn backend_storage_pools(&self) -> &BTreeMap<String, Vec<String>> {
        &self.config.backend_storage_pools
    }

    /// Current member pools, in insertion order
    pub fn pools(&self) -> &[Arc<StoragePool>] {
        &self.pools
    }

    // -------------------------------------------------------------------------
    // Projections
    // -------------------------------------------------------------------------

    /// Snapshot configuration plus current membership, grouped by backend
    /// name with every list sorted. Rebuilt fresh on each call; two calls
    /// against unchanged membership serialize byte-identically.
    pub fn construct_external(&self) -> StorageClassExternal {
        let mut storage_pools: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for pool in &self.pools {
            storage_pools
                .entry(pool.backend_name().to_string())
                .or_default()
                .push(pool.name().to_string());
        }
        for list in storage_pools.values_mut() {
            list.sort();
        }
        StorageClassExternal {
            config: self.config.with_sorted_backend_storage_pools(),
            storage_pools,
        }
    }

    /// Snapshot declared intent only: the configuration with sorted
    /// allow-lists, live membership discarded
    pub fn construct_persistent(&self) -> StorageClassPersistent {
        StorageClassPersistent {
            config: self.config.with_sorted_backend_storage_pools(),
        }
    }
}

impl std::fmt::Debug for StorageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClass")
            .field("config", &self.config)
            .field("pools", &self.pools.iter().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}
