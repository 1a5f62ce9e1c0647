//! Matching Events
//!
//! Structured events emitted by the matching engine. Components receive an
//! injected [`EventSink`] instead of calling a global logger, so the
//! orchestrator chooses where diagnostics go (tracing, test capture, or
//! nothing).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events emitted during matching and membership maintenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchEvent {
    /// An attribute required by a class failed to match a pool's offer
    AttributeMismatch {
        storage_class: String,
        pool: String,
        attribute: String,
        requested: Value,
        /// None when the pool does not offer the attribute at all
        offered: Option<Value>,
    },

    /// A pool satisfied a class and was added to its membership
    PoolClaimed {
        storage_class: String,
        backend: String,
        pool: String,
    },

    /// A backend's pools were pruned from a class's membership
    PoolsPruned {
        storage_class: String,
        backend: String,
        removed: usize,
    },

    /// A pool with an uninitialized capability map was excluded and
    /// registration continued
    InvalidPoolSkipped {
        storage_class: String,
        pool: String,
        attribute: String,
    },
}

impl MatchEvent {
    /// Get the storage class this event concerns
    pub fn storage_class(&self) -> &str {
        match self {
            MatchEvent::AttributeMismatch { storage_class, .. } => storage_class,
            MatchEvent::PoolClaimed { storage_class, .. } => storage_class,
            MatchEvent::PoolsPruned { storage_class, .. } => storage_class,
            MatchEvent::InvalidPoolSkipped { storage_class, .. } => storage_class,
        }
    }

    /// Get the pool name if this is a pool-level event
    pub fn pool(&self) -> Option<&str> {
        match self {
            MatchEvent::AttributeMismatch { pool, .. } => Some(pool),
            MatchEvent::PoolClaimed { pool, .. } => Some(pool),
            MatchEvent::InvalidPoolSkipped { pool, .. } => Some(pool),
            MatchEvent::PoolsPruned { .. } => None,
        }
    }

    /// Check if this event reports a data-integrity problem
    pub fn is_integrity_event(&self) -> bool {
        matches!(self, MatchEvent::InvalidPoolSkipped { .. })
    }
}

// =============================================================================
// Event Sink
// =============================================================================

/// Port for consuming matching events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: MatchEvent);
}

/// Sink forwarding events to the `tracing` subscriber. Mismatches are debug
/// noise during normal re-evaluation; integrity events warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: MatchEvent) {
        match &event {
            MatchEvent::AttributeMismatch {
                storage_class,
                pool,
                attribute,
                requested,
                offered,
            } => tracing::debug!(
                %storage_class,
                %pool,
                %attribute,
                %requested,
                offered = offered.as_ref().map(|v| v.to_string()),
                "Attribute for storage pool failed to match storage class"
            ),
            MatchEvent::PoolClaimed {
                storage_class,
                backend,
                pool,
            } => tracing::debug!(%storage_class, %backend, %pool, "Storage pool added to class"),
            MatchEvent::PoolsPruned {
                storage_class,
                backend,
                removed,
            } => tracing::debug!(
                %storage_class,
                %backend,
                removed,
                "Pruned storage pools for backend"
            ),
            MatchEvent::InvalidPoolSkipped {
                storage_class,
                pool,
                attribute,
            } => tracing::warn!(
                %storage_class,
                %pool,
                %attribute,
                "Skipping storage pool with uninitialized capability map"
            ),
        }
    }
}

/// Sink discarding every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: MatchEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_accessors() {
        let event = MatchEvent::AttributeMismatch {
            storage_class: "gold".to_string(),
            pool: "pool-a".to_string(),
            attribute: "media".to_string(),
            requested: json!("ssd"),
            offered: Some(json!("hdd")),
        };
        assert_eq!(event.storage_class(), "gold");
        assert_eq!(event.pool(), Some("pool-a"));
        assert!(!event.is_integrity_event());

        let event = MatchEvent::PoolsPruned {
            storage_class: "gold".to_string(),
            backend: "backend-1".to_string(),
            removed: 2,
        };
        assert_eq!(event.pool(), None);
    }

    #[test]
    fn test_integrity_event() {
        let event = MatchEvent::InvalidPoolSkipped {
            storage_class: "gold".to_string(),
            pool: "pool-a".to_string(),
            attribute: "media".to_string(),
        };
        assert!(event.is_integrity_event());
        assert_eq!(event.pool(), Some("pool-a"));
    }
}
