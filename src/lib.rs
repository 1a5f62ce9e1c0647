//! Poolmatch - Storage Class Constraint Matching
//!
//! The constraint-matching engine of a storage orchestration control plane.
//! It resolves which storage pools satisfy the capability requirements
//! declared by a storage class, maintains the live per-class membership as
//! backends come and go, and derives deterministic serializable views of
//! that membership.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  Orchestrator Event Loop                      │
//! │        (owns serialization of all access, not this crate)     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                    StorageClass                         │  │
//! │  │   matching · membership · queries · projections         │  │
//! │  └───────┬───────────────────┬────────────────┬───────────┘  │
//! │          │                   │                │              │
//! │  ┌───────┴────────┐  ┌───────┴───────┐  ┌─────┴──────────┐   │
//! │  │ Capability     │  │  EventSink    │  │ Backends/Pools │   │
//! │  │ Comparator     │  │  (injected)   │  │ /Volumes       │   │
//! │  └────────────────┘  └───────────────┘  └────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is passive and synchronous: no internal locking, no I/O, no
//! blocking. Callers serialize access to each [`StorageClass`] instance.
//!
//! # Modules
//!
//! - [`class`]: the storage class entity, its configuration, and projections
//! - [`storage`]: backend, pool, and volume entities
//! - [`capability`]: the opaque per-attribute comparator boundary
//! - [`events`]: structured matching events and sinks
//! - [`config`]: orchestrator constants and the protocol enum
//! - [`error`]: error types and handling

pub mod capability;
pub mod class;
pub mod config;
pub mod error;
pub mod events;
pub mod storage;

// Re-export commonly used types
pub use capability::{CapabilityComparator, ExactMatchComparator, FnComparator};

pub use class::{
    InvalidPoolHandling, StorageClass, StorageClassConfig, StorageClassExternal,
    StorageClassPersistent,
};

pub use config::{Protocol, ORCHESTRATOR_API_VERSION};

pub use error::{Error, Result};

pub use events::{EventSink, MatchEvent, NullSink, TracingSink};

pub use storage::{AttributeMap, PoolSpec, StorageBackend, StoragePool, Volume, VolumeConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
