//! Storage Entities
//!
//! The external entities the matching engine evaluates: backends, the pools
//! they own, and the volumes provisioned on those pools. Backends own pools;
//! the engine only ever holds non-owning references.
//!
//! - [`backend`]: storage backend entity with online status and pool set
//! - [`pool`]: storage pool entity with offered attributes and the
//!   class back-reference set
//! - [`volume`]: provisioned volume and its configuration

pub mod backend;
pub mod pool;
pub mod volume;

pub use backend::StorageBackend;
pub use pool::{AttributeMap, PoolSpec, StoragePool};
pub use volume::{Volume, VolumeConfig};
