//! Orchestrator-level constants and shared enums
//!
//! Values the matching engine shares with the wider control plane: the
//! orchestrator API version stamped on configurations that omit one, and the
//! transport protocol classification used for pool filtering.

use serde::{Deserialize, Serialize};

/// API version stamped on storage class configurations without an explicit
/// version
pub const ORCHESTRATOR_API_VERSION: &str = "1";

// =============================================================================
// Protocol
// =============================================================================

/// Transport protocol exposed by a storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Block,
    File,
    Object,
    /// Wildcard matching every protocol
    Any,
}

impl Protocol {
    /// Check if this protocol is the wildcard
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Protocol::Any)
    }

    /// Check if a backend exposing `offered` serves a request for `self`
    pub fn accepts(&self, offered: Protocol) -> bool {
        self.is_wildcard() || *self == offered
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Block => write!(f, "block"),
            Protocol::File => write!(f, "file"),
            Protocol::Object => write!(f, "object"),
            Protocol::Any => write!(f, "any"),
        }
    }
}
